//! Recursive-descent parser for the `OpenQASM` 2 subset.
//!
//! Supported statements: the version header, `include` (ignored),
//! `qreg`/`creg` declarations, the standard gate set of the IR, `measure`,
//! `reset`, `barrier`, and the Pauli-form extension instructions
//! (`t_pauli(+XIZ);`, `m_pauli(+ZZ) -> c[0];`) used when serializing PBCs.

use std::f64::consts::PI;

use alsvid_ir::{Circuit, ClbitId, QubitId, StandardGate};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{tokenize, SpannedToken, Token};

/// Parse QASM source into a circuit.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let tokens = tokenize(source).map_err(|(span, message)| ParseError::Lexer {
        position: span.start,
        message,
    })?;
    Parser::new(tokens).parse()
}

#[derive(Debug, Clone, Copy)]
struct Reg {
    start: u32,
    size: u32,
}

/// A qubit or clbit argument: one indexed bit, or a whole register to
/// broadcast over.
enum ArgRef {
    Single(u32),
    Register(Reg),
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    circuit: Circuit,
    qregs: Vec<(String, Reg)>,
    cregs: Vec<(String, Reg)>,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            circuit: Circuit::new("qasm"),
            qregs: vec![],
            cregs: vec![],
        }
    }

    fn parse(mut self) -> ParseResult<Circuit> {
        self.expect(&Token::OpenQasm)?;
        let version = match self.advance("version number")? {
            Token::FloatLiteral(v) => v.to_string(),
            Token::IntLiteral(v) => v.to_string(),
            other => return Err(self.unexpected("version number", &other)),
        };
        if !version.starts_with('2') {
            return Err(ParseError::UnsupportedVersion(version));
        }
        self.expect(&Token::Semicolon)?;

        while self.pos < self.tokens.len() {
            self.statement()?;
        }
        Ok(self.circuit)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statement(&mut self) -> ParseResult<()> {
        match self.advance("statement")? {
            Token::Include => {
                match self.advance("include path")? {
                    Token::StringLiteral(_) => {}
                    other => return Err(self.unexpected("string literal", &other)),
                }
                self.expect(&Token::Semicolon)
            }
            Token::Qreg => self.register_declaration(true),
            Token::Creg => self.register_declaration(false),
            Token::Barrier => self.barrier_statement(),
            Token::Measure => self.measure_statement(),
            Token::Reset => self.reset_statement(),
            Token::Identifier(name) => self.gate_statement(&name),
            other => Err(self.unexpected("statement", &other)),
        }
    }

    fn register_declaration(&mut self, quantum: bool) -> ParseResult<()> {
        let name = self.expect_identifier("register name")?;
        self.expect(&Token::LBracket)?;
        let size = self.expect_int("register size")?;
        self.expect(&Token::RBracket)?;
        self.expect(&Token::Semicolon)?;

        let exists = self.qregs.iter().any(|(n, _)| *n == name)
            || self.cregs.iter().any(|(n, _)| *n == name);
        if exists {
            return Err(ParseError::DuplicateRegister(name));
        }
        let size = u32::try_from(size)
            .map_err(|_| ParseError::Generic(format!("register '{name}' too large")))?;
        if quantum {
            let start = u32::try_from(self.circuit.num_qubits()).expect("qubit count");
            self.circuit.add_qreg(&name, size);
            self.qregs.push((name, Reg { start, size }));
        } else {
            let start = u32::try_from(self.circuit.num_clbits()).expect("clbit count");
            self.circuit.add_creg(&name, size);
            self.cregs.push((name, Reg { start, size }));
        }
        Ok(())
    }

    fn barrier_statement(&mut self) -> ParseResult<()> {
        if self.eat(&Token::Semicolon) {
            self.circuit.barrier_all()?;
            return Ok(());
        }
        let mut qubits = vec![];
        loop {
            match self.qubit_arg()? {
                ArgRef::Single(q) => qubits.push(QubitId(q)),
                ArgRef::Register(reg) => {
                    qubits.extend((reg.start..reg.start + reg.size).map(QubitId));
                }
            }
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::Semicolon)?;
        self.circuit.barrier(qubits)?;
        Ok(())
    }

    fn measure_statement(&mut self) -> ParseResult<()> {
        let qubit = self.qubit_arg()?;
        self.expect(&Token::Arrow)?;
        let clbit = self.clbit_arg()?;
        self.expect(&Token::Semicolon)?;
        match (qubit, clbit) {
            (ArgRef::Single(q), ArgRef::Single(c)) => {
                self.circuit.measure(QubitId(q), ClbitId(c))?;
            }
            (ArgRef::Register(qr), ArgRef::Register(cr)) if qr.size == cr.size => {
                for i in 0..qr.size {
                    self.circuit
                        .measure(QubitId(qr.start + i), ClbitId(cr.start + i))?;
                }
            }
            _ => {
                return Err(ParseError::Generic(
                    "measure operands must both be bits or registers of equal size".into(),
                ));
            }
        }
        Ok(())
    }

    fn reset_statement(&mut self) -> ParseResult<()> {
        let target = self.qubit_arg()?;
        self.expect(&Token::Semicolon)?;
        match target {
            ArgRef::Single(q) => {
                self.circuit.reset(QubitId(q))?;
            }
            ArgRef::Register(reg) => {
                for i in 0..reg.size {
                    self.circuit.reset(QubitId(reg.start + i))?;
                }
            }
        }
        Ok(())
    }

    fn gate_statement(&mut self, name: &str) -> ParseResult<()> {
        if matches!(name, "t_pauli" | "s_pauli" | "z_pauli" | "m_pauli") {
            return self.pauli_statement(name);
        }

        let params = if self.eat(&Token::LParen) {
            let mut params = vec![self.expression()?];
            while self.eat(&Token::Comma) {
                params.push(self.expression()?);
            }
            self.expect(&Token::RParen)?;
            params
        } else {
            vec![]
        };

        let (gate, expected_params) = gate_for(name, &params)?;
        if params.len() != expected_params {
            return Err(ParseError::WrongParameterCount {
                gate: name.to_string(),
                expected: expected_params,
                got: params.len(),
            });
        }

        let mut args = vec![self.qubit_arg()?];
        while self.eat(&Token::Comma) {
            args.push(self.qubit_arg()?);
        }
        self.expect(&Token::Semicolon)?;

        let arity = gate.num_qubits() as usize;
        if arity == 1 && args.len() == 1 {
            // Whole-register broadcast for single-qubit gates.
            match args.remove(0) {
                ArgRef::Single(q) => {
                    self.circuit.add_op(alsvid_ir::Op::gate(gate, [QubitId(q)]))?;
                }
                ArgRef::Register(reg) => {
                    for i in 0..reg.size {
                        self.circuit
                            .add_op(alsvid_ir::Op::gate(gate, [QubitId(reg.start + i)]))?;
                    }
                }
            }
            return Ok(());
        }

        if args.len() != arity {
            return Err(ParseError::WrongQubitCount {
                gate: name.to_string(),
                expected: arity,
                got: args.len(),
            });
        }
        let qubits = args
            .into_iter()
            .map(|arg| match arg {
                ArgRef::Single(q) => Ok(QubitId(q)),
                ArgRef::Register(_) => Err(ParseError::Generic(format!(
                    "gate '{name}' requires indexed qubit arguments"
                ))),
            })
            .collect::<ParseResult<Vec<_>>>()?;
        self.circuit.add_op(alsvid_ir::Op::gate(gate, qubits))?;
        Ok(())
    }

    fn pauli_statement(&mut self, name: &str) -> ParseResult<()> {
        self.expect(&Token::LParen)?;
        let sign = if self.eat(&Token::Minus) {
            "-"
        } else {
            self.eat(&Token::Plus);
            "+"
        };
        let word = self.expect_identifier("Pauli word")?;
        self.expect(&Token::RParen)?;
        let text = format!("{sign}{word}");

        match name {
            "t_pauli" => {
                self.expect(&Token::Semicolon)?;
                self.circuit.t_pauli(&text)?;
            }
            "s_pauli" => {
                self.expect(&Token::Semicolon)?;
                self.circuit.s_pauli(&text)?;
            }
            "z_pauli" => {
                self.expect(&Token::Semicolon)?;
                self.circuit.z_pauli(&text)?;
            }
            "m_pauli" => {
                let clbit = if self.eat(&Token::Arrow) {
                    match self.clbit_arg()? {
                        ArgRef::Single(c) => Some(ClbitId(c)),
                        ArgRef::Register(_) => {
                            return Err(ParseError::Generic(
                                "m_pauli requires an indexed classical bit".into(),
                            ));
                        }
                    }
                } else {
                    None
                };
                self.expect(&Token::Semicolon)?;
                self.circuit.m_pauli(&text, clbit)?;
            }
            _ => unreachable!("checked by caller"),
        }
        Ok(())
    }

    // =========================================================================
    // Operands and expressions
    // =========================================================================

    fn qubit_arg(&mut self) -> ParseResult<ArgRef> {
        let name = self.expect_identifier("qubit register")?;
        let reg = self
            .qregs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
            .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
        self.indexed(name, reg)
    }

    fn clbit_arg(&mut self) -> ParseResult<ArgRef> {
        let name = self.expect_identifier("classical register")?;
        let reg = self
            .cregs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
            .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
        self.indexed(name, reg)
    }

    fn indexed(&mut self, name: String, reg: Reg) -> ParseResult<ArgRef> {
        if !self.eat(&Token::LBracket) {
            return Ok(ArgRef::Register(reg));
        }
        let index = self.expect_int("index")?;
        self.expect(&Token::RBracket)?;
        if index >= u64::from(reg.size) {
            return Err(ParseError::IndexOutOfBounds {
                register: name,
                index: usize::try_from(index).unwrap_or(usize::MAX),
                size: reg.size as usize,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(ArgRef::Single(reg.start + index as u32))
    }

    fn expression(&mut self) -> ParseResult<f64> {
        let mut value = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                value += self.term()?;
            } else if self.eat(&Token::Minus) {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> ParseResult<f64> {
        let mut value = self.factor()?;
        loop {
            if self.eat(&Token::Star) {
                value *= self.factor()?;
            } else if self.eat(&Token::Slash) {
                value /= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn factor(&mut self) -> ParseResult<f64> {
        match self.advance("expression")? {
            Token::Minus => Ok(-self.factor()?),
            Token::Pi => Ok(PI),
            Token::IntLiteral(v) => Ok(v as f64),
            Token::FloatLiteral(v) => Ok(v),
            Token::LParen => {
                let value = self.expression()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            other => Err(self.unexpected("expression", &other)),
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn advance(&mut self, expected: &str) -> ParseResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .map(|t| t.token.clone())
            .ok_or_else(|| ParseError::UnexpectedEof(expected.to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.get(self.pos).map(|t| &t.token) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> ParseResult<()> {
        let found = self.advance(&token.to_string())?;
        if found == *token {
            Ok(())
        } else {
            Err(self.unexpected(&token.to_string(), &found))
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> ParseResult<String> {
        match self.advance(expected)? {
            Token::Identifier(name) => Ok(name),
            other => Err(self.unexpected(expected, &other)),
        }
    }

    fn expect_int(&mut self, expected: &str) -> ParseResult<u64> {
        match self.advance(expected)? {
            Token::IntLiteral(v) => Ok(v),
            other => Err(self.unexpected(expected, &other)),
        }
    }

    fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

fn gate_for(name: &str, params: &[f64]) -> ParseResult<(StandardGate, usize)> {
    let first = params.first().copied().unwrap_or(0.0);
    Ok(match name {
        "id" => (StandardGate::I, 0),
        "x" => (StandardGate::X, 0),
        "y" => (StandardGate::Y, 0),
        "z" => (StandardGate::Z, 0),
        "h" => (StandardGate::H, 0),
        "s" => (StandardGate::S, 0),
        "sdg" => (StandardGate::Sdg, 0),
        "t" => (StandardGate::T, 0),
        "tdg" => (StandardGate::Tdg, 0),
        "sx" => (StandardGate::SX, 0),
        "sxdg" => (StandardGate::SXdg, 0),
        "rx" => (StandardGate::Rx(first), 1),
        "ry" => (StandardGate::Ry(first), 1),
        "rz" => (StandardGate::Rz(first), 1),
        "cx" | "CX" => (StandardGate::CX, 0),
        "cz" => (StandardGate::CZ, 0),
        "swap" => (StandardGate::Swap, 0),
        "ccx" => (StandardGate::CCX, 0),
        _ => return Err(ParseError::UnknownGate(name.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_parse_bell() {
        let circuit = parse(
            r#"OPENQASM 2.0;
include "qelib1.inc";
qreg q[2];
creg c[2];
h q[0];
cx q[0], q[1];
measure q[0] -> c[0];
measure q[1] -> c[1];
"#,
        )
        .unwrap();

        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.num_ops(), 4);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_parse_angle_expressions() {
        let circuit = parse(
            "OPENQASM 2.0;\nqreg q[1];\nrz(pi/4) q[0];\nrz(-pi/2) q[0];\nrz(3*pi/4) q[0];\nrz(0.25) q[0];\n",
        )
        .unwrap();

        let angles: Vec<f64> = circuit
            .ops()
            .iter()
            .map(|op| match op.kind {
                alsvid_ir::OpKind::Gate(StandardGate::Rz(t)) => t,
                _ => panic!("expected rz"),
            })
            .collect();
        assert!((angles[0] - FRAC_PI_4).abs() < 1e-15);
        assert!((angles[1] + PI / 2.0).abs() < 1e-15);
        assert!((angles[2] - 3.0 * FRAC_PI_4).abs() < 1e-15);
        assert!((angles[3] - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_register_broadcast() {
        let circuit = parse(
            "OPENQASM 2.0;\nqreg q[3];\ncreg c[3];\nh q;\nmeasure q -> c;\n",
        )
        .unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts.get("h"), Some(&3));
        assert_eq!(counts.get("measure"), Some(&3));
    }

    #[test]
    fn test_multiple_registers() {
        let circuit = parse(
            "OPENQASM 2.0;\nqreg a[1];\nqreg b[2];\ncx a[0], b[1];\n",
        )
        .unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        // b[1] is global qubit 2.
        assert_eq!(circuit.ops()[0].qubits, vec![QubitId(0), QubitId(2)]);
    }

    #[test]
    fn test_pauli_extension() {
        let circuit = parse(
            "OPENQASM 2.0;\nqreg q[2];\ncreg c[1];\nt_pauli(+ZZ);\ns_pauli(-XI);\nm_pauli(+ZI) -> c[0];\n",
        )
        .unwrap();
        assert!(circuit.is_pbc());
        assert_eq!(circuit.num_ops(), 3);
        assert!(circuit.ops()[1].pauli_word().unwrap().is_negative());
        assert_eq!(circuit.ops()[2].clbits, vec![ClbitId(0)]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse("OPENQASM 3.0;\n"),
            Err(ParseError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            parse("OPENQASM 2.0;\nqreg q[1];\nfoo q[0];\n"),
            Err(ParseError::UnknownGate(_))
        ));
        assert!(matches!(
            parse("OPENQASM 2.0;\nh q[0];\n"),
            Err(ParseError::UndefinedRegister(_))
        ));
        assert!(matches!(
            parse("OPENQASM 2.0;\nqreg q[1];\nh q[4];\n"),
            Err(ParseError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            parse("OPENQASM 2.0;\nqreg q[1];\nqreg q[2];\n"),
            Err(ParseError::DuplicateRegister(_))
        ));
    }

    #[test]
    fn test_barrier_forms() {
        let circuit = parse(
            "OPENQASM 2.0;\nqreg q[2];\nbarrier;\nbarrier q;\nbarrier q[0];\n",
        )
        .unwrap();
        assert_eq!(circuit.count_ops().get("barrier"), Some(&3));
        assert_eq!(circuit.ops()[0].qubits.len(), 2);
        assert_eq!(circuit.ops()[2].qubits.len(), 1);
    }
}
