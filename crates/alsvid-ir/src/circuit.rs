//! Circuit container and builder API.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::op::{Op, OpKind, PauliKind};
use crate::pauli::PauliWord;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit: qubit and classical registers plus an ordered
/// sequence of operations in program order (earliest first).
///
/// A circuit holds either gate-form operations (a standard circuit) or
/// Pauli-form operations (a Pauli-based circuit, PBC); the builder surface
/// rejects mixing the two. Passes rebuild the sequence through
/// [`Circuit::replace_ops`] rather than mutating operations in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Operations in program order.
    ops: Vec<Op>,
    /// Cached count of gate-form ops (mixing check).
    gate_form_ops: usize,
    /// Cached count of Pauli-form ops (mixing check).
    pauli_form_ops: usize,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            ops: vec![],
            gate_form_ops: 0,
            pauli_form_ops: 0,
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(u32::try_from(self.qubits.len()).expect("qubit count exceeds u32"));
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(u32::try_from(self.qubits.len()).expect("qubit count exceeds u32"));
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(u32::try_from(self.clbits.len()).expect("clbit count exceeds u32"));
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = ClbitId(u32::try_from(self.clbits.len()).expect("clbit count exceeds u32"));
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    // =========================================================================
    // Op sequence contract
    // =========================================================================

    /// Append an operation, validating operand ranges and the gate/Pauli
    /// mixing invariant.
    pub fn add_op(&mut self, op: Op) -> IrResult<()> {
        self.validate_op(&op)?;
        if op.is_pauli() && self.gate_form_ops > 0 {
            return Err(IrError::MixedOpFamilies);
        }
        if op.is_gate_form() && self.pauli_form_ops > 0 {
            return Err(IrError::MixedOpFamilies);
        }
        self.track(&op, 1);
        self.ops.push(op);
        Ok(())
    }

    /// The operation sequence in program order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Atomically replace the operation sequence. Qubit and classical bit
    /// counts are unchanged; operand ranges are validated.
    ///
    /// Unlike [`Circuit::add_op`] this does not enforce the mixing
    /// invariant: passes may legitimately produce a PBC that retains CX
    /// gates (`keep_cx`).
    pub fn replace_ops(&mut self, new_ops: Vec<Op>) -> IrResult<()> {
        for op in &new_ops {
            self.validate_op(op)?;
        }
        self.gate_form_ops = new_ops.iter().filter(|op| op.is_gate_form()).count();
        self.pauli_form_ops = new_ops.iter().filter(|op| op.is_pauli()).count();
        self.ops = new_ops;
        Ok(())
    }

    fn validate_op(&self, op: &Op) -> IrResult<()> {
        for (i, &q) in op.qubits.iter().enumerate() {
            if q.index() >= self.qubits.len() {
                return Err(IrError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.qubits.len(),
                    op: op.name(),
                });
            }
            if !op.is_barrier() && op.qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    op: op.name(),
                });
            }
        }
        for &c in &op.clbits {
            if c.index() >= self.clbits.len() {
                return Err(IrError::ClbitOutOfRange {
                    clbit: c,
                    num_clbits: self.clbits.len(),
                    op: op.name(),
                });
            }
        }
        if let Some(word) = op.pauli_word() {
            if word.len() != self.qubits.len() {
                return Err(IrError::PauliLengthMismatch {
                    len: word.len(),
                    num_qubits: self.qubits.len(),
                });
            }
        }
        Ok(())
    }

    fn track(&mut self, op: &Op, delta: isize) {
        let bump = |count: &mut usize| {
            *count = count.checked_add_signed(delta).expect("op family underflow");
        };
        if op.is_gate_form() {
            bump(&mut self.gate_form_ops);
        } else if op.is_pauli() {
            bump(&mut self.pauli_form_ops);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Count operations per kind name.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.ops {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth: length of the longest chain of operations ordered by
    /// shared-qubit dependencies.
    ///
    /// Pauli-form operations touch every non-identity slot of their word.
    /// Barriers synchronize their qubits but contribute no depth of their
    /// own.
    pub fn depth(&self) -> usize {
        let mut frontier = vec![0usize; self.qubits.len()];
        let mut max = 0;
        for op in &self.ops {
            let touched: Vec<usize> = match &op.kind {
                OpKind::Pauli { word, .. } => word.support().collect(),
                _ => op.qubits.iter().map(|q| q.index()).collect(),
            };
            let Some(base) = touched.iter().map(|&q| frontier[q]).max() else {
                continue;
            };
            let level = if op.is_barrier() { base } else { base + 1 };
            for &q in &touched {
                frontier[q] = level;
            }
            max = max.max(level);
        }
        max
    }

    /// Whether every operation is in the Clifford+T set
    /// (plus measure/reset/barrier).
    pub fn is_clifford_t(&self) -> bool {
        self.ops.iter().all(|op| match &op.kind {
            OpKind::Gate(g) => g.is_clifford_t(),
            OpKind::Measure { .. } | OpKind::Reset | OpKind::Barrier => true,
            OpKind::Pauli { .. } => false,
        })
    }

    /// Whether every operation is Pauli-form (barriers allowed).
    pub fn is_pbc(&self) -> bool {
        self.ops.iter().all(|op| op.is_pauli() || op.is_barrier())
    }

    /// The T-count: `t` and `tdg` gates plus `t_pauli` rotations.
    pub fn t_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| match &op.kind {
                OpKind::Gate(g) => matches!(g, StandardGate::T | StandardGate::Tdg),
                OpKind::Pauli { kind, .. } => *kind == PauliKind::TRot,
                _ => false,
            })
            .count()
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Write the terminal statistics block.
    pub fn print_stats(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "=== Circuit Statistics ===")?;
        writeln!(w, "Qubits:      {}", self.num_qubits())?;
        writeln!(w, "Clbits:      {}", self.num_clbits())?;
        writeln!(w, "Operations:  {}", self.num_ops())?;
        writeln!(w, "Depth:       {}", self.depth())?;
        writeln!(w, "T-count:     {}", self.t_count())?;
        writeln!(w, "Op counts:")?;
        for (name, count) in self.count_ops() {
            writeln!(w, "  {name}: {count}")?;
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn push_gate(&mut self, gate: StandardGate, qubits: Vec<QubitId>) -> IrResult<&mut Self> {
        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate: gate.name(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        self.add_op(Op::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::H, vec![qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::X, vec![qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Y, vec![qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Z, vec![qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::S, vec![qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Sdg, vec![qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::T, vec![qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Tdg, vec![qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::SX, vec![qubit])
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::SXdg, vec![qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Rx(theta), vec![qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Ry(theta), vec![qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Rz(theta), vec![qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CX, vec![control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CZ, vec![q1, q2])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Swap, vec![q1, q2])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CCX, vec![c1, c2, target])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.add_op(Op::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits, growing the
    /// classical register if needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }
        for i in 0..self.qubits.len() {
            let q = self.qubits[i].id;
            let c = self.clbits[i].id;
            self.add_op(Op::measure(q, c))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_op(Op::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.add_op(Op::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.add_op(Op::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Pauli-form operations (PBC surface)
    // =========================================================================

    fn parse_word(&self, pauli: &str) -> IrResult<PauliWord> {
        let word = PauliWord::parse(pauli)?;
        if word.len() != self.qubits.len() {
            return Err(IrError::PauliLengthMismatch {
                len: word.len(),
                num_qubits: self.qubits.len(),
            });
        }
        Ok(word)
    }

    /// Apply a rotation by π/4 about the given Pauli string (e.g. `+XIZ`).
    pub fn t_pauli(&mut self, pauli: &str) -> IrResult<&mut Self> {
        let word = self.parse_word(pauli)?;
        self.add_op(Op::pauli_rot(PauliKind::TRot, word))?;
        Ok(self)
    }

    /// Apply a rotation by π/2 about the given Pauli string.
    pub fn s_pauli(&mut self, pauli: &str) -> IrResult<&mut Self> {
        let word = self.parse_word(pauli)?;
        self.add_op(Op::pauli_rot(PauliKind::SRot, word))?;
        Ok(self)
    }

    /// Apply a rotation by π about the given Pauli string.
    pub fn z_pauli(&mut self, pauli: &str) -> IrResult<&mut Self> {
        let word = self.parse_word(pauli)?;
        self.add_op(Op::pauli_rot(PauliKind::ZRot, word))?;
        Ok(self)
    }

    /// Measure the given multi-qubit Pauli string projectively.
    pub fn m_pauli(&mut self, pauli: &str, clbit: Option<ClbitId>) -> IrResult<&mut Self> {
        let word = self.parse_word(pauli)?;
        self.add_op(Op::pauli_measure(word, clbit))?;
        Ok(self)
    }
}
