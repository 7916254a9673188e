//! Lexer for the `OpenQASM` 2 subset.

use logos::Logos;

/// Tokens for `OpenQASM` 2.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("OPENQASM")]
    OpenQasm,

    #[token("include")]
    Include,

    #[token("qreg")]
    Qreg,

    #[token("creg")]
    Creg,

    #[token("measure")]
    Measure,

    #[token("reset")]
    Reset,

    #[token("barrier")]
    Barrier,

    // Constants
    #[token("pi")]
    Pi,

    // Literals
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    FloatLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        Some(s[1..s.len()-1].to_string())
    })]
    StringLiteral(String),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Operators and punctuation
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("->")]
    Arrow,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::OpenQasm => write!(f, "OPENQASM"),
            Token::Include => write!(f, "include"),
            Token::Qreg => write!(f, "qreg"),
            Token::Creg => write!(f, "creg"),
            Token::Measure => write!(f, "measure"),
            Token::Reset => write!(f, "reset"),
            Token::Barrier => write!(f, "barrier"),
            Token::Pi => write!(f, "pi"),
            Token::FloatLiteral(v) => write!(f, "{v}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::StringLiteral(s) => write!(f, "\"{s}\""),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Arrow => write!(f, "->"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// A token with its source position.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a QASM source string.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, (std::ops::Range<usize>, String)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(SpannedToken { token, span }),
            Err(()) => {
                let slice = &source[span.clone()];
                return Err((span, format!("Invalid token: '{slice}'")));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let tokens = tokenize("OPENQASM 2.0;").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].token, Token::OpenQasm);
        assert!(matches!(tokens[1].token, Token::FloatLiteral(v) if (v - 2.0).abs() < 0.001));
        assert_eq!(tokens[2].token, Token::Semicolon);
    }

    #[test]
    fn test_register_declaration() {
        let tokens = tokenize("qreg q[2];").unwrap();
        assert_eq!(tokens[0].token, Token::Qreg);
        assert!(matches!(tokens[1].token, Token::Identifier(ref s) if s == "q"));
        assert_eq!(tokens[2].token, Token::LBracket);
        assert!(matches!(tokens[3].token, Token::IntLiteral(2)));
    }

    #[test]
    fn test_parameterized_gate() {
        let tokens = tokenize("rz(pi/4) q[0];").unwrap();
        assert!(matches!(tokens[0].token, Token::Identifier(ref s) if s == "rz"));
        assert_eq!(tokens[1].token, Token::LParen);
        assert_eq!(tokens[2].token, Token::Pi);
        assert_eq!(tokens[3].token, Token::Slash);
    }

    #[test]
    fn test_measure_arrow() {
        let tokens = tokenize("measure q[0] -> c[0];").unwrap();
        assert_eq!(tokens[0].token, Token::Measure);
        assert!(tokens.iter().any(|t| t.token == Token::Arrow));
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = tokenize("// line\nqreg q[1]; /* block */ creg c[1];").unwrap();
        assert_eq!(tokens[0].token, Token::Qreg);
        assert!(tokens.iter().any(|t| t.token == Token::Creg));
    }

    #[test]
    fn test_invalid_token() {
        assert!(tokenize("qreg q[1]; %").is_err());
    }
}
