use std::fmt;

/// Kind of parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedEndOfStream,
    SyntaxError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnexpectedEndOfStream => "Unexpected end of token stream",
            ErrorKind::SyntaxError => "Syntax error",
        }
    }
}

/// Error during parsing. Both kinds are fatal to the current file;
/// there is no recovery point inside a parse.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// 1-based source line of the token being examined, 0 when the
    /// stream was already exhausted.
    pub line: usize,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }

    /// Shorthand for a stream-exhaustion error (no line to point at).
    pub fn end_of_stream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedEndOfStream, message, 0)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "{} at line {}: {}", self.kind.as_str(), self.line, self.message)
        } else {
            write!(f, "{}: {}", self.kind.as_str(), self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Error at the per-file driver boundary (reading or parsing).
/// A failing file never affects any other file being processed.
#[derive(Debug)]
pub enum CompileError {
    Io(std::io::Error),
    Parse(ParseError),
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<std::io::Error> for CompileError {
    fn from(err: std::io::Error) -> Self {
        CompileError::Io(err)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io(err) => write!(f, "I/O error: {}", err),
            CompileError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CompileError {}
