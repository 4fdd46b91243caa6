pub mod cursor;
pub mod lookahead;
pub mod tokenizer;

mod compiler;

pub use compiler::TagCompiler;
pub use cursor::TokenCursor;
pub use lookahead::MatchPolicy;
pub use tokenizer::{tokenize, Keyword, Token, TokenKind};

use crate::error::ParseError;

/// Parser trait - converts source text to its rendered tag tree
pub trait Parser {
    fn parse(&self, source: &str) -> Result<String, ParseError>;
}

/// C# structure parser
pub struct SharpParser {
    // Configuration only, no state
}

impl SharpParser {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for SharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for SharpParser {
    fn parse(&self, source: &str) -> Result<String, ParseError> {
        // Tokenize
        let tokens = tokenize(source);

        // Drive the productions over the stream
        TagCompiler::new(tokens).compile()
    }
}
