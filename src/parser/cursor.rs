//! Read cursor over the token stream.
//!
//! The stream is an owned sequence consumed strictly front to back: once a
//! token has been advanced past it is never revisited. All disambiguation
//! happens through the non-consuming lookahead accessors before a
//! production commits to consuming anything.

use crate::error::ParseError;
use crate::parser::tokenizer::{Keyword, Token, TokenKind};

/// Cursor over an owned token vector.
///
/// `advance` promotes the next pending token to the current one; lookahead
/// offset 0 names the next pending token (the one `advance` would move
/// to). Lookahead past the end of the stream answers `None` instead of
/// failing, so callers can probe without bounds-checking first.
pub struct TokenCursor {
    tokens: Vec<Token>,
    /// Number of tokens consumed so far; the current token, once `advance`
    /// has succeeded at least once, is `tokens[pos - 1]`.
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Any pending tokens left to advance to?
    pub fn has_more_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Discard the current token and promote the next pending one.
    pub fn advance(&mut self) -> Result<(), ParseError> {
        if self.has_more_tokens() {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseError::end_of_stream("a production required another token"))
        }
    }

    /// The active token. Only meaningful after `advance` has succeeded at
    /// least once, which the parse driver guarantees before dispatching.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    /// Is there a pending token `offset` positions ahead?
    pub fn has_token_at(&self, offset: usize) -> bool {
        self.pos + offset < self.tokens.len()
    }

    /// Peek at a pending token without consuming it.
    pub fn look_ahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    pub fn look_ahead_kind(&self, offset: usize) -> Option<TokenKind> {
        self.look_ahead(offset).map(|t| t.kind())
    }

    /// `None` both past the end of the stream and for non-keyword tokens.
    pub fn look_ahead_keyword(&self, offset: usize) -> Option<Keyword> {
        self.look_ahead(offset).and_then(|t| t.keyword())
    }

    /// `None` both past the end of the stream and for non-symbol tokens.
    pub fn look_ahead_symbol(&self, offset: usize) -> Option<char> {
        self.look_ahead(offset).and_then(|t| t.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::tokenizer::tokenize;

    #[test]
    fn test_advance_and_current() {
        let mut cursor = TokenCursor::new(tokenize("using System;"));
        assert!(cursor.has_more_tokens());
        cursor.advance().unwrap();
        assert_eq!(cursor.current().keyword(), Some(Keyword::Using));
        cursor.advance().unwrap();
        assert_eq!(cursor.current().text(), "System");
    }

    #[test]
    fn test_advance_past_end_fails() {
        let mut cursor = TokenCursor::new(tokenize(";"));
        cursor.advance().unwrap();
        let err = cursor.advance().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfStream);
    }

    #[test]
    fn test_lookahead_does_not_consume() {
        let mut cursor = TokenCursor::new(tokenize("int x;"));
        cursor.advance().unwrap();
        assert_eq!(cursor.look_ahead_kind(0), Some(TokenKind::Identifier));
        assert_eq!(cursor.look_ahead_symbol(1), Some(';'));
        // Repeated probes answer the same thing and current is untouched.
        assert_eq!(cursor.look_ahead_kind(0), Some(TokenKind::Identifier));
        assert_eq!(cursor.current().keyword(), Some(Keyword::Int));
    }

    #[test]
    fn test_lookahead_past_end_is_none() {
        let mut cursor = TokenCursor::new(tokenize("x"));
        cursor.advance().unwrap();
        assert!(!cursor.has_token_at(0));
        assert_eq!(cursor.look_ahead_kind(0), None);
        assert_eq!(cursor.look_ahead_keyword(5), None);
        assert_eq!(cursor.look_ahead_symbol(9), None);
    }
}
