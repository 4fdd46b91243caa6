//! Bounded lookahead scans used to pick a production.
//!
//! Several productions share an identical prefix of modifier keywords
//! followed by an identifier, so the parser cannot choose one by looking
//! at the current token alone. It counts the leading modifiers to size a
//! window, then scans that window for a distinguishing marker (`class`,
//! `(`, `=`, `;`, ...) with the operations here. No backtracking: the
//! choice is settled before anything is consumed.

use crate::parser::cursor::TokenCursor;
use crate::parser::tokenizer::{Keyword, Token, TokenKind};

/// How a multi-target scan combines its per-target answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// True as soon as any target matches at any scanned offset.
    Any,
    /// True only when every target matches at some scanned offset
    /// (offsets need not be distinct).
    All,
}

impl TokenCursor {
    /// Scan offsets `0..window` for a token satisfying `probe`, stopping
    /// early when the stream runs out.
    fn scan(&self, window: usize, probe: impl Fn(&Token) -> bool) -> bool {
        for offset in 0..window {
            match self.look_ahead(offset) {
                Some(token) => {
                    if probe(token) {
                        return true;
                    }
                }
                None => return false,
            }
        }
        false
    }

    /// Look for token kinds within the window.
    pub fn kind_look_ahead(&self, window: usize, policy: MatchPolicy, targets: &[TokenKind]) -> bool {
        match policy {
            MatchPolicy::Any => targets.iter().any(|t| self.scan(window, |tok| tok.kind() == *t)),
            MatchPolicy::All => targets.iter().all(|t| self.scan(window, |tok| tok.kind() == *t)),
        }
    }

    /// Look for keyword values within the window.
    pub fn keyword_look_ahead(&self, window: usize, policy: MatchPolicy, targets: &[Keyword]) -> bool {
        match policy {
            MatchPolicy::Any => targets
                .iter()
                .any(|t| self.scan(window, |tok| tok.keyword() == Some(*t))),
            MatchPolicy::All => targets
                .iter()
                .all(|t| self.scan(window, |tok| tok.keyword() == Some(*t))),
        }
    }

    /// Look for symbol characters within the window. Non-symbol tokens at
    /// a scanned offset are skipped, not counted as mismatches.
    pub fn symbol_look_ahead(&self, window: usize, policy: MatchPolicy, targets: &[char]) -> bool {
        match policy {
            MatchPolicy::Any => targets
                .iter()
                .any(|t| self.scan(window, |tok| tok.symbol() == Some(*t))),
            MatchPolicy::All => targets
                .iter()
                .all(|t| self.scan(window, |tok| tok.symbol() == Some(*t))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::tokenize;

    fn cursor_at_start(source: &str) -> TokenCursor {
        let mut cursor = TokenCursor::new(tokenize(source));
        cursor.advance().unwrap();
        cursor
    }

    #[test]
    fn test_any_finds_marker_inside_window() {
        // current = "public"; pending = class Foo { }
        let cursor = cursor_at_start("public class Foo { }");
        assert!(cursor.keyword_look_ahead(1, MatchPolicy::Any, &[Keyword::Class]));
        assert!(!cursor.keyword_look_ahead(1, MatchPolicy::Any, &[Keyword::Namespace]));
    }

    #[test]
    fn test_window_bounds_are_respected() {
        let cursor = cursor_at_start("public static int count = 5;");
        // '=' sits at pending offset 3; a window of 3 must not see it.
        assert!(!cursor.symbol_look_ahead(3, MatchPolicy::Any, &['=']));
        assert!(cursor.symbol_look_ahead(4, MatchPolicy::Any, &['=']));
    }

    #[test]
    fn test_all_requires_every_target() {
        let cursor = cursor_at_start("int count = 5;");
        assert!(cursor.kind_look_ahead(
            4,
            MatchPolicy::All,
            &[TokenKind::Identifier, TokenKind::Number]
        ));
        assert!(!cursor.kind_look_ahead(
            4,
            MatchPolicy::All,
            &[TokenKind::Identifier, TokenKind::String]
        ));
    }

    #[test]
    fn test_symbol_scan_skips_non_symbols() {
        let cursor = cursor_at_start("int count = 5;");
        // Identifier and number tokens inside the window are skipped.
        assert!(cursor.symbol_look_ahead(4, MatchPolicy::Any, &['=', ';']));
    }

    #[test]
    fn test_scan_stops_at_stream_end() {
        let cursor = cursor_at_start("int");
        assert!(!cursor.kind_look_ahead(10, MatchPolicy::Any, &[TokenKind::Identifier]));
    }

    #[test]
    fn test_lookahead_is_deterministic() {
        let cursor = cursor_at_start("public class Foo { }");
        let first = cursor.keyword_look_ahead(2, MatchPolicy::Any, &[Keyword::Class]);
        for _ in 0..10 {
            assert_eq!(
                cursor.keyword_look_ahead(2, MatchPolicy::Any, &[Keyword::Class]),
                first
            );
        }
    }
}
