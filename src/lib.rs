//! sharptree dumps the syntactic structure of C# source files as an
//! indented tag tree.
//!
//! The pipeline is lexical analysis followed by recursive-descent
//! structural parsing: the tokenizer turns raw text into a classified
//! token stream, and the parser consumes that stream with bounded
//! multi-token lookahead to decide which production applies at each
//! position, emitting open/close/inline tags as it goes. No semantic
//! analysis, no type checking, no code generation.
//!
//! ```
//! let tree = sharptree::compile("using System;").unwrap();
//! assert!(tree.starts_with("<directive>"));
//! ```

pub mod emit;
pub mod error;
pub mod grammar;
pub mod parser;

pub use error::{CompileError, ErrorKind, ParseError};
pub use parser::{Parser, SharpParser};

/// Compile one parse unit to its tag tree.
///
/// On failure the partial buffer is dropped; the error names the kind
/// (syntax error or unexpected end of stream) and the offending line.
pub fn compile(source: &str) -> Result<String, ParseError> {
    SharpParser::new().parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_using_directive() {
        let tree = compile("using System;").unwrap();
        assert_eq!(
            tree,
            "<directive>\n  <keyword> using </keyword>\n  <identifier> System </identifier>\n  <symbol> ; </symbol>\n</directive>\n"
        );
    }

    #[test]
    fn test_dotted_using_directive() {
        let tree = compile("using System.Collections.Generic;").unwrap();
        assert!(tree.contains("<identifier> System.Collections.Generic </identifier>"));
    }

    #[test]
    fn test_empty_input_is_empty_tree() {
        assert_eq!(compile("").unwrap(), "");
    }

    #[test]
    fn test_unrecognized_top_level_stops_quietly() {
        // A position no production recognizes halts the driver; whatever
        // was compiled so far is the result.
        let tree = compile("using A;\n}").unwrap();
        assert!(tree.ends_with("</directive>\n"));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = compile("using System\nusing Other;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_truncated_class_is_end_of_stream() {
        let err = compile("class Foo {").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfStream);
    }
}
