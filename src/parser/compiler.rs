//! Recursive-descent productions over the token cursor.
//!
//! One routine per grammar construct. Each production first decides
//! applicability with zero-consumption lookahead (`Ok(false)` means "not
//! mine, nothing consumed"), then consumes tokens left to right, emitting
//! one leaf tag per terminal and recursing for nested constructs. A
//! required terminal that does not match is fatal for the whole file;
//! there is no resynchronization. Parser state is the call stack itself.

use crate::emit::TagWriter;
use crate::error::{ErrorKind, ParseError};
use crate::grammar;
use crate::parser::cursor::TokenCursor;
use crate::parser::lookahead::MatchPolicy;
use crate::parser::tokenizer::{Keyword, Token, TokenKind};

/// Compiles a token stream into tag text by driving the productions.
pub struct TagCompiler {
    cursor: TokenCursor,
}

impl TagCompiler {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    /// Run the top-level dispatch until input is exhausted or no
    /// production recognizes the current position.
    pub fn compile(mut self) -> Result<String, ParseError> {
        let mut out = TagWriter::new();

        while self.cursor.has_more_tokens() {
            self.cursor.advance()?;
            if !self.dispatch(&mut out, 0)? {
                break;
            }
        }

        Ok(out.finish())
    }

    /// Offer the current position to each production in priority order.
    /// Order is significant: earlier productions shadow later ones when
    /// both could structurally match.
    fn dispatch(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        Ok(self.using_directive(out, depth)?
            || self.namespace_declaration(out, depth)?
            || self.class_declaration(out, depth)?
            || self.class_constructor(out, depth)?
            || self.class_field_declaration(out, depth)?
            || self.function_declaration(out, depth)?
            || self.local_variable_declaration(out, depth)?
            || self.function_call(out, depth)?)
    }

    /// `using <qualified-name> ;`
    fn using_directive(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        if self.cursor.current().keyword() != Some(Keyword::Using) {
            return Ok(false);
        }

        out.open_tag("directive", depth, false);
        self.emit_current(out, depth + 1);
        self.cursor.advance()?;
        self.require_identifier(out, depth + 1)?;
        self.cursor.advance()?;
        self.require_symbol(out, ';', depth + 1)?;
        out.close_tag("directive", depth);

        Ok(true)
    }

    /// `namespace <qualified-name> { ... }`
    fn namespace_declaration(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        if self.cursor.current().keyword() != Some(Keyword::Namespace) {
            return Ok(false);
        }

        out.open_tag("namespace", depth, false);
        self.emit_current(out, depth + 1);
        self.cursor.advance()?;
        self.require_identifier(out, depth + 1)?;
        self.cursor.advance()?;
        if !self.statement_sequence(out, depth + 1)? {
            return Err(self.syntax_error("expected '{' to open namespace body"));
        }
        out.close_tag("namespace", depth);

        Ok(true)
    }

    /// `[modifiers] class <name> [: <base>] { ... }`
    fn class_declaration(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        // The `class` keyword sits somewhere behind the leading modifiers;
        // with no modifiers at all it is the current token itself.
        let window = self.modifier_window(grammar::is_class_declaration_modifier);
        let applies = self.cursor.current().keyword() == Some(Keyword::Class)
            || (self.cursor.keyword_look_ahead(window, MatchPolicy::Any, &[Keyword::Class])
                && self
                    .cursor
                    .kind_look_ahead(window + 1, MatchPolicy::Any, &[TokenKind::Identifier]));
        if !applies {
            return Ok(false);
        }

        out.open_tag("class", depth, false);

        // Class declarations mix access and class modifiers ("partial static
        // public", "static internal", ...). Legal combinations are not
        // checked; modifiers are emitted in the order written.
        while self
            .cursor
            .current()
            .keyword()
            .is_some_and(|kw| grammar::is_access_modifier(kw) || grammar::is_class_modifier(kw))
        {
            self.emit_current(out, depth + 1);
            self.cursor.advance()?;
        }

        self.require_keyword(out, Keyword::Class, depth + 1)?;
        self.cursor.advance()?;
        self.require_identifier(out, depth + 1)?;
        self.cursor.advance()?;

        // Optional derived type.
        if self.cursor.current().symbol() == Some(':') {
            self.emit_current(out, depth + 1);
            self.cursor.advance()?;
            self.require_identifier(out, depth + 1)?;
            self.cursor.advance()?;
        }

        if !self.statement_sequence(out, depth + 1)? {
            return Err(self.syntax_error("expected '{' to open class body"));
        }
        out.close_tag("class", depth);

        Ok(true)
    }

    /// `[modifier] <name> ( params ) [: base|this ( params )] { ... }`
    fn class_constructor(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        let window = self.modifier_window(grammar::is_declaration_modifier);
        let applies = (self.cursor.current().kind() == TokenKind::Identifier
            || self
                .cursor
                .kind_look_ahead(window, MatchPolicy::Any, &[TokenKind::Identifier]))
            && self.cursor.symbol_look_ahead(window + 1, MatchPolicy::Any, &['(']);
        if !applies {
            return Ok(false);
        }

        out.open_tag("constructor", depth, false);

        // A constructor takes at most one access modifier.
        if self
            .cursor
            .current()
            .keyword()
            .is_some_and(grammar::is_access_modifier)
        {
            self.emit_current(out, depth + 1);
            self.cursor.advance()?;
        }

        self.require_identifier(out, depth + 1)?;
        self.cursor.advance()?;
        if !self.parameter_list(out, depth + 1)? {
            return Err(self.syntax_error("expected '(' after constructor name"));
        }
        self.cursor.advance()?;

        // Optional chained constructor: `: base(...)` or `: this(...)`.
        if self.cursor.current().symbol() == Some(':') {
            self.emit_current(out, depth + 1);
            self.cursor.advance()?;
            match self.cursor.current().keyword() {
                Some(Keyword::Base) | Some(Keyword::This) => self.emit_current(out, depth + 1),
                _ => return Err(self.syntax_error("expected 'base' or 'this' after ':'")),
            }
            self.cursor.advance()?;
            if !self.parameter_list(out, depth + 1)? {
                return Err(self.syntax_error("expected '(' in chained constructor call"));
            }
            self.cursor.advance()?;
        }

        if !self.statement_sequence(out, depth + 1)? {
            return Err(self.syntax_error("expected '{' to open constructor body"));
        }
        out.close_tag("constructor", depth);

        Ok(true)
    }

    /// `[modifiers] <type> <name> [= ...] ;` at class scope.
    fn class_field_declaration(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        // Class fields cannot be declared with `var`.
        if self.cursor.current().keyword() == Some(Keyword::Var) {
            return Ok(false);
        }

        // Window + 1 skips over the field type, window + 2 reaches the
        // symbol that must follow the field name.
        let window = self.modifier_window(grammar::is_declaration_modifier);
        let applies = self
            .cursor
            .kind_look_ahead(window + 1, MatchPolicy::Any, &[TokenKind::Identifier])
            && self
                .cursor
                .symbol_look_ahead(window + 2, MatchPolicy::Any, &['=', ';']);
        if !applies {
            return Ok(false);
        }

        out.open_tag("variable", depth, false);
        self.general_statement(out, depth + 1, &[';'])?;
        self.cursor.advance()?;
        self.require_symbol(out, ';', depth + 1)?;
        out.close_tag("variable", depth);

        Ok(true)
    }

    /// `[modifiers] <return-type> <name> ( params ) { ... }`
    fn function_declaration(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        let window = self.modifier_window(grammar::is_declaration_modifier);
        let applies = (self
            .cursor
            .keyword_look_ahead(window, MatchPolicy::Any, &[Keyword::Void])
            || self
                .cursor
                .kind_look_ahead(window + 1, MatchPolicy::Any, &[TokenKind::Identifier]))
            && self.cursor.symbol_look_ahead(window + 2, MatchPolicy::Any, &['(']);
        if !applies {
            return Ok(false);
        }

        out.open_tag("function", depth, false);

        // Function declarations mix access and member modifiers ("public
        // override", "static private", ...); emitted in the order written.
        while self
            .cursor
            .current()
            .keyword()
            .is_some_and(grammar::is_declaration_modifier)
        {
            self.emit_current(out, depth + 1);
            self.cursor.advance()?;
        }

        // Return type after the modifiers: void, a built-in type, or a
        // type identifier.
        let is_return_type = match self.cursor.current() {
            Token::Keyword(kw, _) => *kw == Keyword::Void || grammar::is_built_in_type(*kw),
            Token::Identifier(..) => true,
            _ => false,
        };
        if !is_return_type {
            return Err(self.syntax_error("expected return type"));
        }
        self.emit_current(out, depth + 1);
        self.cursor.advance()?;

        self.require_identifier(out, depth + 1)?;
        self.cursor.advance()?;
        if !self.parameter_list(out, depth + 1)? {
            return Err(self.syntax_error("expected '(' after function name"));
        }
        self.cursor.advance()?;
        if !self.statement_sequence(out, depth + 1)? {
            return Err(self.syntax_error("expected '{' to open function body"));
        }
        out.close_tag("function", depth);

        Ok(true)
    }

    /// `<type-or-var-or-const> ... ;` or `<name> = ... ;` inside a body.
    fn local_variable_declaration(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        let applies = match self.cursor.current() {
            Token::Identifier(..) => self.cursor.symbol_look_ahead(1, MatchPolicy::Any, &['=']),
            Token::Keyword(kw, _) => {
                *kw == Keyword::Const || *kw == Keyword::Var || grammar::is_built_in_type(*kw)
            }
            _ => false,
        };
        if !applies {
            return Ok(false);
        }

        out.open_tag("variable", depth, false);
        self.general_statement(out, depth + 1, &[';'])?;
        self.cursor.advance()?;
        self.require_symbol(out, ';', depth + 1)?;
        out.close_tag("variable", depth);

        Ok(true)
    }

    /// `<qualified-name> ( ... ) ;` with the argument list consumed by the
    /// general-statement helper, not an expression grammar.
    fn function_call(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        if self.cursor.current().kind() != TokenKind::Identifier {
            return Ok(false);
        }

        out.open_tag("functionCall", depth, false);
        self.require_identifier(out, depth + 1)?;
        if self.cursor.look_ahead_symbol(0) != Some(';') {
            self.cursor.advance()?;
            self.general_statement(out, depth + 1, &[';'])?;
        }
        self.cursor.advance()?;
        self.require_symbol(out, ';', depth + 1)?;
        out.close_tag("functionCall", depth);

        Ok(true)
    }

    /// Any `{ ... }` block: re-dispatches the top-level productions until
    /// none matches, then requires the closing brace.
    fn statement_sequence(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        if self.cursor.current().symbol() != Some('{') {
            return Ok(false);
        }

        out.open_tag("statementSequence", depth, false);
        self.emit_current(out, depth + 1);
        loop {
            self.cursor.advance()?;
            if !self.dispatch(out, depth + 1)? {
                break;
            }
        }
        self.require_symbol(out, '}', depth + 1)?;
        out.close_tag("statementSequence", depth);

        Ok(true)
    }

    /// `( [param [, param]*] )` where each parameter body is consumed by
    /// the general-statement helper up to `,` or `)`.
    fn parameter_list(&mut self, out: &mut TagWriter, depth: usize) -> Result<bool, ParseError> {
        if self.cursor.current().symbol() != Some('(') {
            return Ok(false);
        }

        out.open_tag("parameters", depth, false);
        self.require_symbol(out, '(', depth + 1)?;

        // A symbol right behind `(` means an empty parameter list.
        if self.cursor.look_ahead_kind(0) != Some(TokenKind::Symbol) {
            self.cursor.advance()?;
            loop {
                out.open_tag("parameter", depth + 1, false);
                self.general_statement(out, depth + 2, &[',', ')'])?;
                out.close_tag("parameter", depth + 1);

                if self.cursor.look_ahead_symbol(0) == Some(')') {
                    break;
                }
                // Move onto the separating comma, then onto the next
                // parameter.
                self.cursor.advance()?;
                self.require_symbol(out, ',', depth + 1)?;
                self.cursor.advance()?;
            }
        }

        self.cursor.advance()?;
        self.require_symbol(out, ')', depth + 1)?;
        out.close_tag("parameters", depth);

        Ok(true)
    }

    /// Consume tokens verbatim, re-dispatching by token kind, until the
    /// next pending token is one of the terminator symbols. The terminator
    /// itself is left pending for the caller.
    fn general_statement(
        &mut self,
        out: &mut TagWriter,
        depth: usize,
        terminators: &[char],
    ) -> Result<(), ParseError> {
        loop {
            if self.cursor.current().kind() == TokenKind::Identifier {
                self.require_identifier(out, depth)?;
            } else {
                self.emit_current(out, depth);
            }

            if let Some(next) = self.cursor.look_ahead_symbol(0) {
                if terminators.contains(&next) {
                    return Ok(());
                }
            }
            self.cursor.advance()?;
        }
    }

    /// Emit the current identifier, absorbing dotted qualification
    /// (`a.b.c`) into one logical identifier token.
    fn require_identifier(&mut self, out: &mut TagWriter, depth: usize) -> Result<(), ParseError> {
        let mut name = match self.cursor.current() {
            Token::Identifier(text, _) => text.clone(),
            _ => return Err(self.syntax_error("expected identifier")),
        };

        while self.cursor.look_ahead_symbol(0) == Some('.') {
            self.cursor.advance()?;
            name.push('.');
            if self.cursor.look_ahead_kind(0) == Some(TokenKind::Identifier) {
                self.cursor.advance()?;
                if let Token::Identifier(text, _) = self.cursor.current() {
                    name.push_str(text);
                }
            } else {
                break;
            }
        }

        out.inline_tag("identifier", &name, depth);
        Ok(())
    }

    /// The current token must be the expected symbol; emit it inline.
    fn require_symbol(&self, out: &mut TagWriter, expected: char, depth: usize) -> Result<(), ParseError> {
        if self.cursor.current().symbol() == Some(expected) {
            self.emit_current(out, depth);
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected '{}'", expected)))
        }
    }

    /// The current token must be the expected keyword; emit it inline.
    fn require_keyword(&self, out: &mut TagWriter, expected: Keyword, depth: usize) -> Result<(), ParseError> {
        if self.cursor.current().keyword() == Some(expected) {
            self.emit_current(out, depth);
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected '{}'", expected.as_str())))
        }
    }

    /// Emit the current token as an inline leaf tag named after its kind.
    /// String values lose their quotes here, and only here.
    fn emit_current(&self, out: &mut TagWriter, depth: usize) {
        let token = self.cursor.current();
        let value = match token {
            Token::Str(text, _) => text.replace('"', ""),
            other => other.text(),
        };
        out.inline_tag(token.kind().tag_name(), &value, depth);
    }

    /// Size of the lookahead window for a declaration starting at the
    /// current position: the current token plus every pending token whose
    /// keyword satisfies `pred`, scanning up to the first pending
    /// identifier.
    fn modifier_window(&self, pred: fn(Keyword) -> bool) -> usize {
        let mut count = 0;
        if self.cursor.current().keyword().is_some_and(pred) {
            count += 1;
        }

        let mut offset = 0;
        while let Some(token) = self.cursor.look_ahead(offset) {
            if token.keyword().is_some_and(pred) {
                count += 1;
            } else if token.kind() == TokenKind::Identifier {
                break;
            }
            offset += 1;
        }

        count
    }

    fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(ErrorKind::SyntaxError, message, self.cursor.current().line())
    }
}
