//! Output buffer that accumulates the indented tag tree.
//!
//! The emitter performs no structural validation: open/close balance is
//! guaranteed by the parser pairing every `open_tag` with a `close_tag`
//! at the same depth.

/// Two spaces per nesting level.
const INDENT: &str = "  ";

/// Escape a raw literal value for emission.
///
/// Symbols are single characters, so the whole value is matched; applied
/// to already-escaped text (`"&lt;"`) this is the identity, which keeps
/// escaping a single-pass operation.
pub fn escape(value: &str) -> &str {
    match value {
        "<" => "&lt;",
        ">" => "&gt;",
        "&" => "&amp;",
        _ => value,
    }
}

/// Accumulates tag text for one parse unit. Created per file, appended to
/// throughout the parse, rendered exactly once at the end.
pub struct TagWriter {
    buf: String,
}

impl TagWriter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// `<name>` at `depth`. Inline opens stay on the current line for a
    /// value and closing tag to follow.
    pub fn open_tag(&mut self, name: &str, depth: usize, inline: bool) {
        self.indent(depth);
        self.buf.push('<');
        self.push_name(name);
        self.buf.push('>');
        if !inline {
            self.buf.push('\n');
        }
    }

    /// `</name>` at `depth`.
    pub fn close_tag(&mut self, name: &str, depth: usize) {
        self.indent(depth);
        self.buf.push_str("</");
        self.push_name(name);
        self.buf.push_str(">\n");
    }

    /// `<name> value </name>` on one line at `depth`, escaping the value.
    pub fn inline_tag(&mut self, name: &str, value: &str, depth: usize) {
        self.open_tag(name, depth, true);
        self.buf.push(' ');
        self.buf.push_str(escape(value));
        self.buf.push(' ');
        self.close_tag(name, 0);
    }

    /// Render the accumulated text.
    pub fn finish(self) -> String {
        self.buf
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.buf.push_str(INDENT);
        }
    }

    /// Tag names are lower-cased on emission regardless of source casing.
    fn push_name(&mut self, name: &str) {
        for c in name.chars() {
            self.buf.push(c.to_ascii_lowercase());
        }
    }
}

impl Default for TagWriter {
    fn default() -> Self {
        Self::new()
    }
}
