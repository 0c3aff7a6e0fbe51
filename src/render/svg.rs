//! Minimal SVG markup writer
//!
//! Emits indented, deterministic markup: attribute order is the caller's
//! order, numbers go through [`Num`], and all text is XML-escaped.

use std::fmt;

/// A number formatted with at most two decimals and no trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = format!("{:.2}", self.0);
        let trimmed = if rounded.contains('.') {
            rounded.trim_end_matches('0').trim_end_matches('.')
        } else {
            rounded.as_str()
        };
        if trimmed == "-0" {
            f.write_str("0")
        } else {
            f.write_str(trimmed)
        }
    }
}

/// Escape text for use in XML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Attribute list: name and any displayable value.
pub type Attrs<'a> = [(&'a str, &'a dyn fmt::Display)];

/// Builds an SVG document as a string.
#[derive(Debug, Default)]
pub struct SvgWriter {
    buf: String,
    depth: usize,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(&value.to_string()));
            self.buf.push('"');
        }
    }

    /// `<tag ...>` and indent what follows.
    pub fn open(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.start_tag(tag, attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    /// `</tag>` matching an earlier [`open`](Self::open).
    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    /// Self-closing `<tag ... />`.
    pub fn empty(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.start_tag(tag, attrs);
        self.buf.push_str("/>\n");
    }

    /// `<tag ...>content</tag>` with escaped content.
    pub fn text(&mut self, tag: &str, attrs: &Attrs<'_>, content: &str) {
        self.start_tag(tag, attrs);
        self.buf.push('>');
        self.buf.push_str(&escape(content));
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Path data builder (`M`, `L`, `Z` commands).
#[derive(Debug, Default)]
pub struct PathData {
    buf: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(&mut self, cmd: char, x: f64, y: f64) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push(cmd);
        self.buf.push_str(&format!("{} {}", Num(x), Num(y)));
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.command('M', x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.command('L', x, y);
        self
    }

    pub fn close(mut self) -> Self {
        self.buf.push_str(" Z");
        self
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_formatting() {
        assert_eq!(Num(12.0).to_string(), "12");
        assert_eq!(Num(12.5).to_string(), "12.5");
        assert_eq!(Num(12.3456).to_string(), "12.35");
        assert_eq!(Num(0.1 + 0.2).to_string(), "0.3");
        assert_eq!(Num(-0.001).to_string(), "0");
        assert_eq!(Num(-3.25).to_string(), "-3.25");
        assert_eq!(Num(100.0).to_string(), "100");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("A & B <\"x\"> 'y'"), "A &amp; B &lt;&quot;x&quot;&gt; &apos;y&apos;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_writer_nesting() {
        let mut w = SvgWriter::new();
        w.open("g", &[("id", &"layer")]);
        w.empty("circle", &[("cx", &Num(1.5)), ("r", &Num(2.0))]);
        w.text("text", &[("x", &Num(0.0))], "A<1>");
        w.close("g");
        assert_eq!(
            w.finish(),
            "<g id=\"layer\">\n  <circle cx=\"1.5\" r=\"2\"/>\n  <text x=\"0\">A&lt;1&gt;</text>\n</g>\n"
        );
    }

    #[test]
    fn test_path_data() {
        let d = PathData::new().move_to(0.0, 1.0).line_to(2.5, 3.333).close();
        assert_eq!(d.to_string(), "M0 1 L2.5 3.33 Z");
    }
}
