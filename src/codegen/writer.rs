//! Line-oriented source writer with tab indentation.

/// Accumulates generated source one line at a time.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    /// An empty writer at depth zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push('\t');
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `header`, then indent until the matching [`CodeWriter::close`].
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(header);
        self.depth += 1;
    }

    /// Dedent and write `footer`.
    pub fn close(&mut self, footer: impl AsRef<str>) {
        self.dedent();
        self.line(footer);
    }

    /// Indent following lines one more level.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Indent following lines one level less.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The accumulated text without its trailing newline.
    pub fn finish(self) -> String {
        let mut out = self.out;
        while out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

/// Render `s` as a double-quoted string literal of the generated language.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' || c == '\x7f' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
