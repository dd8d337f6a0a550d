//! Low-level scanning over annotation text.
//!
//! Everything here works on `&str` slices and never allocates: the parsers
//! above thread the unconsumed remainder through return values.

/// True for characters allowed in a name: ASCII letters, digits, `_` and `-`.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split `s` into its longest prefix of name characters and the rest.
pub fn take_name(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_name_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// Strip `prefix` and any whitespace after it.
pub fn match_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix).map(str::trim_start)
}

/// Strip a keyword that must not run on into a longer name.
///
/// `chan int` and `chan(int)` match `chan`; `channel` does not.
pub fn match_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if is_name_char(c) => None,
        _ => Some(rest.trim_start()),
    }
}

/// Remove comment markers from one line of a comment block and trim it.
///
/// Handles `// text`, `/* text`, `text */` and a lone `*/`, so both line
/// comments and block comments can carry directives.
pub fn comment_line(line: &str) -> &str {
    let mut line = line.trim();
    if let Some(rest) = line.strip_prefix("//") {
        line = rest;
    } else if let Some(rest) = line.strip_prefix("/*") {
        line = rest;
    }
    if let Some(rest) = line.strip_suffix("*/") {
        line = rest;
    }
    line.trim()
}
