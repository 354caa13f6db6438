//! Facts about the output language (Go) needed to emit valid source.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt::Write;

lazy_static! {
    static ref KEYWORDS: HashSet<&'static str> = [
        "break",
        "case",
        "chan",
        "const",
        "continue",
        "default",
        "defer",
        "else",
        "fallthrough",
        "for",
        "func",
        "go",
        "goto",
        "if",
        "import",
        "interface",
        "map",
        "package",
        "range",
        "return",
        "select",
        "struct",
        "switch",
        "type",
        "var",
    ]
    .into_iter()
    .collect();
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}

fn is_letter(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Whether `name` is a syntactically valid Go identifier (keywords included).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_letter(c) => chars.all(|c| is_letter(c) || c.is_numeric()),
        _ => false,
    }
}

/// Go exports identifiers that start with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Quote `s` as a Go interpreted string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{0B}' => out.push_str("\\v"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if is_printable(c) => out.push(c),
            c if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Approximates Go's `strconv.IsPrint`: the ASCII space is the only
/// printable space, and control and format characters are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(c, '\u{AD}' | '\u{200B}'..='\u{200F}' | '\u{2028}'..='\u{202E}' | '\u{2060}'..='\u{206F}' | '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert!(is_keyword("func"));
        assert!(is_keyword("range"));
        assert!(!is_keyword("roots"));
        assert!(!is_keyword("Func"));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("readme"));
        assert!(is_identifier("_x1"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("my-ref"));
        assert!(!is_identifier("a.b"));
    }

    #[test]
    fn test_exported() {
        assert!(is_exported("Card"));
        assert!(is_exported("Ärger"));
        assert!(!is_exported("card"));
        assert!(!is_exported("_Card"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("README"), "\"README\"");
        assert_eq!(quote("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
        assert_eq!(quote("a\tb\u{1}"), "\"a\\tb\\x01\"");
        assert_eq!(quote("\u{a0}x\u{a0}"), "\"\\u00a0x\\u00a0\"");
        assert_eq!(quote("héllo ✓"), "\"héllo ✓\"");
    }
}
