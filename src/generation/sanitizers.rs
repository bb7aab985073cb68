//! Target-agnostic sanitizers for text placed into emitted source
//!
//! Schema descriptions end up in line comments, block comments and string
//! literals of four different languages. These helpers keep that text on a
//! single line and free of sequences that would end a comment early.

use once_cell::sync::Lazy;
use regex::Regex;

// Smart quotes and em-dashes
static UNICODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Sanitizes a description for use in a single-line or block doc comment
///
/// This function:
/// - Replaces smart quotes and em-dashes with ASCII equivalents
/// - Collapses every whitespace run (newlines included) into one space
/// - Breaks up block-comment terminators (`*/`)
///
/// # Examples
/// ```
/// use rpcgen::generation::sanitizers::sanitize_comment;
///
/// assert_eq!(sanitize_comment("the item\n   to add"), "the item to add");
/// assert_eq!(sanitize_comment("ends */ early"), "ends * / early");
/// ```
pub fn sanitize_comment(input: &str) -> String {
    let ascii = UNICODE_RE.replace_all(input, |caps: &regex::Captures| match &caps[0] {
        "\u{2018}" | "\u{2019}" => "'",
        "\u{201C}" | "\u{201D}" => "\"",
        "\u{2014}" => "-",
        _ => "",
    });
    let collapsed = WS_RE.replace_all(ascii.trim(), " ");
    collapsed.replace("*/", "* /")
}

/// Escapes text for a double-quoted string literal shared by all targets
pub fn escape_string_literal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
