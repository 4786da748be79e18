//! Charset detection and decoding for fetched third-party pages.
//!
//! Pages are fetched as raw bytes and decoded in two passes: a first UTF-8
//! pass, then a re-decode when the markup declares a different charset in a
//! `<meta>` tag. A single UTF-8 pass corrupts pages that declare legacy
//! Japanese encodings (Shift_JIS, EUC-JP), which are still common on
//! merchant sites.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Matches the charset declaration in either form:
/// `<meta charset="shift_jis">` or
/// `<meta http-equiv="Content-Type" content="text/html; charset=shift_jis">`.
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([a-zA-Z0-9_\-]+)"#)
        .expect("META_CHARSET_RE: hardcoded regex is valid")
});

/// Decodes fetched HTML bytes to a string.
///
/// 1. Decode with UTF-8 (lossy).
/// 2. Scan the decoded markup for a `<meta>` charset declaration.
/// 3. If a different valid encoding is declared, re-decode the original
///    bytes with it.
///
/// Unknown or absent charset labels fall back to the UTF-8 pass; this
/// function never fails.
pub fn decode_html(bytes: &[u8]) -> String {
    let (first_pass, _, _) = UTF_8.decode(bytes);

    if let Some(label) = declared_charset(&first_pass)
        && let Some(encoding) = Encoding::for_label(label.as_bytes())
        && encoding != UTF_8
    {
        let (redecoded, _, _) = encoding.decode(bytes);
        return redecoded.into_owned();
    }

    first_pass.into_owned()
}

/// Extracts the declared charset label from decoded markup, if any.
fn declared_charset(html: &str) -> Option<String> {
    // Charset declarations are required to appear early; scanning the head
    // is enough and keeps the regex off multi-megabyte bodies.
    let mut end = html.len().min(4096);
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    let head = &html[..end];
    META_CHARSET_RE
        .captures(head)
        .map(|c| c[1].to_ascii_lowercase())
}
