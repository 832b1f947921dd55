// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static BR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid <br> regex"));

/// Collapse runs of whitespace to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Turn `<br>`, `<br/>` and `<br />` into newlines so line structure survives parsing.
pub fn strip_br(html: &str) -> String {
    BR_TAG.replace_all(html, "\n").into_owned()
}

/// File stem for an archived page. Keeps ASCII alphanumerics, `-`, `_` and `.`;
/// whitespace becomes a single `_`.
pub fn sanitize_filename(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut last_us = false;
    for ch in id.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' { out.push(ch); last_us = false; }
        else if ch == '_' || ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { s!("journal") } else { out }
}
