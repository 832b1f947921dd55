// src/core/html.rs
// Small helpers over `scraper` that read pages the way an XPath query would:
// full text content, leading text, and the `preceding` axis.

use scraper::{ElementRef, Html};

/// All descendant text, concatenated, unmodified.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text before the first child element (`<b>Editor<i>s</i></b>` → `Editor`).
pub fn leading_text(el: ElementRef<'_>) -> String {
    el.first_child()
        .and_then(|n| n.value().as_text().map(|t| t.to_string()))
        .unwrap_or_default()
}

/// Substring match on the raw `class` attribute, like `contains(@class, …)`.
pub fn class_contains(el: ElementRef<'_>, needle: &str) -> bool {
    el.value().attr("class").is_some_and(|c| c.contains(needle))
}

/// Stripped text of the first direct child whose class contains `needle`.
pub fn child_text(el: ElementRef<'_>, needle: &str) -> String {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|c| class_contains(*c, needle))
        .map(|c| text_content(c).trim().to_string())
        .unwrap_or_default()
}

/// Elements that come before `target` in document order, excluding its
/// ancestors, filtered by `pred`. Returned in document order.
pub fn preceding<'a, F>(doc: &'a Html, target: ElementRef<'a>, pred: F) -> Vec<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    let ancestors: Vec<_> = target.ancestors().map(|n| n.id()).collect();
    let mut out = Vec::new();

    for node in doc.tree.root().descendants() {
        if node.id() == target.id() { break; }
        if ancestors.contains(&node.id()) { continue; }
        if let Some(el) = ElementRef::wrap(node) {
            if pred(el) { out.push(el); }
        }
    }
    out
}

/// Nearest preceding match (the last one in document order).
pub fn nearest_preceding<'a, F>(doc: &'a Html, target: ElementRef<'a>, pred: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    preceding(doc, target, pred).pop()
}
