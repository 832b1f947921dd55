// src/specs/springer.rs
//
// Springer journal "editors" pages.
//
// Editors are plain `<p>` paragraphs ("Name, Institution, City, Country")
// grouped under bold role labels. Journal title and subtitle come from the
// page header: the link back to `/journal/{id}` and
// `p.c-journal-header__subtitle`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::core::html::{leading_text, nearest_preceding, preceding, text_content};
use crate::core::sanitize::normalize_ws;
use crate::records::{EditorRecord, Snippet};

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("Failed to parse p selector - this is a bug"));

const SUBTITLE_CLASS: &str = "c-journal-header__subtitle";

/// Paragraphs whose text contains `pattern`, in document order.
pub fn find_items<'a>(doc: &'a Html, pattern: &str) -> Vec<ElementRef<'a>> {
    doc.select(&PARAGRAPH)
        .filter(|p| text_content(*p).contains(pattern))
        .collect()
}

/// Every paragraph mentioning `pattern`, with the bold label above it.
pub fn search(journal_id: &str, html: &str, pattern: &str) -> Vec<Snippet> {
    let doc = Html::parse_document(html);
    let items = find_items(&doc, pattern);
    snippets(&doc, journal_id, &items)
}

/// The whole board: every labelled paragraph read as "name, affiliation".
pub fn parse(journal_id: &str, html: &str) -> Vec<EditorRecord> {
    let doc = Html::parse_document(html);
    let items: Vec<_> = find_items(&doc, "")
        .into_iter()
        .filter(|p| p.value().attr("class") != Some(SUBTITLE_CLASS))
        .collect();

    snippets(&doc, journal_id, &items)
        .into_iter()
        .filter(|s| !s.role.is_empty() && !s.snippet.is_empty())
        .map(|s| s.to_editor())
        .collect()
}

fn snippets<'a>(doc: &'a Html, journal_id: &str, items: &[ElementRef<'a>]) -> Vec<Snippet> {
    let Some(first) = items.first().copied() else {
        return Vec::new();
    };

    let href = format!("/journal/{journal_id}");
    let title = preceding(doc, first, |e| {
        e.value().name() == "a" && e.value().attr("href") == Some(href.as_str())
    })
    .first()
    .map(|a| leading_text(*a).trim().to_string())
    .unwrap_or_default();

    let subtitle = preceding(doc, first, |e| {
        e.value().name() == "p" && e.value().attr("class") == Some(SUBTITLE_CLASS)
    })
    .first()
    .map(|p| leading_text(*p).trim().to_string())
    .unwrap_or_default();

    items
        .iter()
        .map(|item| {
            let role = nearest_preceding(doc, *item, |e| e.value().name() == "b")
                .map(|b| leading_text(b).trim().to_string())
                .unwrap_or_default();
            Snippet {
                journal_id: s!(journal_id),
                journal_title: title.clone(),
                journal_subtitle: subtitle.clone(),
                role,
                snippet: normalize_ws(&text_content(*item)),
            }
        })
        .collect()
}
