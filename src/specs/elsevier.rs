// src/specs/elsevier.rs
//
// Elsevier editorial board pages.
//
// Shape: one `<h1>` carrying "<Journal> - Editorial Board", then a run of
// `class="publication-editor"` blocks, each with a name child and an
// affiliation child. Role headings (`publication-editor-type`) sit before
// the blocks they describe, not around them.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::warn;

use crate::core::html::{child_text, class_contains, leading_text, nearest_preceding, text_content};
use crate::records::EditorRecord;

static H1: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("Failed to parse h1 selector - this is a bug"));

static EDITOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class="publication-editor"]"#)
        .expect("Failed to parse editor selector - this is a bug")
});

const TITLE_SUFFIX: &str = "- Editorial Board";
const NAME_CLASS: &str = "publication-editor-name";
const AFFILIATION_CLASS: &str = "publication-editor-affiliation";
const TYPE_CLASS: &str = "publication-editor-type";

pub fn parse(page_id: &str, html: &str) -> Vec<EditorRecord> {
    let doc = Html::parse_document(html);
    let journal = journal_title(&doc);

    let editors: Vec<_> = doc.select(&EDITOR).collect();
    if editors.is_empty() {
        warn!("No editors found in {page_id}");
        return Vec::new();
    }

    editors
        .into_iter()
        .map(|editor| {
            let role = nearest_preceding(&doc, editor, |e| class_contains(e, TYPE_CLASS))
                .map(|e| text_content(e).trim().to_string())
                .unwrap_or_default();

            EditorRecord {
                journal_id: s!(page_id),
                journal_title: journal.clone(),
                journal_subtitle: s!(),
                editor_name: child_text(editor, NAME_CLASS),
                affiliation: child_text(editor, AFFILIATION_CLASS),
                role,
            }
        })
        .collect()
}

fn journal_title(doc: &Html) -> String {
    doc.select(&H1)
        .next()
        .map(|h1| leading_text(h1).replace(TITLE_SUFFIX, "").trim().to_string())
        .unwrap_or_default()
}
