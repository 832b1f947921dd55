// src/records.rs
//
// Flat output records. One page yields zero or more of these; they are
// written append-only and never updated afterwards.

use serde::Serialize;

/// A row shape the exporters know how to write.
pub trait Record: Serialize {
    /// Column names, in `row()` order.
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;

    /// Grouping key for JSON output.
    fn journal_id(&self) -> &str;
}

/// One editor listed on a journal's editorial board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EditorRecord {
    pub journal_id: String,
    pub journal_title: String,
    pub journal_subtitle: String,
    pub editor_name: String,
    pub affiliation: String,
    pub role: String,
}

impl Record for EditorRecord {
    const HEADERS: &'static [&'static str] =
        &["ID", "Title", "Subtitle", "Name", "Affiliation", "Role"];

    fn row(&self) -> Vec<String> {
        vec![
            self.journal_id.clone(),
            self.journal_title.clone(),
            self.journal_subtitle.clone(),
            self.editor_name.clone(),
            self.affiliation.clone(),
            self.role.clone(),
        ]
    }

    fn journal_id(&self) -> &str { &self.journal_id }
}

/// A paragraph that matched a search pattern, with the bold label above it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub journal_id: String,
    pub journal_title: String,
    pub journal_subtitle: String,
    pub role: String,
    pub snippet: String,
}

impl Record for Snippet {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Subtitle", "Role", "Snippet"];

    fn row(&self) -> Vec<String> {
        vec![
            self.journal_id.clone(),
            self.journal_title.clone(),
            self.journal_subtitle.clone(),
            self.role.clone(),
            self.snippet.clone(),
        ]
    }

    fn journal_id(&self) -> &str { &self.journal_id }
}

impl Snippet {
    /// Read the snippet as "name, affiliation…", splitting at the first comma.
    pub fn to_editor(&self) -> EditorRecord {
        let (name, affiliation) = match self.snippet.split_once(',') {
            Some((n, a)) => (n.trim(), a.trim()),
            None => (self.snippet.trim(), ""),
        };
        EditorRecord {
            journal_id: self.journal_id.clone(),
            journal_title: self.journal_title.clone(),
            journal_subtitle: self.journal_subtitle.clone(),
            editor_name: s!(name),
            affiliation: s!(affiliation),
            role: self.role.clone(),
        }
    }
}
