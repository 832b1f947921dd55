// src/specs/mod.rs
//! # Publisher page specs
//!
//! One module per publisher. Each knows *where the editorial board lives in
//! that publisher's HTML* and how to read it back into flat records.
//!
//! ## What lives here
//! - **Pure HTML parsing**: `&str` in, records out. No network, no files.
//! - **Selector choice** per vendor (`publication-editor` blocks for Elsevier,
//!   labelled paragraphs for Springer, free text for Wiley).
//! - **Text heuristics** where the markup carries no structure
//!   (`wiley::classify`).
//!
//! ## What does **not** live here
//! - Fetching, pausing, progress, checkpoints – see `scrape`.
//! - Output formats – see `file`.
//!
//! ## Conventions
//! - Parsers never fail: a page that doesn't match yields an empty `Vec`
//!   and a `warn!` line, so one odd page can't stop a long run.
//! - `page_id` is whatever identifies the page to a human (journal id or
//!   archive file name); it is copied into every record.
//! - Specs are testable **offline** against inline or captured HTML.
pub mod elsevier;
pub mod springer;
pub mod wiley;

use crate::config::options::Publisher;
use crate::records::EditorRecord;

/// Read the editorial board from a page of the given publisher.
pub fn parse_board(publisher: Publisher, page_id: &str, html: &str) -> Vec<EditorRecord> {
    match publisher {
        Publisher::Elsevier => elsevier::parse(page_id, html),
        Publisher::Springer => springer::parse(page_id, html),
        Publisher::Wiley => wiley::parse(page_id, html),
    }
}
