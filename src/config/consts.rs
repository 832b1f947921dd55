// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("eb_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Publisher page templates; `{id}` is replaced with the journal id
pub const ELSEVIER_URL: &str = "https://www.journals.elsevier.com/{id}/editorial-board";
pub const SPRINGER_URL: &str = "https://link.springer.com/journal/{id}/editors";
pub const WILEY_URL: &str =
    "https://onlinelibrary.wiley.com/page/journal/{id}/homepage/editorialboard.html";

// Scrape
pub const REQUEST_PAUSE_MS: u64 = 500; // be polite
pub const JITTER_MS: u64 = 250; // extra 0..250 ms
pub const PROGRESS_EVERY: usize = 10;
pub const DEFAULT_CHECKPOINT_EVERY: usize = 25;

// Springer search
pub const DEFAULT_PATTERN: &str = "Mannheim";
pub const DEFAULT_START_INDEX: u32 = 12000;
pub const DEFAULT_END_INDEX: u32 = 13000;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_BOARDS_FILE: &str = "editors";
pub const DEFAULT_SEARCH_FILE: &str = "results";
pub const DEFAULT_PAGES_DIR: &str = "pages";
pub const PAGE_EXT: &str = "html";
