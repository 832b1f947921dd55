// src/scrape.rs
//
// The run loops. Strictly sequential: fetch one page, parse it, record the
// result, pause, repeat. A failed page is logged and skipped; only output
// I/O errors end a run early.

use std::{path::{Path, PathBuf}, thread, time::Duration};

use rand::Rng;
use tracing::{info, warn};

use crate::{
    config::consts::JITTER_MS,
    config::options::{AppOptions, Publisher},
    core::archive::PageArchive,
    core::net::{save_page, PageSource},
    error::Result,
    file::RecordSink,
    journals::{self, Journal},
    progress::Progress,
    records::{EditorRecord, Record, Snippet},
    specs,
};

/// Summary of what a run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub jobs: usize,
    pub failed: usize,
    pub records: usize,
    pub files_written: Vec<PathBuf>,
}

/// Fetch every selected journal's board page and write its editors.
pub fn collect_boards(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let publisher = opts.scrape.publisher;
    run_journals::<EditorRecord, _>(opts, source, progress, |journal, html| {
        let mut records = specs::parse_board(publisher, &journal.id, html);
        if let Some(title) = &journal.title {
            for r in records.iter_mut().filter(|r| r.journal_title.is_empty()) {
                r.journal_title = title.clone();
            }
        }
        records
    })
}

/// Springer pattern search: every board paragraph mentioning `opts.scrape.pattern`.
pub fn search_snippets(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let pattern = opts.scrape.pattern.as_str();
    run_journals::<Snippet, _>(opts, source, progress, |journal, html| {
        specs::springer::search(&journal.id, html, pattern)
    })
}

/// Download raw pages into an archive directory for later `analyze_archive`.
pub fn fetch_pages(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    pages_dir: &Path,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let journals = journals::resolve(&opts.scrape.journals)?;
    let mut summary = RunSummary::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(journals.len());
    }

    for (i, journal) in journals.iter().enumerate() {
        let url = journal.url(opts.scrape.template());
        match source.fetch(&journal.id, &url) {
            Ok(html) => {
                // a full disk is not a per-page problem
                let path = save_page(pages_dir, &journal.id, &html)?;
                summary.files_written.push(path);
            }
            Err(e) => {
                summary.failed += 1;
                warn!("{}: {e}", journal.id);
            }
        }
        summary.jobs += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&journal.id);
        }
        if source.is_remote() && i + 1 < journals.len() {
            pause(opts.scrape.pause_ms);
        }
    }

    let msg = format!("Saved {} pages to {}", summary.files_written.len(), pages_dir.display());
    match progress.as_deref_mut() {
        Some(p) => {
            p.log(&msg);
            p.finish();
        }
        None => info!("{msg}"),
    }
    Ok(summary)
}

/// Offline pass over saved pages: a directory or a `.zip`. The file (or
/// member) name is the record id.
pub fn analyze_archive(
    opts: &AppOptions,
    pages_dir: &Path,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let publisher = opts.scrape.publisher;
    let mut archive = PageArchive::open(pages_dir)?;
    let pages = archive.names().to_vec();
    let mut sink = RecordSink::<EditorRecord>::create(&opts.export)?;
    let mut summary = RunSummary::default();

    if pages.is_empty() {
        warn!("No .html pages in {}", pages_dir.display());
    }
    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len());
    }

    for id in &pages {
        match archive.read(id) {
            Ok(html) => sink.push(analyze_page(publisher, id, &html)),
            Err(e) => {
                summary.failed += 1;
                warn!("{e}");
            }
        }
        summary.jobs += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(id);
        }
        checkpoint_if_due(&mut sink, summary.jobs, opts.export.checkpoint_every)?;
    }

    summary.records = sink.len();
    summary.files_written.push(sink.finish()?);
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

/// Parse one saved page; exposed for callers holding HTML already.
pub fn analyze_page(publisher: Publisher, page_id: &str, html: &str) -> Vec<EditorRecord> {
    specs::parse_board(publisher, page_id, html)
}

/* ---------------- shared loop ---------------- */

fn run_journals<R, F>(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    mut progress: Option<&mut dyn Progress>,
    mut parse: F,
) -> Result<RunSummary>
where
    R: Record,
    F: FnMut(&Journal, &str) -> Vec<R>,
{
    let journals = journals::resolve(&opts.scrape.journals)?;
    let template = opts.scrape.template();
    let mut sink = RecordSink::<R>::create(&opts.export)?;
    let mut summary = RunSummary::default();

    if journals.is_empty() {
        warn!("No journals to process");
    }
    if let Some(p) = progress.as_deref_mut() {
        p.begin(journals.len());
    }

    for (i, journal) in journals.iter().enumerate() {
        let url = journal.url(template);
        match source.fetch(&journal.id, &url) {
            Ok(html) => sink.push(parse(journal, &html)),
            Err(e) => {
                summary.failed += 1;
                warn!("{}: {e}", journal.id);
            }
        }
        summary.jobs += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&journal.id);
        }
        checkpoint_if_due(&mut sink, summary.jobs, opts.export.checkpoint_every)?;

        if source.is_remote() && i + 1 < journals.len() {
            pause(opts.scrape.pause_ms);
        }
    }

    summary.records = sink.len();
    summary.files_written.push(sink.finish()?);
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

fn checkpoint_if_due<R: Record>(sink: &mut RecordSink<R>, jobs: usize, every: usize) -> Result<()> {
    if every > 0 && jobs % every == 0 {
        sink.checkpoint()?;
    }
    Ok(())
}

fn pause(ms: u64) {
    if ms == 0 {
        return;
    }
    let jitter = rand::thread_rng().gen_range(0..=JITTER_MS);
    thread::sleep(Duration::from_millis(ms + jitter));
}
