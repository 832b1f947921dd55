// src/cli.rs
use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    config::consts::*,
    config::options::{
        parse_ids_list, AppOptions, ExportFormat, ExportOptions, JournalSelector, Publisher,
        ScrapeOptions,
    },
    core::net::{ArchiveSource, HttpSource, PageSource},
    error::{Error, Result},
    journals,
    progress::LogProgress,
    scrape::{self, RunSummary},
};

#[derive(Parser, Debug)]
#[command(name = "eb_scrape", version, about = "Scrape journal editorial boards into CSV/JSON")]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "More log output (-v debug, -vv trace); RUST_LOG overrides"
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch board pages and write one row per editor
    Boards {
        #[arg(short = 'P', long, value_enum)]
        publisher: Publisher,
        #[command(flatten)]
        selection: Selection,
        #[command(flatten)]
        remote: Remote,
        #[arg(long, value_name = "DIR", help = "Read pages saved by `fetch` instead of downloading")]
        from_pages: Option<PathBuf>,
        #[command(flatten)]
        output: Output,
    },
    /// Springer: find board paragraphs mentioning a pattern
    Search {
        #[arg(short, long, default_value = DEFAULT_PATTERN)]
        pattern: String,
        #[command(flatten)]
        selection: Selection,
        #[command(flatten)]
        remote: Remote,
        #[arg(long, value_name = "DIR", help = "Read pages saved by `fetch` instead of downloading")]
        from_pages: Option<PathBuf>,
        #[command(flatten)]
        output: Output,
    },
    /// Save raw board pages to a directory for later `analyze`
    Fetch {
        #[arg(short = 'P', long, value_enum)]
        publisher: Publisher,
        #[command(flatten)]
        selection: Selection,
        #[command(flatten)]
        remote: Remote,
        #[arg(long, default_value = DEFAULT_PAGES_DIR)]
        pages_dir: PathBuf,
    },
    /// Parse every saved .html page in a directory or .zip (offline)
    Analyze {
        #[arg(short = 'P', long, value_enum)]
        publisher: Publisher,
        #[arg(long, default_value = DEFAULT_PAGES_DIR)]
        pages_dir: PathBuf,
        #[command(flatten)]
        output: Output,
    },
    /// Print the selected journals as id,title,url
    Journals {
        #[arg(short = 'P', long, value_enum, default_value_t = Publisher::Springer)]
        publisher: Publisher,
        #[command(flatten)]
        selection: Selection,
        #[arg(long, help = "Page URL template; {id} is replaced")]
        url_template: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Selection {
    #[arg(short = 's', long = "startindex", default_value_t = DEFAULT_START_INDEX, help = "First journal id of the range")]
    pub start: u32,
    #[arg(short = 'e', long = "endindex", default_value_t = DEFAULT_END_INDEX, help = "End of the range (exclusive)")]
    pub end: u32,
    #[arg(long, conflicts_with = "input", help = "Journal ids, e.g. 12186,12000-12010 or slugs")]
    pub ids: Option<String>,
    #[arg(short, long, help = "Spreadsheet (.xlsx/.ods/.xls) or CSV with an id column")]
    pub input: Option<PathBuf>,
}

impl Selection {
    pub fn to_selector(&self) -> Result<JournalSelector> {
        if let Some(path) = &self.input {
            return Ok(JournalSelector::Sheet(path.clone()));
        }
        if let Some(list) = &self.ids {
            return Ok(JournalSelector::Ids(parse_ids_list(list)?));
        }
        if self.start > self.end {
            return Err(Error::input(format!("Invalid range: {}..{}", self.start, self.end)));
        }
        Ok(JournalSelector::Range { start: self.start, end: self.end })
    }
}

#[derive(Args, Debug, Clone)]
pub struct Remote {
    #[arg(long, help = "Page URL template; {id} is replaced")]
    pub url_template: Option<String>,
    #[arg(long, default_value_t = REQUEST_PAUSE_MS, help = "Pause between requests (ms)")]
    pub pause_ms: u64,
}

/// Saved pages when given, the live site otherwise.
fn page_source(from_pages: Option<&PathBuf>) -> Result<Box<dyn PageSource>> {
    Ok(match from_pages {
        Some(dir) => Box::new(ArchiveSource::new(dir)),
        None => Box::new(HttpSource::new()?),
    })
}

#[derive(Args, Debug, Clone)]
pub struct Output {
    #[arg(short, long, help = "Output file, or directory for the default name")]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum, help = "Defaults to the output file's extension")]
    pub format: Option<ExportFormat>,
    #[arg(long, default_value_t = DEFAULT_CHECKPOINT_EVERY, help = "Flush results every N journals (0 = only at the end)")]
    pub checkpoint_every: usize,
    #[arg(long)]
    pub no_headers: bool,
}

impl Output {
    pub fn to_export(&self, default_format: ExportFormat, file_stem: &str) -> ExportOptions {
        let from_ext = self
            .out
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| match e.to_string_lossy().to_ascii_lowercase().as_str() {
                "csv" => Some(ExportFormat::Csv),
                "tsv" => Some(ExportFormat::Tsv),
                "json" => Some(ExportFormat::Json),
                _ => None,
            });

        ExportOptions {
            format: self.format.or(from_ext).unwrap_or(default_format),
            out: self.out.clone(),
            file_stem: s!(file_stem),
            include_headers: !self.no_headers,
            checkpoint_every: self.checkpoint_every,
        }
    }
}

fn scrape_options(publisher: Publisher, selection: &Selection, remote: &Remote) -> Result<ScrapeOptions> {
    Ok(ScrapeOptions {
        publisher,
        journals: selection.to_selector()?,
        url_template: remote.url_template.clone(),
        pause_ms: remote.pause_ms,
        ..ScrapeOptions::default()
    })
}

pub fn run(cli: Cli) -> Result<()> {
    crate::log::init(cli.verbose);

    match cli.command {
        Commands::Boards { publisher, selection, remote, from_pages, output } => {
            let opts = AppOptions {
                scrape: scrape_options(publisher, &selection, &remote)?,
                export: output.to_export(ExportFormat::Csv, DEFAULT_BOARDS_FILE),
            };
            let mut source = page_source(from_pages.as_ref())?;
            let mut progress = LogProgress::default();
            let summary = scrape::collect_boards(&opts, source.as_mut(), Some(&mut progress))?;
            report(&summary);
        }
        Commands::Search { pattern, selection, remote, from_pages, output } => {
            let mut scrape = scrape_options(Publisher::Springer, &selection, &remote)?;
            scrape.pattern = pattern;
            let opts = AppOptions {
                scrape,
                export: output.to_export(ExportFormat::Json, DEFAULT_SEARCH_FILE),
            };
            let mut source = page_source(from_pages.as_ref())?;
            let mut progress = LogProgress::default();
            let summary = scrape::search_snippets(&opts, source.as_mut(), Some(&mut progress))?;
            report(&summary);
        }
        Commands::Fetch { publisher, selection, remote, pages_dir } => {
            let opts = AppOptions {
                scrape: scrape_options(publisher, &selection, &remote)?,
                ..AppOptions::default()
            };
            let mut source = HttpSource::new()?;
            let mut progress = LogProgress::default();
            let summary = scrape::fetch_pages(&opts, &mut source, &pages_dir, Some(&mut progress))?;
            println!(
                "Saved {} pages to {} ({} failed)",
                summary.files_written.len(),
                pages_dir.display(),
                summary.failed
            );
        }
        Commands::Analyze { publisher, pages_dir, output } => {
            let opts = AppOptions {
                scrape: ScrapeOptions { publisher, ..ScrapeOptions::default() },
                export: output.to_export(ExportFormat::Csv, publisher.name()),
            };
            let mut progress = LogProgress::default();
            let summary = scrape::analyze_archive(&opts, &pages_dir, Some(&mut progress))?;
            report(&summary);
        }
        Commands::Journals { publisher, selection, url_template } => {
            let list = journals::resolve(&selection.to_selector()?)?;
            let template = url_template.as_deref().unwrap_or_else(|| publisher.url_template());
            let mut out = csv::Writer::from_writer(io::stdout());
            for j in &list {
                out.write_record([j.id.as_str(), j.title.as_deref().unwrap_or(""), j.url(template).as_str()])?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn report(summary: &RunSummary) {
    info!(
        "{} jobs, {} failed, {} records",
        summary.jobs, summary.failed, summary.records
    );
    for path in &summary.files_written {
        println!("Wrote {} records to {}", summary.records, path.display());
    }
}
