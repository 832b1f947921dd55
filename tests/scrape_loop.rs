// tests/scrape_loop.rs
mod common;

use std::fs;

use common::{fixture, FakeSource};
use eb_scrape::config::options::{
    AppOptions, ExportFormat, ExportOptions, JournalSelector, Publisher, ScrapeOptions,
};
use eb_scrape::progress::LogProgress;
use eb_scrape::scrape::{collect_boards, fetch_pages, search_snippets};

const BARE_ELSEVIER: &str = r#"<div class="publication-editor">
    <div class="publication-editor-name">Edsger Dijkstra</div>
    <div class="publication-editor-affiliation">University of Texas at Austin</div>
</div>"#;

fn opts(publisher: Publisher, ids: &[&str], export: ExportOptions) -> AppOptions {
    AppOptions {
        scrape: ScrapeOptions {
            publisher,
            journals: JournalSelector::Ids(ids.iter().map(|s| s.to_string()).collect()),
            url_template: Some("http://pages.test/{id}/board".into()),
            pause_ms: 0,
            ..ScrapeOptions::default()
        },
        export,
    }
}

fn csv_to(path: &std::path::Path) -> ExportOptions {
    ExportOptions { format: ExportFormat::Csv, out: Some(path.to_path_buf()), ..Default::default() }
}

#[test]
fn failed_pages_are_counted_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("board.csv");
    let mut source = FakeSource::default().with("12186", fixture("springer", "12186.html"));
    let mut progress = LogProgress::every(1);

    let o = opts(Publisher::Springer, &["12186", "404"], csv_to(&out));
    let summary = collect_boards(&o, &mut source, Some(&mut progress)).unwrap();

    assert_eq!(summary.jobs, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.records, 4);
    assert_eq!(summary.files_written, vec![out.clone()]);
    assert_eq!(progress.done(), 2);
    assert_eq!(
        source.requested,
        vec!["http://pages.test/12186/board", "http://pages.test/404/board"]
    );

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "ID,Title,Subtitle,Name,Affiliation,Role");
    assert_eq!(
        lines[1],
        "12186,Journal for Labour Market Research,Zeitschrift für ArbeitsmarktForschung,\
         Jane Doe,\"University of Mannheim, Mannheim, Germany\",Managing Editors"
    );
    assert!(lines[4].starts_with("12186,Journal for Labour Market Research,"));
    assert!(lines[4].ends_with(",Erika Musterfrau,\"Humboldt University, Berlin, Germany\",Editorial Board"));
}

#[test]
fn rows_are_on_disk_after_each_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("board.csv");
    let mut source = FakeSource::default()
        .with("a", BARE_ELSEVIER)
        .with("b", BARE_ELSEVIER)
        .with("c", BARE_ELSEVIER);
    source.watch = Some(out.clone());

    let mut export = csv_to(&out);
    export.checkpoint_every = 1;
    let summary = collect_boards(&opts(Publisher::Elsevier, &["a", "b", "c"], export), &mut source, None).unwrap();

    assert_eq!(summary.records, 3);
    let seen: Vec<usize> = source.snapshots.iter().map(|s| s.lines().count()).collect();
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 4);
}

#[test]
fn no_checkpoint_means_one_write_at_the_end() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("board.csv");
    let mut source = FakeSource::default().with("a", BARE_ELSEVIER).with("b", BARE_ELSEVIER);
    source.watch = Some(out.clone());

    let mut export = csv_to(&out);
    export.checkpoint_every = 0;
    collect_boards(&opts(Publisher::Elsevier, &["a", "b"], export), &mut source, None).unwrap();

    let seen: Vec<usize> = source.snapshots.iter().map(|s| s.lines().count()).collect();
    assert_eq!(seen, vec![1, 1]);
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 3);
}

#[test]
fn sheet_title_fills_pages_without_one() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("journals.csv");
    fs::write(&sheet, "ID,Title\ncomputing,Computing Letters\n").unwrap();
    let out = dir.path().join("board.json");

    let mut o = opts(
        Publisher::Elsevier,
        &[],
        ExportOptions { format: ExportFormat::Json, out: Some(out.clone()), ..Default::default() },
    );
    o.scrape.journals = JournalSelector::Sheet(sheet);

    let mut source = FakeSource::default().with("computing", BARE_ELSEVIER);
    let summary = collect_boards(&o, &mut source, None).unwrap();
    assert_eq!(summary.records, 1);

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rec = &v["computing"][0];
    assert_eq!(rec["journal_title"], "Computing Letters");
    assert_eq!(rec["editor_name"], "Edsger Dijkstra");
    assert_eq!(rec["affiliation"], "University of Texas at Austin");
}

#[test]
fn search_writes_snippets_grouped_by_journal() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results.json");

    let mut o = opts(
        Publisher::Springer,
        &["12186", "12187"],
        ExportOptions { format: ExportFormat::Json, out: Some(out.clone()), ..Default::default() },
    );
    o.scrape.pattern = "Mannheim".into();

    let mut source = FakeSource::default()
        .with("12186", fixture("springer", "12186.html"))
        .with("12187", "<html><body><p>Nobody from there</p></body></html>");
    let summary = search_snippets(&o, &mut source, None).unwrap();
    assert_eq!((summary.jobs, summary.failed, summary.records), (2, 0, 2));

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let hits = v["12186"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["role"], "Managing Editors");
    assert_eq!(hits[0]["snippet"], "Jane Doe, University of Mannheim, Mannheim, Germany");
    assert_eq!(hits[1]["role"], "Editorial Board");
    assert_eq!(
        hits[1]["snippet"],
        "Max Mustermann, ZEW Leibniz Centre for European Economic Research, Mannheim, Germany"
    );
    assert!(v.get("12187").is_none());
}

#[test]
fn fetch_saves_only_pages_that_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let pages = dir.path().join("pages");
    let mut source = FakeSource::default().with("12186", "<p>saved</p>");

    let o = opts(Publisher::Springer, &["12186", "12187"], ExportOptions::default());
    let summary = fetch_pages(&o, &mut source, &pages, None).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.files_written, vec![pages.join("12186.html")]);
    assert_eq!(fs::read_to_string(pages.join("12186.html")).unwrap(), "<p>saved</p>");
    assert!(!pages.join("12187.html").exists());
}
