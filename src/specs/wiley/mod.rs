// src/specs/wiley/mod.rs
//
// Wiley editorial board pages.
//
// Unlike Elsevier, Wiley boards are free text: journals paste their board
// into the page body as paragraphs, `<br>`-separated lines and sometimes
// tables. We recover structure line by line:
//
//   role line          "Associate Editors:"          → current role
//   name, affiliation  "Jane Doe, Univ. of X, UK"    → one record
//   name (affiliation) "Jane Doe (Univ. of X)"       → one record
//   address block      "Prof. Jane Doe\nDept. of Y\nUniversity of X"
//                                                    → merged, then one record
//
// The role carries forward across paragraphs until the next role line.

pub mod classify;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::core::html::text_content;
use crate::core::sanitize::strip_br;
use crate::records::EditorRecord;
use classify::{is_institution, is_person, is_role_name};

static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});
static MAIN_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="main-content"]"#)
        .expect("Failed to parse main-content selector - this is a bug")
});
static ROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="row"]"#).expect("Failed to parse row selector - this is a bug")
});
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("Failed to parse p selector - this is a bug"));

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid blank-line regex"));
static BLANK_LINE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*\n\s*").expect("valid blank-line split regex"));
static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9]+").expect("valid leading-digits regex"));
static TRAILING_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\((.*)\)$").expect("valid parentheses regex"));

/// Address blocks longer than this are treated as lists, never merged.
const MAX_MERGE_LINES: usize = 10;

/// What one board line turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Blank,
    Role(String),
    Editor { name: String, affiliation: String },
    /// Mail addresses and other noise with nothing to split.
    Noise,
    Unsplittable(String),
}

pub fn parse(page_id: &str, html: &str) -> Vec<EditorRecord> {
    let html = strip_br(html);
    let doc = Html::parse_document(&html);

    let journal = doc
        .select(&TITLE)
        .next()
        .map(|t| text_content(t).trim().to_string())
        .unwrap_or_default();

    let Some(main) = main_container(&doc) else {
        warn!("main/row not found or empty {page_id}");
        return Vec::new();
    };

    let mut role = s!();
    let mut out = Vec::new();

    for block in split_blocks(&paragraph_texts(main)) {
        for line in segment(&block) {
            match read_line(&line) {
                Line::Blank | Line::Noise => {}
                Line::Role(r) => role = r,
                Line::Editor { name, affiliation } => out.push(EditorRecord {
                    journal_id: s!(page_id),
                    journal_title: journal.clone(),
                    journal_subtitle: s!(),
                    editor_name: name,
                    affiliation,
                    role: role.clone(),
                }),
                Line::Unsplittable(l) => warn!("nothing to split found in {l}"),
            }
        }
    }

    debug!("{page_id}: {} editors", out.len());
    out
}

/// The single `.main-content` element, else the single `.row`; must carry text.
fn main_container(doc: &Html) -> Option<ElementRef<'_>> {
    let only_one = |sel: &Selector| {
        let mut it = doc.select(sel);
        match (it.next(), it.next()) {
            (Some(el), None) if !text_content(el).trim().is_empty() => Some(el),
            _ => None,
        }
    };
    only_one(&*MAIN_CONTENT).or_else(|| only_one(&*ROW))
}

/// Paragraph texts in document order. Table cells without their own `<p>`
/// count as paragraphs and follow the rest of their row.
fn paragraph_texts(main: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();
    collect_paragraphs(main, &mut out);
    out
}

fn collect_paragraphs(el: ElementRef<'_>, out: &mut Vec<String>) {
    for child in el.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "p" => out.push(text_content(child)),
            "tr" => {
                let mut bare = Vec::new();
                for cell in child.children().filter_map(ElementRef::wrap) {
                    if cell.value().name() == "td" && cell.select(&PARAGRAPH).next().is_none() {
                        bare.push(text_content(cell));
                    } else {
                        collect_paragraphs(cell, out);
                    }
                }
                out.extend(bare);
            }
            _ => collect_paragraphs(child, out),
        }
    }
}

/// Stripped paragraphs; blank lines inside one (from `<br><br>`) split it further.
fn split_blocks(paragraphs: &[String]) -> Vec<String> {
    let mut blocks = Vec::with_capacity(paragraphs.len());
    for par in paragraphs {
        let par = par.trim();
        if BLANK_LINE.is_match(par) {
            blocks.extend(BLANK_LINE_SPLIT.split(par).map(String::from));
        } else {
            blocks.push(s!(par));
        }
    }
    blocks
}

/// Split a block into lines. When most lines can't be split into
/// "name, affiliation" the block is an address: role lines stay separate,
/// everything else is joined with commas into one line.
pub fn segment(block: &str) -> Vec<String> {
    let lines: Vec<&str> = block.split('\n').collect();

    let nonsplittable = lines
        .iter()
        .filter(|l| !is_role_name(l))
        .filter(|l| {
            if !l.contains(',') && !l.contains('(') {
                return true;
            }
            let head = l.replace('(', ",");
            is_institution(head.split(',').next().unwrap_or(""))
                || LEADING_DIGITS.is_match(l)
        })
        .count();

    if nonsplittable * 2 < lines.len() || lines.len() >= MAX_MERGE_LINES {
        return lines.into_iter().map(String::from).collect();
    }

    let mut merged = Vec::new();
    let mut remaining = Vec::new();
    for line in lines {
        if is_role_name(line) {
            merged.push(s!(line));
        } else if !line.trim().is_empty() {
            remaining.push(line);
        }
    }
    if !remaining.is_empty() {
        merged.push(remaining.join(","));
    }
    merged
}

pub fn read_line(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if is_role_name(line) {
        return Line::Role(s!(trimmed));
    }

    // "Name (Institution)" reads as "Name, Institution"
    let line = match TRAILING_PARENS.captures(trimmed) {
        Some(c) if is_institution(&c[2]) => format!("{}, {}", &c[1], &c[2]),
        _ => s!(line),
    };

    match line.split_once(',') {
        Some((name, affiliation)) => Line::Editor {
            name: s!(name.trim()),
            affiliation: s!(affiliation.trim()),
        },
        None if is_person(&line) => Line::Editor { name: s!(line.trim()), affiliation: s!() },
        None if line.contains('@') => Line::Noise,
        None => Line::Unsplittable(line),
    }
}
