// src/specs/wiley/classify.rs
//
// Line classifiers for Wiley board text. Rough by nature: word lists, not a
// grammar. Each takes one raw line and answers a yes/no question.

const PERSON_TITLES: &[&str] = &["Prof", "Professor", "Dr", "DPhil", "PhD", "MD", "Mr", "Mrs"];

const INSTITUTION_WORDS: &[&str] = &[
    "university",
    "department",
    "dept",
    "institution",
    "hospital",
    "college",
    "school",
    "institute",
    "center",
];

const ROLE_NAMES: &[&str] = &[
    "advisory board",
    "advisory editor",
    "articles editor",
    "associate editor",
    "associate managing editor",
    "board of field editor",
    "chair of the international editorial board",
    "consulting editor",
    "decision editor",
    "deputy editor",
    "deputy editor for science",
    "deputy editors in chief",
    "deputy editors-in-chief",
    "editor",
    "editorial board",
    "editor in chief",
    "editor-in-chief",
    "editors-in-chief",
    "editorial advisory board",
    "editorial assistant",
    "editorial coordinator",
    "editorial manager",
    "editorial office",
    "editorial secretary",
    "emeritus editor",
    "executive editor",
    "executive editors-in-chief",
    "field editor",
    "former editor",
    "founding editor",
    "honorary advisory board",
    "honorary editor-in-chief",
    "international executive advisory board",
    "journal editorial board",
    "journal manager",
    "managing editor",
    "members of the editorial board",
    "past editors-in-chief",
    "peer-review coordinator",
    "president",
    "production editor",
    "publisher",
    "reviews editor",
    "reviewing editor",
    "scientific editor",
    "scientific advisory board",
    "section editor",
    "senior editor",
    "trainee advisory board",
    "vice president",
];

/// An academic title as the first or last word: "Prof. A. Smith", "A. Smith PhD".
pub fn is_person(text: &str) -> bool {
    let text = text.trim();
    let first = text.split(' ').next().unwrap_or("").replace('.', "");
    let last = text.split(' ').next_back().unwrap_or("").replace('.', "");
    PERSON_TITLES.contains(&first.as_str()) || PERSON_TITLES.contains(&last.as_str())
}

pub fn is_institution(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    INSTITUTION_WORDS.iter().any(|w| text.contains(w))
}

/// A heading such as "Associate Editors:" or "Editorial Board."
pub fn is_role_name(text: &str) -> bool {
    let text = text
        .trim_matches(|c: char| c.is_whitespace() || c == ':')
        .to_lowercase();
    // one trailing ':' or '.', then one plural 's'
    let text = text.strip_suffix([':', '.']).unwrap_or(&text);
    let text = text.strip_suffix('s').unwrap_or(text);
    ROLE_NAMES.contains(&text)
}
