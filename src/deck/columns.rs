// src/deck/columns.rs

/// Expected card-deck columns, in report order.
pub const CANONICAL_ORDER: &[&str] = &[
    "Card#",
    "Title",
    "Artist",
    "Year",
    "URL",
    "Hashed Info",
    "Youtube-Title",
    "ISRC",
];

/// Squashed header spelling → canonical column.
///
/// Keys are already lowercased with spaces and hyphens removed.
pub const ALIASES: &[(&str, &str)] = &[
    ("card#", "Card#"),
    ("cardnumber", "Card#"),
    ("cardno", "Card#"),
    ("card", "Card#"),
    ("title", "Title"),
    ("artist", "Artist"),
    ("year", "Year"),
    ("url", "URL"),
    ("hashedinfo", "Hashed Info"),
    ("hashinfo", "Hashed Info"),
    ("youtube-title", "Youtube-Title"),
    ("youtubetitle", "Youtube-Title"),
    ("youtube", "Youtube-Title"),
    ("isrc", "ISRC"),
];

fn squash(column: &str) -> String {
    column
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Canonical name for `column`, if any alias matches.
pub fn canonical_for(column: &str) -> Option<&'static str> {
    let key = squash(column);
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Map a raw header to its canonical name; unknown headers come back trimmed.
pub fn normalize(column: &str) -> String {
    match canonical_for(column) {
        Some(canonical) => canonical.to_string(),
        None => column.trim().to_string(),
    }
}

pub fn is_canonical(column: &str) -> bool {
    CANONICAL_ORDER.contains(&column)
}
