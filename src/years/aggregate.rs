// src/years/aggregate.rs
use serde_json::Value;

use crate::report::Tally;
use crate::years::classify::looks_like_year;

/// Field names that conventionally hold a release year or date.
pub const CANDIDATE_KEYS: &[&str] = &[
    "year",
    "release_year",
    "releaseyear",
    "release_date",
    "releasedate",
    "published",
    "published_at",
    "date",
    "upload_date",
];

/// Year coverage of one file (or of a whole dataset once merged).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub rows: usize,
    pub rows_with_year: usize,
    /// Field-name hits; may sum to more than `rows_with_year`.
    pub key_hits: Tally,
}

impl FileStats {
    pub fn merge(&mut self, other: &FileStats) {
        self.rows += other.rows;
        self.rows_with_year += other.rows_with_year;
        self.key_hits.merge(&other.key_hits);
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn is_candidate(norm: &str) -> bool {
    CANDIDATE_KEYS.contains(&norm) || norm.contains("year") || norm.contains("date")
}

/// Count rows and year hits over `rows`, skipping anything that is not an object.
///
/// Each row is scanned twice at most: first every date-ish field is tested and
/// each hit is tallied; only if none hit, the remaining fields are scanned in
/// order and the first year-like one is tallied.
pub fn inspect_rows(rows: &[Value]) -> FileStats {
    let mut stats = FileStats::default();

    for row in rows {
        let Some(fields) = row.as_object() else {
            continue;
        };
        stats.rows += 1;

        let mut found = false;
        for (key, value) in fields {
            let norm = normalize_key(key);
            if is_candidate(&norm) && looks_like_year(value) {
                stats.key_hits.incr(&norm);
                found = true;
            }
        }

        if !found {
            if let Some((key, _)) = fields.iter().find(|(_, v)| looks_like_year(v)) {
                stats.key_hits.incr(&normalize_key(key));
                found = true;
            }
        }

        if found {
            stats.rows_with_year += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_field_counts_in_first_pass() {
        let stats = inspect_rows(&[json!({"release_year": "1995", "title": "X"})]);
        assert_eq!(stats.rows, 1);
        assert_eq!(stats.rows_with_year, 1);
        assert_eq!(stats.key_hits.get("release_year"), 1);
        assert_eq!(stats.key_hits.len(), 1);
    }

    #[test]
    fn fallback_picks_first_year_like_field() {
        let stats = inspect_rows(&[json!({"title": "X", "note": "recorded 1995", "extra": "2001"})]);
        assert_eq!(stats.rows_with_year, 1);
        assert_eq!(stats.key_hits.get("note"), 1);
        assert_eq!(stats.key_hits.get("extra"), 0);
    }

    #[test]
    fn fallback_skipped_when_named_field_hits() {
        let stats = inspect_rows(&[json!({"note": "recorded 1995", "Year ": "1996"})]);
        assert_eq!(stats.key_hits.get("year"), 1);
        assert_eq!(stats.key_hits.get("note"), 0);
    }

    #[test]
    fn multiple_named_hits_count_row_once() {
        let stats = inspect_rows(&[json!({"year": "1999", "release_date": "1999-05-01", "uploadDate": "2010"})]);
        assert_eq!(stats.rows_with_year, 1);
        assert_eq!(stats.key_hits.total(), 3);
        assert_eq!(stats.key_hits.get("uploaddate"), 1);
    }

    #[test]
    fn rows_without_years_and_non_objects() {
        let stats = inspect_rows(&[
            json!({"title": "Song Title", "year": ""}),
            json!("1999"),
            json!(null),
            json!([{"year": "1999"}]),
        ]);
        assert_eq!(stats.rows, 1);
        assert_eq!(stats.rows_with_year, 0);
        assert!(stats.key_hits.is_empty());
    }

    #[test]
    fn merge_adds_up() {
        let mut total = inspect_rows(&[json!({"year": "2001"}), json!({"year": "bad"})]);
        total.merge(&inspect_rows(&[json!({"date": "2002"})]));
        assert_eq!(total.rows, 3);
        assert_eq!(total.rows_with_year, 2);
        assert_eq!(total.key_hits.get("year"), 1);
        assert_eq!(total.key_hits.get("date"), 1);
    }
}
