// src/deck/audit.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use glob::{glob, Pattern};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

use crate::deck::columns::{is_canonical, normalize, CANONICAL_ORDER};

/// File-name pattern for the German card decks.
pub const DECK_PATTERN: &str = "hitster-de*.csv";

/// Header audit of one deck CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditResult {
    pub path: PathBuf,
    /// Header cells exactly as read (BOM stripped).
    pub columns: Vec<String>,
    /// `columns` mapped through [`normalize`].
    pub normalized: Vec<String>,
}

impl AuditResult {
    pub fn from_header(path: impl Into<PathBuf>, columns: Vec<String>) -> Self {
        let normalized = columns.iter().map(|c| normalize(c)).collect();
        Self {
            path: path.into(),
            columns,
            normalized,
        }
    }

    pub fn has_year(&self) -> bool {
        self.normalized.iter().any(|c| c == "Year")
    }

    /// Canonical columns absent from the header, in canonical order.
    pub fn missing_canonical(&self) -> Vec<&'static str> {
        CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|canonical| !self.normalized.iter().any(|c| c == canonical))
            .collect()
    }

    /// Normalized columns that are not canonical, in header order.
    pub fn extra_columns(&self) -> Vec<&str> {
        self.normalized
            .iter()
            .map(String::as_str)
            .filter(|c| !is_canonical(c))
            .collect()
    }
}

/// Read only the header row of `path`. `Ok(None)` means the file has no rows.
#[instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn audit_file(path: &Path) -> Result<Option<AuditResult>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let header = match rdr.records().next() {
        Some(record) => record.with_context(|| format!("reading header of {}", path.display()))?,
        None => {
            debug!("no rows");
            return Ok(None);
        }
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == 0 {
                cell.trim_start_matches('\u{feff}').to_string()
            } else {
                cell.to_string()
            }
        })
        .collect();
    debug!(columns = columns.len(), "read header");

    Ok(Some(AuditResult::from_header(path, columns)))
}

/// Every deck CSV under `root`, recursively, sorted by path.
pub fn discover_csvs(root: &Path) -> Result<Vec<PathBuf>> {
    let root = Pattern::escape(&root.display().to_string());
    let pattern = format!("{}/**/{}", root, DECK_PATTERN);
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Multi-line report block for one file, with its path shown relative to `root`.
pub fn format_result(result: &AuditResult, root: &Path) -> String {
    let relative = result.path.strip_prefix(root).unwrap_or(&result.path);
    let mut pieces = vec![format!("File: {}", relative.display())];
    pieces.push(format!("  Columns: {}", result.columns.join(", ")));
    pieces.push(format!(
        "  Has Year column: {}",
        if result.has_year() { "yes" } else { "no" }
    ));

    let missing = result.missing_canonical();
    if !missing.is_empty() {
        pieces.push(format!("  Missing canonical columns: {}", missing.join(", ")));
    }
    let extra = result.extra_columns();
    if !extra.is_empty() {
        pieces.push(format!("  Extra columns: {}", extra.join(", ")));
    }
    pieces.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::BTreeSet, fs};
    use tempfile::tempdir;

    #[test]
    fn audit_reads_header_and_strips_bom() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("hitster-de-aaaa0001.csv");
        fs::write(
            &path,
            "\u{feff}Card#,Title,Artist,Year,URL\n1,Song,Band,1999,https://x\n",
        )?;

        let result = audit_file(&path)?.expect("header row");
        assert_eq!(result.columns, vec!["Card#", "Title", "Artist", "Year", "URL"]);
        assert!(result.has_year());
        assert_eq!(
            result.missing_canonical(),
            vec!["Hashed Info", "Youtube-Title", "ISRC"]
        );
        assert!(result.extra_columns().is_empty());
        Ok(())
    }

    #[test]
    fn empty_file_is_skipped_not_failed() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("hitster-de-empty.csv");
        fs::write(&path, "")?;
        assert!(audit_file(&path)?.is_none());
        Ok(())
    }

    #[test]
    fn missing_and_present_cover_the_canonical_set() {
        let headers = [
            vec!["Card Number", "title", "Spotify"],
            vec![" YEAR ", "Hash-Info", "youtube", "isrc", "Card#"],
            vec![],
        ];
        for header in headers {
            let result = AuditResult::from_header(
                "deck.csv",
                header.iter().map(|s| s.to_string()).collect(),
            );
            let mut covered: BTreeSet<&str> = result.missing_canonical().into_iter().collect();
            for c in &result.normalized {
                if is_canonical(c) {
                    covered.insert(c.as_str());
                }
            }
            let canonical: BTreeSet<&str> = CANONICAL_ORDER.iter().copied().collect();
            assert_eq!(covered, canonical);
            assert!(result.extra_columns().iter().all(|c| !is_canonical(c)));
        }
    }

    #[test]
    fn extra_columns_keep_header_order() {
        let result = AuditResult::from_header(
            "deck.csv",
            vec!["Spotify".into(), "Title".into(), " Album ".into()],
        );
        assert_eq!(result.extra_columns(), vec!["Spotify", "Album"]);
        assert!(!result.has_year());
    }

    #[test]
    fn discover_finds_decks_recursively_sorted() -> Result<()> {
        let tmp = tempdir()?;
        fs::create_dir_all(tmp.path().join("decks/nested"))?;
        fs::write(tmp.path().join("decks/nested/hitster-de-b.csv"), "Title\n")?;
        fs::write(tmp.path().join("hitster-de-a.csv"), "Title\n")?;
        fs::write(tmp.path().join("hitster-nl-a.csv"), "Title\n")?;
        fs::write(tmp.path().join("hitster-de-a.json"), "{}")?;

        let found = discover_csvs(tmp.path())?;
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("decks/nested/hitster-de-b.csv"),
                PathBuf::from("hitster-de-a.csv"),
            ]
        );
        Ok(())
    }

    #[test]
    fn format_result_lists_missing_and_extra() {
        let root = Path::new("/data");
        let result = AuditResult::from_header(
            "/data/decks/hitster-de.csv",
            vec!["Card#".into(), "Title".into(), "Spotify".into()],
        );
        let text = format_result(&result, root);
        assert_eq!(
            text,
            "File: decks/hitster-de.csv\n\
             \x20 Columns: Card#, Title, Spotify\n\
             \x20 Has Year column: no\n\
             \x20 Missing canonical columns: Artist, Year, URL, Hashed Info, Youtube-Title, ISRC\n\
             \x20 Extra columns: Spotify"
        );
    }
}
