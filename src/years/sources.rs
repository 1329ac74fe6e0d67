// src/years/sources.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::debug;

/// Anything that can turn a file into a list of candidate rows.
///
/// Rows are returned as-is; non-object rows are filtered later by the aggregator.
pub trait RowSource {
    fn read_rows(&self, path: &Path) -> Result<Vec<Value>>;
}

/// Supported dataset file kinds, keyed by lowercased extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    Jsonl,
    Csv,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn source(self) -> &'static dyn RowSource {
        match self {
            Self::Json => &JsonSource,
            Self::Jsonl => &JsonlSource,
            Self::Csv => &CsvSource,
        }
    }
}

/// A whole JSON document: a bare list, or an object with a `songs` list.
pub struct JsonSource;

impl JsonSource {
    pub fn rows_from_document(doc: Value) -> Vec<Value> {
        match doc {
            Value::Array(rows) => rows,
            Value::Object(mut obj) => match obj.remove("songs") {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

impl RowSource for JsonSource {
    fn read_rows(&self, path: &Path) -> Result<Vec<Value>> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let doc: Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON document {}", path.display()))?;
        Ok(Self::rows_from_document(doc))
    }
}

/// One JSON value per line; blank and unparsable lines are skipped.
pub struct JsonlSource;

impl RowSource for JsonlSource {
    fn read_rows(&self, path: &Path) -> Result<Vec<Value>> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut rows = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("reading line {} of {}", idx + 1, path.display()))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => rows.push(value),
                Err(e) => debug!(path = %path.display(), line = idx + 1, error = %e, "skipping malformed line"),
            }
        }
        Ok(rows)
    }
}

/// Header-driven CSV: each data record becomes an object keyed by header name.
pub struct CsvSource;

impl RowSource for CsvSource {
    fn read_rows(&self, path: &Path) -> Result<Vec<Value>> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading CSV header of {}", path.display()))?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record
                .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
            let mut row = Map::with_capacity(headers.len());
            // short records pad with null; surplus cells are dropped
            for (i, header) in headers.iter().enumerate() {
                let cell = record
                    .get(i)
                    .map_or(Value::Null, |s| Value::String(s.to_string()));
                row.insert(header.clone(), cell);
            }
            rows.push(Value::Object(row));
        }
        Ok(rows)
    }
}
