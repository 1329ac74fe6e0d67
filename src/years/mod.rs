pub mod aggregate;
pub mod classify;
pub mod sources;
pub mod walk;

pub use aggregate::{inspect_rows, FileStats, CANDIDATE_KEYS};
pub use classify::{looks_like_year, str_looks_like_year};
pub use sources::{CsvSource, JsonSource, JsonlSource, RowSource, SourceKind};
pub use walk::{inspect_dataset, inspect_file, iter_data_files, DatasetReport, Outcome};
