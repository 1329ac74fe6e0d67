pub mod audit;
pub mod columns;

pub use audit::{audit_file, discover_csvs, format_result, AuditResult, DECK_PATTERN};
pub use columns::{canonical_for, normalize, ALIASES, CANONICAL_ORDER};
