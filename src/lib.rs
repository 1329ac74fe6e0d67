pub mod deck;
pub mod logging;
pub mod report;
pub mod years;
