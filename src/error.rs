//! Error types for the `product_scraper` crate.

/// All errors that can abort a scraping run.
///
/// Extraction mismatches are not errors: blocks that do not yield a product
/// are skipped and counted in [`RunSummary`](crate::RunSummary).
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    /// The input HTML could not be opened, read, or decoded as UTF-8.
    #[error("Input read failed: {0}")]
    Input(std::io::Error),

    /// The output CSV (or its parent directory) could not be created.
    #[error("Output write failed: {0}")]
    Output(std::io::Error),

    /// A CSV row could not be serialized or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An extraction pattern is not a valid regular expression.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, ScraperError>`.
pub type Result<T> = std::result::Result<T, ScraperError>;
