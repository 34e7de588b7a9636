//! # product_scraper
//!
//! Extracts product names and image URLs from a saved storefront HTML page
//! and writes them to a CSV file.
//!
//! ## Overview
//!
//! A run is a single sequential pass over the input:
//!
//! 1. [`BlockReader`] reads the file in fixed-size chunks and splits it into
//!    blocks at each occurrence of a literal sentinel (the markup that starts
//!    every product).
//! 2. An [`Extractor`] (by default [`RegexExtractor`]) pulls the name and
//!    image URL out of each block. Blocks missing either field are skipped
//!    and counted, not treated as errors.
//! 3. A [`ProductSink`] (by default [`CsvSink`]) writes one row per product
//!    under a `name,image_url` header, in document order.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use product_scraper::ScraperBuilder;
//!
//! # fn example() -> product_scraper::Result<()> {
//! let summary = ScraperBuilder::new("Videojuegos.html", "productos.csv")
//!     .chunk_size(4096)
//!     .build()?
//!     .run()?;
//!
//! println!("{} products, {} blocks skipped", summary.products, summary.skipped);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod product;
pub mod reader;
pub mod sink;

pub use config::{Config, ScraperBuilder};
pub use error::{Result, ScraperError};
pub use extract::{Extractor, RegexExtractor};
pub use pipeline::{RunSummary, Scraper};
pub use product::Product;
pub use reader::{Block, BlockReader};
pub use sink::{CsvSink, ProductSink};

/// Build a [`Scraper`] from `config` and run it once.
pub fn run(config: Config) -> Result<RunSummary> {
    ScraperBuilder::from_config(config).build()?.run()
}
