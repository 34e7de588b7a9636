//! Destinations for extracted products.
//!
//! The crate ships with [`CsvSink`], which writes the `name,image_url` CSV.
//! Implement [`ProductSink`] to send products somewhere else.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Result, ScraperError};
use crate::product::Product;

/// Trait for destinations that receive products in document order.
///
/// # Implementing a custom sink
///
/// ```
/// use product_scraper::{Product, ProductSink, Result};
///
/// struct Collect(Vec<Product>);
///
/// impl ProductSink for Collect {
///     fn write(&mut self, product: &Product) -> Result<()> {
///         self.0.push(product.clone());
///         Ok(())
///     }
///
///     fn finish(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait ProductSink {
    /// Record one product.
    fn write(&mut self, product: &Product) -> Result<()>;

    /// Flush anything buffered. Called once after the last product.
    fn finish(&mut self) -> Result<()>;
}

/// Sink that writes one CSV row per product after a `name,image_url` header.
///
/// Fields containing commas, quotes or line breaks are quoted, with embedded
/// quotes doubled.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Create (or truncate) the CSV at `path` and write the header.
    ///
    /// Missing parent directories are created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ScraperError::Output)?;
            }
        }
        let file = File::create(path).map_err(ScraperError::Output)?;
        tracing::debug!("Created {}", path.display());
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap any writer and write the header.
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(Product::HEADER)?;
        Ok(Self { writer })
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| {
                let err = e.error();
                ScraperError::Output(io::Error::new(err.kind(), err.to_string()))
            })
    }
}

impl<W: Write> ProductSink for CsvSink<W> {
    fn write(&mut self, product: &Product) -> Result<()> {
        self.writer.serialize(product)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(ScraperError::Output)
    }
}
