//! The read → extract → write loop.

use std::fs::File;
use std::io::Read;

use crate::config::Config;
use crate::error::{Result, ScraperError};
use crate::extract::Extractor;
use crate::product::Product;
use crate::reader::BlockReader;
use crate::sink::{CsvSink, ProductSink};

/// Counts and sample output of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Product blocks seen, i.e. sentinel occurrences.
    pub blocks: usize,
    /// Products written.
    pub products: usize,
    /// Product blocks that did not yield both fields.
    pub skipped: usize,
    /// The first products written, up to the configured preview limit.
    pub preview: Vec<Product>,
}

/// A configured scraping pipeline, created by
/// [`ScraperBuilder::build`](crate::ScraperBuilder::build).
pub struct Scraper {
    config: Config,
    extractor: Box<dyn Extractor>,
}

impl Scraper {
    pub(crate) fn new(config: Config, extractor: Box<dyn Extractor>) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the configured input and write the configured CSV.
    ///
    /// The input is opened before the output is touched, so a missing input
    /// leaves no output behind. The CSV is overwritten on every run.
    pub fn run(&self) -> Result<RunSummary> {
        let input = &self.config.input_path;
        let output = &self.config.output_path;
        tracing::info!(
            "Scraping {} into {} (chunk size {} bytes)",
            input.display(),
            output.display(),
            self.config.chunk_size
        );

        let file = File::open(input).map_err(ScraperError::Input)?;
        let mut sink = CsvSink::create(output)?;
        let summary = self.process(file, &mut sink)?;

        tracing::info!(
            "Wrote {} products to {} ({} blocks, {} skipped)",
            summary.products,
            output.display(),
            summary.blocks,
            summary.skipped
        );
        Ok(summary)
    }

    /// Split `input` into blocks, extract a product from each, and hand the
    /// products to `sink` in document order.
    ///
    /// The text before the first sentinel is never a product and is not
    /// counted. Blocks without both fields are skipped and counted.
    pub fn process<R: Read, S: ProductSink + ?Sized>(
        &self,
        input: R,
        sink: &mut S,
    ) -> Result<RunSummary> {
        let blocks = BlockReader::new(
            input,
            self.config.sentinel.as_bytes(),
            self.config.chunk_size,
        )?;
        let mut summary = RunSummary::default();

        for block in blocks {
            let block = block?;
            if !block.leading {
                tracing::trace!("Ignoring {} byte preamble", block.text.len());
                continue;
            }
            summary.blocks += 1;

            let Some(product) = self.extractor.extract(&block.text) else {
                summary.skipped += 1;
                tracing::debug!(
                    "Skipped block {} at byte {}: name or image not found",
                    block.index,
                    block.offset
                );
                continue;
            };

            sink.write(&product)?;
            summary.products += 1;
            tracing::debug!("[{:3}] {}", summary.products, product.name);
            if summary.preview.len() < self.config.preview_limit {
                summary.preview.push(product);
            }
        }

        sink.finish()?;
        if summary.products == 0 {
            tracing::warn!("No products extracted from {} blocks", summary.blocks);
        }
        Ok(summary)
    }
}
