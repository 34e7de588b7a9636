//! Run configuration and the builder that turns it into a [`Scraper`].

use std::path::PathBuf;

use crate::error::{Result, ScraperError};
use crate::extract::{Extractor, RegexExtractor};
use crate::pipeline::Scraper;

/// Bytes requested from the input per read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Literal marking the start of each product on the storefront listing.
pub const DEFAULT_SENTINEL: &str = r#"<div class="product-layout"#;

/// Product name, taken from the `data-name` attribute.
pub const DEFAULT_NAME_PATTERN: &str = r#"data-name="([^"]+)""#;

/// Image URL patterns, in order of preference: the absolute lazy-load URL,
/// then the relative path of a locally saved page.
pub const DEFAULT_IMAGE_PATTERNS: [&str; 2] = [
    r#"data-src="(https?://[^"]+\.png)""#,
    r#"src="(\./[^"]+\.png)""#,
];

/// Number of products kept in [`RunSummary::preview`](crate::RunSummary::preview).
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Everything a run needs, passed explicitly into the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub chunk_size: usize,
    pub sentinel: String,
    pub name_pattern: String,
    /// Tried in order; the first pattern that matches supplies the URL.
    pub image_patterns: Vec<String>,
    pub preview_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("products.html"),
            output_path: PathBuf::from("products.csv"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            sentinel: DEFAULT_SENTINEL.to_string(),
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            image_patterns: DEFAULT_IMAGE_PATTERNS.map(String::from).to_vec(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl Config {
    /// Default configuration reading `input_path` and writing `output_path`.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Check the settings that cannot be caught by pattern compilation.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ScraperError::Config("chunk size must be at least 1".into()));
        }
        if self.sentinel.is_empty() {
            return Err(ScraperError::Config("sentinel must not be empty".into()));
        }
        if self.image_patterns.is_empty() {
            return Err(ScraperError::Config(
                "at least one image pattern is required".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for configuring a [`Scraper`].
///
/// # Example
///
/// ```rust,no_run
/// use product_scraper::ScraperBuilder;
///
/// # fn example() -> product_scraper::Result<()> {
/// let summary = ScraperBuilder::new("listing.html", "out/products.csv")
///     .chunk_size(16 * 1024)
///     .sentinel(r#"<li class="product""#)
///     .name_pattern(r#"title="([^"]+)""#)
///     .image_pattern(r#"data-src="([^"]+)""#)
///     .add_image_pattern(r#"src="([^"]+)""#)
///     .build()?
///     .run()?;
/// println!("{} products", summary.products);
/// # Ok(())
/// # }
/// ```
pub struct ScraperBuilder {
    config: Config,
    extractor: Option<Box<dyn Extractor>>,
}

impl ScraperBuilder {
    /// Create a builder with default patterns for the given paths.
    ///
    /// Defaults: chunk size 4096, the storefront sentinel and patterns, and a
    /// preview of 5 products.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self::from_config(Config::new(input_path, output_path))
    }

    /// Start from an existing [`Config`].
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            extractor: None,
        }
    }

    /// Bytes requested from the input per read.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Literal substring that starts each product block.
    pub fn sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.config.sentinel = sentinel.into();
        self
    }

    pub fn name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.name_pattern = pattern.into();
        self
    }

    /// Replace all image patterns with a single one.
    pub fn image_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.image_patterns = vec![pattern.into()];
        self
    }

    /// Append a fallback image pattern, tried after the existing ones.
    pub fn add_image_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.image_patterns.push(pattern.into());
        self
    }

    /// Number of products to keep for the run summary preview.
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.config.preview_limit = limit;
        self
    }

    /// Use a custom [`Extractor`] instead of the configured patterns.
    pub fn extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// The configuration as currently set.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate the configuration, compile the patterns, and return the
    /// [`Scraper`].
    pub fn build(self) -> Result<Scraper> {
        self.config.validate()?;
        let extractor = match self.extractor {
            Some(extractor) => extractor,
            None => Box::new(RegexExtractor::try_new(
                &self.config.name_pattern,
                self.config.image_patterns.clone(),
            )?),
        };
        Ok(Scraper::new(self.config, extractor))
    }
}
