//! Field extraction from product blocks.

use regex::Regex;

use crate::product::Product;

/// Trait for turning one block of HTML into a [`Product`].
///
/// Returning `None` means the block is not a product (or lacks a field) and
/// is skipped by the pipeline without raising an error.
pub trait Extractor {
    fn extract(&self, block: &str) -> Option<Product>;
}

/// Extractor that finds the name and image URL with regular expressions.
///
/// The first match of the name pattern is used. Image patterns are tried in
/// order and the first one that matches wins, so later patterns act as
/// fallbacks; an empty match also falls through to the next pattern. When a
/// pattern has a capture group, group 1 is the value (a match where group 1
/// did not participate counts as no match); otherwise the whole match is.
///
/// # Example
///
/// ```
/// use product_scraper::{Extractor, RegexExtractor};
///
/// let extractor = RegexExtractor::new(r#"name="([^"]+)""#, vec![r#"img="([^"]+)""#]);
/// let product = extractor.extract(r#"<div name="Controller X" img="ctrl.png">"#).unwrap();
/// assert_eq!(product.name, "Controller X");
/// assert_eq!(product.image_url, "ctrl.png");
/// ```
pub struct RegexExtractor {
    name: Regex,
    images: Vec<Regex>,
}

impl RegexExtractor {
    /// Create a new `RegexExtractor` from a name pattern and image patterns.
    ///
    /// # Panics
    ///
    /// Panics if any pattern is invalid. Use [`try_new`](Self::try_new) for a
    /// fallible alternative.
    pub fn new(name: &str, images: Vec<&str>) -> Self {
        Self::try_new(name, images).expect("invalid regex pattern")
    }

    /// Fallible constructor that returns a [`regex::Error`] for invalid patterns.
    pub fn try_new<S: AsRef<str>>(name: &str, images: Vec<S>) -> Result<Self, regex::Error> {
        let images = images
            .iter()
            .map(|pattern| Regex::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: Regex::new(name)?,
            images,
        })
    }
}

/// First match of `re` in `text`: capture group 1 if the pattern has one,
/// else the whole match. `None` when group 1 exists but did not participate.
fn first_match<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    let caps = re.captures(text)?;
    let group = if re.captures_len() > 1 { 1 } else { 0 };
    caps.get(group).map(|m| m.as_str())
}

impl Extractor for RegexExtractor {
    fn extract(&self, block: &str) -> Option<Product> {
        let name = first_match(&self.name, block)?.trim();
        if name.is_empty() {
            return None;
        }
        let image_url = self
            .images
            .iter()
            .find_map(|re| first_match(re, block).filter(|url| !url.is_empty()))?;
        Some(Product::new(name, image_url))
    }
}
