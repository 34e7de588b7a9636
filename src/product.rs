//! The [`Product`] record extracted from one block of HTML.

use serde::Serialize;

/// A product's name and image URL, as written to one CSV row.
///
/// Field order and names define the CSV header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: String,
    pub image_url: String,
}

impl Product {
    /// Header row written once at the top of every CSV.
    pub const HEADER: [&'static str; 2] = ["name", "image_url"];

    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}
