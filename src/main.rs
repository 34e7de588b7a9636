use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use product_scraper::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_NAME_PATTERN, DEFAULT_PREVIEW_LIMIT, DEFAULT_SENTINEL,
};
use product_scraper::{Product, RunSummary, ScraperBuilder};

#[derive(Parser)]
#[command(
    name = "product_scraper",
    about = "Extract product names and image URLs from a saved storefront page into CSV"
)]
struct Cli {
    /// Saved HTML page to read
    #[arg(short, long, default_value = "products.html")]
    input: PathBuf,

    /// CSV file to write (overwritten on every run)
    #[arg(short, long, default_value = "products.csv")]
    output: PathBuf,

    /// Bytes read from the input per call
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Literal markup that starts every product
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    sentinel: String,

    /// Regex for the product name (capture group 1 if present)
    #[arg(long, default_value = DEFAULT_NAME_PATTERN)]
    name_pattern: String,

    /// Regex for the image URL; repeat to add fallbacks (replaces the defaults)
    #[arg(long = "image-pattern")]
    image_patterns: Vec<String>,

    /// Number of products to show after the run
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
    preview: usize,

    /// Exit with status 1 when no product was extracted
    #[arg(long)]
    require_products: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();

    let mut builder = ScraperBuilder::new(&cli.input, &cli.output)
        .chunk_size(cli.chunk_size)
        .sentinel(cli.sentinel)
        .name_pattern(cli.name_pattern)
        .preview_limit(cli.preview);
    let mut patterns = cli.image_patterns.into_iter();
    if let Some(first) = patterns.next() {
        builder = builder.image_pattern(first);
        for pattern in patterns {
            builder = builder.add_image_pattern(pattern);
        }
    }

    let summary = builder.build()?.run()?;

    print_stats(&summary, &cli.output);
    print_preview(&summary.preview);
    println!("Done in {:.2?}", t0.elapsed());

    if cli.require_products && summary.products == 0 {
        eprintln!("No products extracted");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_stats(summary: &RunSummary, output: &std::path::Path) {
    println!();
    println!("Product blocks: {}", summary.blocks);
    println!("Products:       {}", summary.products);
    println!("Skipped:        {}", summary.skipped);
    println!("CSV:            {}", output.display());
    println!();
}

fn print_preview(preview: &[Product]) {
    if preview.is_empty() {
        return;
    }
    println!("First {} products:", preview.len());
    for (i, product) in preview.iter().enumerate() {
        println!("{:>3}. {}", i + 1, truncate(&product.name, 70));
        println!("     {}", truncate(&product.image_url, 63));
    }
    println!();
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Headset Y", 70), "Headset Y");
    }

    #[test]
    fn truncate_marks_cut() {
        let long = "x".repeat(80);
        let short = truncate(&long, 70);
        assert_eq!(short.chars().count(), 70);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn cli_collects_repeated_image_patterns() {
        let cli = Cli::parse_from([
            "product_scraper",
            "--image-pattern",
            "a=(.+)",
            "--image-pattern",
            "b=(.+)",
        ]);
        assert_eq!(cli.image_patterns, ["a=(.+)", "b=(.+)"]);
        assert_eq!(cli.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(!cli.require_products);
    }

    #[test]
    fn help_is_reported_by_the_parser() {
        let err = Cli::try_parse_from(["product_scraper", "--help"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
