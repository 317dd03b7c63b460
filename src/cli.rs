use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pricetrack",
    version,
    about = "Wholesale price list extraction and comparison tooling"
)]
pub struct Cli {
    /// Previous version of the price list PDF.
    pub old_pdf: PathBuf,

    /// Current version of the price list PDF.
    pub new_pdf: PathBuf,

    /// Where the structured comparison report is written. The text digest
    /// lands next to it with a `_summary.txt` suffix.
    #[arg(long, default_value = "results/comparison_result.json")]
    pub output: PathBuf,

    /// Stop reading each PDF after this many pages.
    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,
}
