use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::info;

use crate::cli::Cli;
use crate::extract::extract_products;
use crate::progress::{Progress, TracingProgress};
use crate::reconcile::reconcile;
use crate::report::{build_report, digest_path, render_digest};
use crate::util::{utc_rfc3339_string, write_json_pretty, write_text_file};

/// Runs one comparison: extract both documents, reconcile, write the JSON
/// report and the text digest, echo the digest to stdout.
pub fn run(args: Cli) -> Result<()> {
    let compared_ts = Utc::now();
    let progress = TracingProgress;

    progress.phase(1, 3, "extracting products from old price list");
    let old_products = extract_products(&args.old_pdf, args.max_pages_per_doc, &progress);

    progress.phase(2, 3, "extracting products from new price list");
    let new_products = extract_products(&args.new_pdf, args.max_pages_per_doc, &progress);

    if old_products.is_empty() || new_products.is_empty() {
        bail!(
            "could not extract products from one or both price lists (old: {}, new: {})",
            args.old_pdf.display(),
            args.new_pdf.display()
        );
    }

    progress.phase(3, 3, "comparing products");
    let buckets = reconcile(&old_products, &new_products);

    let report = build_report(
        &args.old_pdf.display().to_string(),
        &args.new_pdf.display().to_string(),
        old_products.len(),
        new_products.len(),
        &utc_rfc3339_string(compared_ts),
        buckets,
    );

    write_json_pretty(&args.output, &report)?;
    info!(path = %args.output.display(), "wrote comparison report");

    let digest = render_digest(&report, compared_ts);
    let digest_file = digest_path(&args.output);
    write_text_file(&digest_file, &digest)?;
    info!(path = %digest_file.display(), "wrote comparison digest");

    write_summary_block(&digest)?;

    Ok(())
}

fn write_summary_block(digest: &str) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    output
        .write_all(digest.as_bytes())
        .context("failed to write summary block")?;
    output.flush().context("failed to flush summary block")?;
    Ok(())
}
