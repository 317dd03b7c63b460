use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::model::{ComparisonMetadata, ComparisonReport, ComparisonSummary};
use crate::reconcile::ReconciledBuckets;
use crate::util::utc_display_string;

/// Assembles the serializable report. Unchanged products contribute only
/// their count; the other four buckets move into the detail collections.
pub fn build_report(
    old_source: &str,
    new_source: &str,
    old_count: usize,
    new_count: usize,
    compared_at: &str,
    buckets: ReconciledBuckets,
) -> ComparisonReport {
    let summary = ComparisonSummary {
        newly_added_count: buckets.newly_added.len(),
        price_increased_count: buckets.price_increased.len(),
        price_decreased_count: buckets.price_decreased.len(),
        stock_out_count: buckets.stock_out.len(),
        unchanged_count: buckets.unchanged.len(),
    };

    ComparisonReport {
        metadata: ComparisonMetadata {
            old_pdf: old_source.to_string(),
            new_pdf: new_source.to_string(),
            comparison_date: compared_at.to_string(),
            old_pdf_total_products: old_count,
            new_pdf_total_products: new_count,
            summary,
        },
        newly_added_products: buckets.newly_added,
        price_increased_products: buckets.price_increased,
        price_decreased_products: buckets.price_decreased,
        stock_out_products: buckets.stock_out,
    }
}

/// Path of the text digest, next to the structured report: same directory,
/// file stem plus `_summary.txt`.
pub fn digest_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("comparison_result");
    output.with_file_name(format!("{stem}_summary.txt"))
}

pub fn render_digest(report: &ComparisonReport, compared_ts: DateTime<Utc>) -> String {
    let metadata = &report.metadata;
    let summary = &metadata.summary;

    let mut digest = String::new();
    digest.push_str("PRICE LIST COMPARISON SUMMARY\n");
    digest.push_str(&"=".repeat(80));
    digest.push_str("\n\n");
    digest.push_str(&format!(
        "Old PDF: {} ({} products)\n",
        metadata.old_pdf, metadata.old_pdf_total_products
    ));
    digest.push_str(&format!(
        "New PDF: {} ({} products)\n",
        metadata.new_pdf, metadata.new_pdf_total_products
    ));
    digest.push_str(&format!(
        "Comparison Date: {}\n\n",
        utc_display_string(compared_ts)
    ));
    digest.push_str(&format!(
        "Newly Added: {} products\n",
        summary.newly_added_count
    ));
    digest.push_str(&format!(
        "Price Increased: {} products\n",
        summary.price_increased_count
    ));
    digest.push_str(&format!(
        "Price Decreased: {} products\n",
        summary.price_decreased_count
    ));
    digest.push_str(&format!("Stock Out: {} products\n", summary.stock_out_count));
    digest.push_str(&format!("Unchanged: {} products\n", summary.unchanged_count));

    digest
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::ProductRecord;

    fn record(brand: &str, name: &str) -> ProductRecord {
        ProductRecord {
            brand: brand.to_string(),
            product_name: name.to_string(),
            wholesale_price: "10.00".to_string(),
            wholesale_price_for_you: "9.00".to_string(),
            page: 1,
        }
    }

    fn sample_buckets() -> ReconciledBuckets {
        ReconciledBuckets {
            newly_added: vec![record("B", "added")],
            stock_out: vec![record("A", "gone")],
            unchanged: vec![record("A", "kept"), record("A", "also kept")],
            ..ReconciledBuckets::default()
        }
    }

    #[test]
    fn build_report_counts_every_bucket() {
        let report = build_report(
            "old.pdf",
            "new.pdf",
            3,
            3,
            "2026-08-07T12:00:00Z",
            sample_buckets(),
        );

        let summary = &report.metadata.summary;
        assert_eq!(summary.newly_added_count, 1);
        assert_eq!(summary.price_increased_count, 0);
        assert_eq!(summary.price_decreased_count, 0);
        assert_eq!(summary.stock_out_count, 1);
        assert_eq!(summary.unchanged_count, 2);

        assert_eq!(report.metadata.old_pdf, "old.pdf");
        assert_eq!(report.metadata.old_pdf_total_products, 3);
        assert_eq!(report.newly_added_products.len(), 1);
        assert_eq!(report.stock_out_products.len(), 1);
    }

    #[test]
    fn report_serializes_without_an_unchanged_collection() {
        let report = build_report(
            "old.pdf",
            "new.pdf",
            3,
            3,
            "2026-08-07T12:00:00Z",
            sample_buckets(),
        );

        let json = serde_json::to_value(&report).expect("report serializes");
        assert!(json.get("newly_added_products").is_some());
        assert!(json.get("stock_out_products").is_some());
        assert!(json.get("unchanged_products").is_none());
        assert_eq!(
            json["metadata"]["summary"]["unchanged_count"],
            serde_json::json!(2)
        );
    }

    #[test]
    fn digest_path_swaps_in_the_summary_suffix() {
        assert_eq!(
            digest_path(Path::new("results/comparison_result.json")),
            PathBuf::from("results/comparison_result_summary.txt")
        );
        assert_eq!(
            digest_path(Path::new("out.json")),
            PathBuf::from("out_summary.txt")
        );
    }

    #[test]
    fn digest_lists_sources_and_all_five_counts() {
        let report = build_report(
            "old.pdf",
            "new.pdf",
            3,
            3,
            "2026-08-07T12:00:00Z",
            sample_buckets(),
        );
        let compared_ts = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();

        let digest = render_digest(&report, compared_ts);

        assert!(digest.starts_with("PRICE LIST COMPARISON SUMMARY\n"));
        assert!(digest.contains("Old PDF: old.pdf (3 products)\n"));
        assert!(digest.contains("New PDF: new.pdf (3 products)\n"));
        assert!(digest.contains("Comparison Date: 2026-08-07 12:00:00\n"));
        assert!(digest.contains("Newly Added: 1 products\n"));
        assert!(digest.contains("Price Increased: 0 products\n"));
        assert!(digest.contains("Price Decreased: 0 products\n"));
        assert!(digest.contains("Stock Out: 1 products\n"));
        assert!(digest.contains("Unchanged: 2 products\n"));
    }
}
