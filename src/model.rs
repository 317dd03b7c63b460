use serde::{Deserialize, Serialize};

/// One product row lifted out of a price list table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub brand: String,
    pub product_name: String,
    /// Raw text of the "normal wholesale" column, as extracted.
    pub wholesale_price: String,
    /// Raw text of the buyer-specific "wholesale for you" column. This is
    /// the field the comparison is driven by.
    pub wholesale_price_for_you: String,
    /// 1-based page the row was extracted from.
    pub page: usize,
}

/// A product whose negotiated price moved between the two versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChange {
    pub brand: String,
    pub product_name: String,
    pub old_wholesale_price: String,
    pub old_wholesale_price_for_you: String,
    pub new_wholesale_price: String,
    pub new_wholesale_price_for_you: String,
    pub price_difference: f64,
    pub percentage_change: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub newly_added_count: usize,
    pub price_increased_count: usize,
    pub price_decreased_count: usize,
    pub stock_out_count: usize,
    pub unchanged_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonMetadata {
    pub old_pdf: String,
    pub new_pdf: String,
    pub comparison_date: String,
    pub old_pdf_total_products: usize,
    pub new_pdf_total_products: usize,
    pub summary: ComparisonSummary,
}

/// Terminal artifact of a comparison run. Unchanged products appear only
/// as a count in the summary, never as a detail collection.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub metadata: ComparisonMetadata,
    pub newly_added_products: Vec<ProductRecord>,
    pub price_increased_products: Vec<PriceChange>,
    pub price_decreased_products: Vec<PriceChange>,
    pub stock_out_products: Vec<ProductRecord>,
}
