use indexmap::IndexMap;

use crate::model::{PriceChange, ProductRecord};
use crate::normalize::{parse_price, product_key};

/// The five disjoint outcomes of a comparison. Every key present in either
/// record set lands in exactly one bucket.
#[derive(Debug, Default)]
pub struct ReconciledBuckets {
    pub newly_added: Vec<ProductRecord>,
    pub price_increased: Vec<PriceChange>,
    pub price_decreased: Vec<PriceChange>,
    pub stock_out: Vec<ProductRecord>,
    pub unchanged: Vec<ProductRecord>,
}

/// Classifies the new record set against the old one. Comparison is driven
/// by the buyer-specific price; the base wholesale column is carried along
/// but never decides a bucket.
///
/// A transition from a zero old price is never an increase and a
/// transition to a zero new price is never a decrease; both fall through
/// to `unchanged` so no percentage is computed against a zero baseline.
pub fn reconcile(old: &[ProductRecord], new: &[ProductRecord]) -> ReconciledBuckets {
    let old_lookup = build_lookup(old);
    let new_lookup = build_lookup(new);

    let mut buckets = ReconciledBuckets::default();

    for (key, new_record) in &new_lookup {
        let Some(old_record) = old_lookup.get(key) else {
            buckets.newly_added.push((*new_record).clone());
            continue;
        };

        let old_price = parse_price(&old_record.wholesale_price_for_you).amount();
        let new_price = parse_price(&new_record.wholesale_price_for_you).amount();

        if new_price > old_price && old_price > 0.0 {
            buckets.price_increased.push(price_change(
                old_record,
                new_record,
                new_price - old_price,
                percentage_change(new_price - old_price, old_price),
            ));
        } else if new_price < old_price && new_price > 0.0 {
            buckets.price_decreased.push(price_change(
                old_record,
                new_record,
                old_price - new_price,
                percentage_change(old_price - new_price, old_price),
            ));
        } else {
            buckets.unchanged.push((*new_record).clone());
        }
    }

    for (key, old_record) in &old_lookup {
        if !new_lookup.contains_key(key) {
            buckets.stock_out.push((*old_record).clone());
        }
    }

    buckets
}

/// Key→record lookup preserving insertion order. Duplicate keys within one
/// set resolve to the record seen last.
fn build_lookup(records: &[ProductRecord]) -> IndexMap<String, &ProductRecord> {
    let mut lookup = IndexMap::with_capacity(records.len());
    for record in records {
        lookup.insert(product_key(record), record);
    }
    lookup
}

fn price_change(
    old: &ProductRecord,
    new: &ProductRecord,
    difference: f64,
    percentage: f64,
) -> PriceChange {
    PriceChange {
        brand: new.brand.clone(),
        product_name: new.product_name.clone(),
        old_wholesale_price: old.wholesale_price.clone(),
        old_wholesale_price_for_you: old.wholesale_price_for_you.clone(),
        new_wholesale_price: new.wholesale_price.clone(),
        new_wholesale_price_for_you: new.wholesale_price_for_you.clone(),
        price_difference: difference,
        percentage_change: percentage,
    }
}

/// Difference relative to the old price, as a percentage rounded to two
/// decimal places.
fn percentage_change(difference: f64, old_price: f64) -> f64 {
    (difference / old_price * 100.0 * 100.0).round() / 100.0
}
