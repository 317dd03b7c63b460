use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::model::ProductRecord;
use crate::progress::Progress;

/// Semantic roles a table column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    Brand,
    ProductName,
    WholesalePrice,
    WholesalePriceForYou,
}

/// Header rules, evaluated in order against each lowercased header cell.
/// The first rule whose substrings all match decides the cell's role.
const HEADER_RULES: [(&[&str], ColumnRole); 4] = [
    (&["brand"], ColumnRole::Brand),
    (&["product", "name"], ColumnRole::ProductName),
    (&["normal", "wholesale"], ColumnRole::WholesalePrice),
    (&["wholesale", "you"], ColumnRole::WholesalePriceForYou),
];

/// Column indices resolved for one table. Roles the header row never
/// matched stay `None`.
#[derive(Debug, Default, PartialEq, Eq)]
struct ColumnMap {
    brand: Option<usize>,
    product_name: Option<usize>,
    wholesale_price: Option<usize>,
    wholesale_price_for_you: Option<usize>,
}

/// Extracts every product row from a price list document. Extraction
/// failures are absorbed: the document is reported through `progress` and
/// contributes an empty record set.
pub fn extract_products(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
    progress: &dyn Progress,
) -> Vec<ProductRecord> {
    match try_extract_products(pdf_path, max_pages_per_doc, progress) {
        Ok(records) => records,
        Err(error) => {
            progress.document_failed(pdf_path, &error);
            Vec::new()
        }
    }
}

fn try_extract_products(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
    progress: &dyn Progress,
) -> Result<Vec<ProductRecord>> {
    let cell_split_regex =
        Regex::new(r"\t+|\s{2,}").context("failed to compile table cell split regex")?;

    let pages = extract_pages_with_pdftotext(pdf_path, max_pages_per_doc)?;
    progress.document_opened(pdf_path, pages.len());

    let mut records = Vec::new();
    for (index, page_text) in pages.iter().enumerate() {
        let page_number = index + 1;
        for table in page_tables(page_text, &cell_split_regex) {
            records.extend(table_records(&table, page_number));
        }

        if page_number % 10 == 0 {
            progress.pages_processed(page_number, pages.len());
        }
    }

    progress.document_extracted(pdf_path, records.len());
    Ok(records)
}

fn extract_pages_with_pdftotext(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg("-f")
        .arg("1");
    if let Some(max_pages) = max_pages_per_doc {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    Ok(pages)
}

/// Splits one page of layout text into candidate tables. Lines are grouped
/// into blocks separated by blank lines; a block qualifies once it holds a
/// header row plus at least one data row.
fn page_tables(page_text: &str, cell_split_regex: &Regex) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current = Vec::<Vec<String>>::new();

    for line in page_text.lines() {
        if line.trim().is_empty() {
            if current.len() >= 2 {
                tables.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            continue;
        }

        let cells = split_table_cells(line, cell_split_regex);
        if !cells.is_empty() {
            current.push(cells);
        }
    }

    if current.len() >= 2 {
        tables.push(current);
    }

    tables
}

fn split_table_cells(line: &str, cell_split_regex: &Regex) -> Vec<String> {
    cell_split_regex
        .split(line.trim())
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Resolves column roles for a table's header row. The first column
/// matching a role claims it; later matches for the same role are ignored.
fn identify_columns(headers: &[String]) -> ColumnMap {
    let mut columns = ColumnMap::default();

    for (index, header) in headers.iter().enumerate() {
        let Some(role) = classify_header(header) else {
            continue;
        };

        let slot = match role {
            ColumnRole::Brand => &mut columns.brand,
            ColumnRole::ProductName => &mut columns.product_name,
            ColumnRole::WholesalePrice => &mut columns.wholesale_price,
            ColumnRole::WholesalePriceForYou => &mut columns.wholesale_price_for_you,
        };
        if slot.is_none() {
            *slot = Some(index);
        }
    }

    columns
}

fn classify_header(header: &str) -> Option<ColumnRole> {
    let lowered = header.to_lowercase();
    HEADER_RULES
        .iter()
        .find(|(needles, _)| needles.iter().all(|needle| lowered.contains(needle)))
        .map(|(_, role)| *role)
}

/// Turns a table's data rows into records. Tables without both a brand and
/// a product-name column contribute nothing.
fn table_records(table: &[Vec<String>], page: usize) -> Vec<ProductRecord> {
    let columns = identify_columns(&table[0]);
    let (Some(brand_index), Some(product_index)) = (columns.brand, columns.product_name) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for row in &table[1..] {
        let brand = cell_text(row, brand_index);
        let product_name = cell_text(row, product_index);
        if cell_is_missing(&brand) || cell_is_missing(&product_name) {
            continue;
        }

        records.push(ProductRecord {
            brand,
            product_name,
            wholesale_price: columns
                .wholesale_price
                .map(|index| cell_text(row, index))
                .unwrap_or_default(),
            wholesale_price_for_you: columns
                .wholesale_price_for_you
                .map(|index| cell_text(row, index))
                .unwrap_or_default(),
            page,
        });
    }

    records
}

fn cell_text(row: &[String], index: usize) -> String {
    row.get(index)
        .map(|cell| cell.trim().to_string())
        .unwrap_or_default()
}

/// Empty cells and the literal string "nan" count as missing.
fn cell_is_missing(value: &str) -> bool {
    value.is_empty() || value == "nan"
}
