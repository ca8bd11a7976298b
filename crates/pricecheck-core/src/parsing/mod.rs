pub mod spreadsheet;
pub mod values;

use crate::extraction::table::{extract_tables, Table};
use crate::extraction::PageContent;
use crate::model::LineItem;
use serde::{Deserialize, Serialize};
use values::{parse_money, parse_money_or_zero, parse_quantity, ValueError};

/// Why a source row did not become a line item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(ValueError),

    #[error("invalid unit price: {0}")]
    InvalidUnitPrice(ValueError),

    #[error("invalid freight: {0}")]
    InvalidFreight(ValueError),
}

/// A row that was dropped while parsing, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    /// The row as it appeared in the source, columns joined with " | ".
    pub source: String,
    pub reason: String,
}

/// Result of parsing a price sheet: the usable items plus what was skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedItems {
    pub items: Vec<LineItem>,
    pub skipped_rows: Vec<SkippedRow>,
}

impl ParsedItems {
    fn record(&mut self, columns: &[String], outcome: Result<LineItem, SkipReason>) {
        match outcome {
            Ok(item) => self.items.push(item),
            Err(reason) => {
                let source = columns.join(" | ");
                log::debug!("skipping row '{}': {}", source, reason);
                self.skipped_rows.push(SkippedRow {
                    source,
                    reason: reason.to_string(),
                });
            }
        }
    }
}

/// Parse every table found in extracted PDF pages into line items.
pub fn parse_pdf_pages(pages: &[PageContent]) -> ParsedItems {
    let tables = extract_tables(pages);
    log::debug!("found {} table(s) in {} page(s)", tables.len(), pages.len());
    for table in &tables {
        log::debug!(
            "table on page {}: {} row(s) under [{}]",
            table.page_number,
            table.rows.len(),
            table.header.join(" | ")
        );
    }
    parse_tables(&tables)
}

/// Parse table rows positionally. Header rows are never part of `rows`.
pub fn parse_tables(tables: &[Table]) -> ParsedItems {
    let mut parsed = ParsedItems::default();
    for table in tables {
        for row in &table.rows {
            parsed.record(row, item_from_columns(row));
        }
    }
    parsed
}

/// Build a line item from positional columns:
/// name, vendor, quantity, unit price, freight, then notes.
///
/// Missing trailing columns count as empty; an empty freight is zero.
pub fn item_from_columns(columns: &[String]) -> Result<LineItem, SkipReason> {
    let col = |i: usize| columns.get(i).map(|s| s.trim()).unwrap_or("");

    let name = col(0);
    if name.is_empty() {
        return Err(SkipReason::MissingField("name"));
    }

    let quantity = parse_quantity(col(2)).map_err(SkipReason::InvalidQuantity)?;
    let unit_price = parse_money(col(3)).map_err(SkipReason::InvalidUnitPrice)?;
    let freight = parse_money_or_zero(col(4)).map_err(SkipReason::InvalidFreight)?;

    let notes = columns
        .iter()
        .skip(5)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(LineItem {
        name: name.to_string(),
        vendor: col(1).to_string(),
        quantity,
        unit_price,
        freight,
        notes,
    })
}
