pub mod compare;
pub mod error;
pub mod extraction;
pub mod http;
pub mod input;
pub mod model;
pub mod parsing;
pub mod report;
pub mod scrape;
pub mod search;

use std::path::Path;

use compare::Comparator;
use error::PriceCheckError;
use extraction::PdfExtractor;
use parsing::spreadsheet::SpreadsheetSchema;
use report::ColumnPolicy;

/// Options for a full price-sheet run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub schema: SpreadsheetSchema,
    pub columns: ColumnPolicy,
}

/// What a run did, for the caller to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub items: usize,
    pub skipped_rows: usize,
    pub priced_items: usize,
}

/// Main API entry point: parse a price sheet, compare every item against
/// alternate vendors and write the ranked CSV report.
///
/// A sheet without usable rows is not an error; it produces an empty report.
pub fn run(
    input: &Path,
    output: &Path,
    extractor: &dyn PdfExtractor,
    comparator: &Comparator<'_>,
    options: &RunOptions,
) -> Result<RunSummary, PriceCheckError> {
    let parsed = input::parse_input(input, extractor, &options.schema)?;
    if parsed.items.is_empty() {
        log::warn!("no line items found in {}", input.display());
    }

    let rows = comparator.compare_all(&parsed.items);
    report::write_report(&rows, output, options.columns)?;

    Ok(RunSummary {
        items: parsed.items.len(),
        skipped_rows: parsed.skipped_rows.len(),
        priced_items: rows.iter().filter(|r| r.best_total.is_some()).count(),
    })
}
