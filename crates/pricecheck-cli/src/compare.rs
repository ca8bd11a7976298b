use pricecheck_core::compare::{CompareSettings, Comparator};
use pricecheck_core::error::PriceCheckError;
use pricecheck_core::extraction::pdftotext::PdftotextExtractor;
use pricecheck_core::http::{self, HttpSettings};
use pricecheck_core::input::InputKind;
use pricecheck_core::report::ColumnPolicy;
use pricecheck_core::scrape::extract::RegexPriceExtractor;
use pricecheck_core::scrape::fetch::HttpPageFetcher;
use pricecheck_core::scrape::PageScraper;
use pricecheck_core::search::{SearchSettings, WebSearchClient};
use pricecheck_core::RunOptions;
use std::path::Path;

use crate::{Cli, Columns};

pub fn run(cli: &Cli) -> Result<(), PriceCheckError> {
    // Required external capabilities are checked before any work starts.
    check_pdf_backend(&cli.infile, PdftotextExtractor::is_available)?;
    let client = http::build_client(&HttpSettings {
        timeout: cli.timeout,
        ..HttpSettings::default()
    })?;

    let search = WebSearchClient::new(
        client.clone(),
        SearchSettings {
            delay: cli.delay,
            ..SearchSettings::default()
        },
    );
    let scraper = PageScraper::new(
        HttpPageFetcher::new(client),
        RegexPriceExtractor::default(),
    );
    let comparator = Comparator::new(
        &search,
        &scraper,
        CompareSettings {
            max_results: cli.results,
            ..CompareSettings::default()
        },
    );

    let options = RunOptions {
        columns: match cli.columns {
            Columns::FirstRow => ColumnPolicy::FirstRow,
            Columns::AllRows => ColumnPolicy::AllRows,
        },
        ..RunOptions::default()
    };

    let summary = pricecheck_core::run(
        &cli.infile,
        &cli.outfile,
        &PdftotextExtractor::new(),
        &comparator,
        &options,
    )?;

    eprintln!(
        "Compared {} item(s), {} with an alternate price, written to {}",
        summary.items,
        summary.priced_items,
        cli.outfile.display()
    );
    if summary.skipped_rows > 0 {
        eprintln!("  {} row(s) skipped during parsing", summary.skipped_rows);
    }

    Ok(())
}

/// A PDF input needs pdftotext; other inputs never probe for it.
fn check_pdf_backend(
    infile: &Path,
    pdftotext_available: impl FnOnce() -> bool,
) -> Result<(), PriceCheckError> {
    if InputKind::from_path(infile) == InputKind::Pdf && !pdftotext_available() {
        return Err(PriceCheckError::PdftotextNotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_input_without_pdftotext_fails() {
        let result = check_pdf_backend(Path::new("quote.PDF"), || false);
        assert!(matches!(result, Err(PriceCheckError::PdftotextNotFound)));
    }

    #[test]
    fn pdf_input_with_pdftotext_passes() {
        assert!(check_pdf_backend(Path::new("quote.pdf"), || true).is_ok());
    }

    #[test]
    fn spreadsheet_input_skips_the_check() {
        let result = check_pdf_backend(Path::new("quote.xlsx"), || {
            panic!("pdftotext should not be probed for spreadsheets")
        });
        assert!(result.is_ok());
    }
}
