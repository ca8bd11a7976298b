use std::path::Path;

use crate::error::PriceCheckError;
use crate::extraction::spreadsheet::read_first_sheet;
use crate::extraction::PdfExtractor;
use crate::parsing::spreadsheet::{parse_sheet, SpreadsheetSchema};
use crate::parsing::{parse_pdf_pages, ParsedItems};

/// Kind of price sheet, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    Spreadsheet,
}

impl InputKind {
    /// `.pdf` (any case) is a PDF; everything else is handed to the spreadsheet reader.
    pub fn from_path(path: &Path) -> InputKind {
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            InputKind::Pdf
        } else {
            InputKind::Spreadsheet
        }
    }
}

/// Read a price sheet from disk into line items.
pub fn parse_input(
    path: &Path,
    extractor: &dyn PdfExtractor,
    schema: &SpreadsheetSchema,
) -> Result<ParsedItems, PriceCheckError> {
    let parsed = match InputKind::from_path(path) {
        InputKind::Pdf => {
            let pdf_bytes = std::fs::read(path)?;
            log::debug!(
                "extracting {} with {}",
                path.display(),
                extractor.backend_name()
            );
            let pages = extractor.extract_pages(&pdf_bytes)?;
            parse_pdf_pages(&pages)
        }
        InputKind::Spreadsheet => {
            let range = read_first_sheet(path)?;
            parse_sheet(&range, schema)
        }
    };

    log::info!(
        "parsed {} item(s) from {} ({} row(s) skipped)",
        parsed.items.len(),
        path.display(),
        parsed.skipped_rows.len()
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        assert_eq!(InputKind::from_path(Path::new("quote.pdf")), InputKind::Pdf);
        assert_eq!(InputKind::from_path(Path::new("QUOTE.PDF")), InputKind::Pdf);
        assert_eq!(
            InputKind::from_path(Path::new("quote.xlsx")),
            InputKind::Spreadsheet
        );
        assert_eq!(
            InputKind::from_path(Path::new("quote")),
            InputKind::Spreadsheet
        );
    }
}
