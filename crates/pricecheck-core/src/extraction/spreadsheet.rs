use std::path::Path;

use calamine::{Data, Range, Reader};

use crate::error::PriceCheckError;

/// Open a workbook (xlsx, xlsm, xlsb, xls or ods) and return its first worksheet.
///
/// A workbook without any worksheet yields an empty range.
pub fn read_first_sheet(path: &Path) -> Result<Range<Data>, PriceCheckError> {
    let mut workbook =
        calamine::open_workbook_auto(path).map_err(|e| PriceCheckError::Spreadsheet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(e)) => Err(PriceCheckError::Spreadsheet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        None => Ok(Range::empty()),
    }
}
