use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::PriceCheckError;
use crate::model::ResultRow;

/// How the report's header is chosen when rows carry different numbers of
/// alternate vendor columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Header comes from the first row only; extra columns on later rows are dropped.
    #[default]
    FirstRow,
    /// Header covers the widest row; nothing is dropped.
    AllRows,
}

/// Write the report to `path`, replacing any existing file.
///
/// An empty row list leaves a zero-byte file.
pub fn write_report(
    rows: &[ResultRow],
    path: &Path,
    policy: ColumnPolicy,
) -> Result<(), PriceCheckError> {
    let file = File::create(path)?;
    write_rows(rows, file, policy)?;
    log::info!("wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Serialize rows as CSV to any writer.
pub fn write_rows<W: Write>(
    rows: &[ResultRow],
    writer: W,
    policy: ColumnPolicy,
) -> Result<(), PriceCheckError> {
    let Some(first) = rows.first() else {
        return Ok(());
    };

    let header = match policy {
        ColumnPolicy::FirstRow => first.columns(),
        ColumnPolicy::AllRows => rows
            .iter()
            .max_by_key(|r| r.alt_vendors.len())
            .unwrap_or(first)
            .columns(),
    };

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(&header)?;

    for row in rows {
        let mut values = row.values();
        if values.len() > header.len() {
            log::warn!(
                "dropping {} alternate vendor column(s) for '{}' (header has {} columns)",
                values.len() - header.len(),
                row.item_name,
                header.len()
            );
        }
        values.resize(header.len(), String::new());
        csv_writer.write_record(&values)?;
    }

    csv_writer.flush()?;
    Ok(())
}
