use std::collections::HashMap;

use calamine::{Data, Range};
use rust_decimal::Decimal;

use crate::model::LineItem;
use crate::parsing::values::{
    f64_to_decimal, parse_money, parse_quantity, quantity_from_decimal, ValueError,
};
use crate::parsing::{ParsedItems, SkipReason};

/// A named spreadsheet column and the value used when it is absent or blank.
///
/// `default: None` marks the column as required.
#[derive(Debug, Clone)]
pub struct ColumnSpec<T> {
    pub header: String,
    pub default: Option<T>,
}

impl<T> ColumnSpec<T> {
    pub fn required(header: &str) -> Self {
        ColumnSpec {
            header: header.to_string(),
            default: None,
        }
    }

    pub fn with_default(header: &str, default: T) -> Self {
        ColumnSpec {
            header: header.to_string(),
            default: Some(default),
        }
    }
}

/// Column layout of a spreadsheet price sheet.
#[derive(Debug, Clone)]
pub struct SpreadsheetSchema {
    pub name: ColumnSpec<String>,
    pub vendor: ColumnSpec<String>,
    pub quantity: ColumnSpec<u32>,
    pub unit_price: ColumnSpec<Decimal>,
    pub freight: ColumnSpec<Decimal>,
    pub notes: ColumnSpec<String>,
}

impl Default for SpreadsheetSchema {
    fn default() -> Self {
        SpreadsheetSchema {
            name: ColumnSpec::required("Item Name"),
            vendor: ColumnSpec::with_default("Vendor", String::new()),
            quantity: ColumnSpec::with_default("Quantity", 1),
            unit_price: ColumnSpec::with_default("Unit Price", Decimal::ZERO),
            freight: ColumnSpec::with_default("Freight", Decimal::ZERO),
            notes: ColumnSpec::with_default("Notes", String::new()),
        }
    }
}

/// Decode a worksheet into line items. The first row is the header.
pub fn parse_sheet(range: &Range<Data>, schema: &SpreadsheetSchema) -> ParsedItems {
    let mut parsed = ParsedItems::default();
    let mut rows = range.rows();

    let header = match rows.next() {
        Some(h) => h,
        None => return parsed,
    };
    let index = HeaderIndex::new(header);

    for row in rows {
        if row.iter().all(is_blank) {
            continue;
        }
        let columns: Vec<String> = row.iter().map(|c| format!("{c}")).collect();
        parsed.record(&columns, decode_row(row, &index, schema));
    }

    log::debug!(
        "decoded {} item(s), skipped {} row(s) from worksheet",
        parsed.items.len(),
        parsed.skipped_rows.len()
    );
    parsed
}

struct HeaderIndex {
    by_name: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(header: &[Data]) -> Self {
        let mut by_name = HashMap::new();
        for (i, cell) in header.iter().enumerate() {
            if let Some(name) = cell_as_string(cell) {
                // First occurrence wins for duplicated headers.
                by_name.entry(name.to_lowercase()).or_insert(i);
            }
        }
        HeaderIndex { by_name }
    }

    /// The non-blank cell under `header` in this row, if any.
    fn cell<'a>(&self, row: &'a [Data], header: &str) -> Option<&'a Data> {
        let i = *self.by_name.get(&header.trim().to_lowercase())?;
        row.get(i).filter(|c| !is_blank(c))
    }
}

fn decode_row(
    row: &[Data],
    index: &HeaderIndex,
    schema: &SpreadsheetSchema,
) -> Result<LineItem, SkipReason> {
    let name = text_field(row, index, &schema.name, "item name")?;
    let vendor = text_field(row, index, &schema.vendor, "vendor")?;
    let notes = text_field(row, index, &schema.notes, "notes")?;

    let quantity = match index.cell(row, &schema.quantity.header) {
        Some(cell) => cell_as_quantity(cell).map_err(SkipReason::InvalidQuantity)?,
        None => schema
            .quantity
            .default
            .ok_or(SkipReason::MissingField("quantity"))?,
    };
    let unit_price = money_field(row, index, &schema.unit_price, "unit price")
        .map_err(|e| e.map_value(SkipReason::InvalidUnitPrice))?;
    let freight = money_field(row, index, &schema.freight, "freight")
        .map_err(|e| e.map_value(SkipReason::InvalidFreight))?;

    Ok(LineItem {
        name,
        vendor,
        quantity,
        unit_price,
        freight,
        notes,
    })
}

enum FieldError {
    Missing(&'static str),
    Value(ValueError),
}

impl FieldError {
    fn map_value(self, f: impl FnOnce(ValueError) -> SkipReason) -> SkipReason {
        match self {
            FieldError::Missing(field) => SkipReason::MissingField(field),
            FieldError::Value(e) => f(e),
        }
    }
}

fn text_field(
    row: &[Data],
    index: &HeaderIndex,
    column: &ColumnSpec<String>,
    field: &'static str,
) -> Result<String, SkipReason> {
    match index.cell(row, &column.header).and_then(cell_as_string) {
        Some(s) => Ok(s),
        None => column.default.clone().ok_or(SkipReason::MissingField(field)),
    }
}

fn money_field(
    row: &[Data],
    index: &HeaderIndex,
    column: &ColumnSpec<Decimal>,
    field: &'static str,
) -> Result<Decimal, FieldError> {
    match index.cell(row, &column.header) {
        Some(cell) => cell_as_money(cell).map_err(FieldError::Value),
        None => column.default.ok_or(FieldError::Missing(field)),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_quantity(cell: &Data) -> Result<u32, ValueError> {
    match cell {
        Data::Int(i) if *i < 0 => Err(ValueError::Negative(i.to_string())),
        Data::Int(i) => u32::try_from(*i).map_err(|_| ValueError::Invalid(i.to_string())),
        Data::Float(f) if *f < 0.0 => Err(ValueError::Negative(f.to_string())),
        Data::Float(f) => f64_to_decimal(*f)
            .and_then(quantity_from_decimal)
            .ok_or_else(|| ValueError::Invalid(f.to_string())),
        Data::String(s) => parse_quantity(s),
        other => Err(ValueError::Invalid(format!("{other}"))),
    }
}

fn cell_as_money(cell: &Data) -> Result<Decimal, ValueError> {
    match cell {
        Data::Int(i) if *i < 0 => Err(ValueError::Negative(i.to_string())),
        Data::Int(i) => Ok(Decimal::from(*i)),
        Data::Float(f) if *f < 0.0 => Err(ValueError::Negative(f.to_string())),
        Data::Float(f) => f64_to_decimal(*f).ok_or_else(|| ValueError::Invalid(f.to_string())),
        Data::String(s) => parse_money(s),
        other => Err(ValueError::Invalid(format!("{other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sheet(rows: &[Vec<Data>]) -> Range<Data> {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn decodes_named_columns() {
        let range = sheet(&[
            vec![s("Item Name"), s("Vendor"), s("Quantity"), s("Unit Price"), s("Freight"), s("Notes")],
            vec![s("Widget"), s("Acme"), Data::Float(5.0), Data::Float(10.0), Data::Float(1.5), s("blue")],
        ]);

        let parsed = parse_sheet(&range, &SpreadsheetSchema::default());
        assert_eq!(parsed.items.len(), 1);
        let item = &parsed.items[0];
        assert_eq!(item.name, "Widget");
        assert_eq!(item.vendor, "Acme");
        assert_eq!(item.quantity, 5);
        assert_eq!(item.unit_price, dec!(10));
        assert_eq!(item.freight, dec!(1.5));
        assert_eq!(item.notes, "blue");
    }

    #[test]
    fn absent_columns_take_defaults() {
        let range = sheet(&[vec![s("Item Name"), s("Vendor")], vec![s("Widget"), s("Acme")]]);

        let parsed = parse_sheet(&range, &SpreadsheetSchema::default());
        let item = &parsed.items[0];
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, dec!(0));
        assert_eq!(item.freight, dec!(0));
        assert_eq!(item.notes, "");
    }

    #[test]
    fn blank_cells_take_defaults_and_headers_are_case_insensitive() {
        let range = sheet(&[
            vec![s(" item name "), s("QUANTITY"), s("unit price")],
            vec![s("Widget"), Data::Empty, s("$4.25")],
        ]);

        let parsed = parse_sheet(&range, &SpreadsheetSchema::default());
        assert_eq!(parsed.items[0].quantity, 1);
        assert_eq!(parsed.items[0].unit_price, dec!(4.25));
        assert_eq!(parsed.items[0].vendor, "");
    }

    #[test]
    fn rows_failing_coercion_are_skipped() {
        let range = sheet(&[
            vec![s("Item Name"), s("Quantity"), s("Unit Price")],
            vec![s("Widget"), s("five"), Data::Float(10.0)],
            vec![s("Gadget"), Data::Int(2), s("call")],
            vec![Data::Empty, Data::Int(1), Data::Float(3.0)],
            vec![s("Sprocket"), Data::Int(3), Data::Float(2.5)],
        ]);

        let parsed = parse_sheet(&range, &SpreadsheetSchema::default());
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].name, "Sprocket");
        assert_eq!(parsed.skipped_rows.len(), 3);
        assert!(parsed.skipped_rows[2].reason.contains("item name"));
    }

    #[test]
    fn fully_blank_rows_are_ignored() {
        let range = sheet(&[
            vec![s("Item Name"), s("Unit Price")],
            vec![Data::Empty, Data::Empty],
            vec![s("Widget"), Data::Float(1.0)],
        ]);

        let parsed = parse_sheet(&range, &SpreadsheetSchema::default());
        assert_eq!(parsed.items.len(), 1);
        assert!(parsed.skipped_rows.is_empty());
    }

    #[test]
    fn negative_and_fractional_quantities_rejected() {
        assert!(matches!(cell_as_quantity(&Data::Int(-1)), Err(ValueError::Negative(_))));
        assert!(matches!(cell_as_quantity(&Data::Float(2.5)), Err(ValueError::Invalid(_))));
        assert_eq!(cell_as_quantity(&Data::Float(7.0)), Ok(7));
    }

    #[test]
    fn unrelated_sheet_yields_nothing() {
        let range = sheet(&[vec![s("Date"), s("Amount")], vec![s("2024-01-01"), Data::Float(3.0)]]);

        let parsed = parse_sheet(&range, &SpreadsheetSchema::default());
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.skipped_rows.len(), 1);
    }

    #[test]
    fn empty_range_yields_nothing() {
        let parsed = parse_sheet(&Range::empty(), &SpreadsheetSchema::default());
        assert!(parsed.items.is_empty());
    }
}
