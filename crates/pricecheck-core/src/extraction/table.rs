use crate::extraction::PageContent;
use crate::parsing::values::{parse_money, parse_quantity};

/// Reconstruct price tables from pdftotext -layout output.
///
/// The layout mode keeps columns apart with runs of spaces, so a table is a
/// header line followed by data lines up to the next blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub page_number: usize,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

const HEADER_KEYWORDS: [&str; 14] = [
    "item",
    "product",
    "description",
    "name",
    "vendor",
    "supplier",
    "qty",
    "quantity",
    "price",
    "unit",
    "cost",
    "freight",
    "shipping",
    "notes",
];

/// Detect if a line looks like a price table header row.
///
/// Needs two keywords and no column that reads as a number or amount, so a
/// data row such as "Price Tag Gun  Office Supplier  4  $12.00" stays data.
pub fn is_table_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let count = HEADER_KEYWORDS
        .iter()
        .filter(|kw| words.contains(kw))
        .count();
    count >= 2
        && !split_columns(line)
            .iter()
            .any(|col| parse_quantity(col).is_ok() || parse_money(col).is_ok())
}

/// Find every table on every page.
///
/// A table ends at a blank line, at the next header line, or at the end of
/// its page. Tables never span pages.
pub fn extract_tables(pages: &[PageContent]) -> Vec<Table> {
    let mut tables = Vec::new();

    for page in pages {
        let mut current: Option<Table> = None;

        for line in &page.lines {
            if is_table_header(line) {
                tables.extend(current.take());
                current = Some(Table {
                    page_number: page.page_number,
                    header: split_columns(line).into_iter().map(String::from).collect(),
                    rows: Vec::new(),
                });
                continue;
            }

            if let Some(table) = current.as_mut() {
                if line.trim().is_empty() {
                    tables.extend(current.take());
                } else {
                    table
                        .rows
                        .push(split_columns(line).into_iter().map(String::from).collect());
                }
            }
        }

        tables.extend(current);
    }

    tables
}

/// Split a line into columns on gaps of 2+ whitespace characters.
pub fn split_columns(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut space_count = 0;
    let mut gap_start = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if space_count == 0 {
                gap_start = i;
            }
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start {
                    segments.push(&line[s..gap_start]);
                    start = None;
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: usize, lines: &[&str]) -> PageContent {
        PageContent {
            page_number: number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_is_table_header() {
        assert!(is_table_header(
            "  Item Name        Vendor     Qty    Unit Price   Freight"
        ));
        assert!(!is_table_header("  Hex Bolt M8      Acme       10     $0.45"));
        assert!(!is_table_header("Quote valid for 30 days"));
    }

    #[test]
    fn test_keyword_data_row_is_not_a_header() {
        assert!(!is_table_header(
            "  Price Tag Gun    Office Supplier   4   $12.00   $3.00"
        ));
        assert!(is_table_header("Item Name  Vendor  Qty  Unit Price  Freight"));
    }

    #[test]
    fn test_keyword_data_row_stays_in_table() {
        let pages = vec![page(
            1,
            &[
                "Item Name  Vendor  Qty  Unit Price  Freight",
                "Price Tag Gun  Office Supplier  4  $12.00  $3.00",
                "Hex Bolt  Acme  10  $0.45  $2.00",
            ],
        )];

        let tables = extract_tables(&pages);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[0][0], "Price Tag Gun");
    }

    #[test]
    fn test_split_columns() {
        let cols = split_columns("  Hex Bolt M8      Acme Supply   10   $0.45  ");
        assert_eq!(cols, vec!["Hex Bolt M8", "Acme Supply", "10", "$0.45"]);
    }

    #[test]
    fn test_split_columns_single_spaces_stay_together() {
        assert_eq!(split_columns("Widget blue large"), vec!["Widget blue large"]);
        assert!(split_columns("   ").is_empty());
    }

    #[test]
    fn test_extract_tables_stops_at_blank_line() {
        let pages = vec![page(
            1,
            &[
                "ACME SUPPLY QUOTE",
                "  Item          Vendor    Qty   Price    Freight",
                "  Hex Bolt      Acme      10    $0.45    $2.00",
                "  Washer        Acme      20    $0.05",
                "",
                "Thank you for your business",
            ],
        )];

        let tables = extract_tables(&pages);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].header[0], "Item");
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[1], vec!["Washer", "Acme", "20", "$0.05"]);
    }

    #[test]
    fn test_extract_tables_per_page() {
        let pages = vec![
            page(1, &["Item   Vendor   Qty   Price", "Bolt   Acme   1   $1"]),
            page(2, &["Item   Vendor   Qty   Price", "Nut   Acme   2   $2"]),
        ];

        let tables = extract_tables(&pages);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].page_number, 2);
        assert_eq!(tables[1].rows[0][0], "Nut");
    }

    #[test]
    fn test_no_header_no_tables() {
        let pages = vec![page(1, &["Just some prose", "and more prose"])];
        assert!(extract_tables(&pages).is_empty());
    }
}
