use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One product line from the vendor price sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub vendor: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub freight: Decimal,
    #[serde(default)]
    pub notes: String,
}

/// A raw search result; `link` may still be wrapped in a search-engine redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
}

/// A candidate offer scraped from an alternate vendor's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOption {
    /// Host of the page URL. Empty when the page could not be fetched.
    pub vendor: String,
    pub price: Option<Decimal>,
    pub freight: Option<Decimal>,
    pub url: String,
}

impl VendorOption {
    /// Option recorded for a page that failed to load.
    pub fn unreachable(url: &str) -> Self {
        VendorOption {
            vendor: String::new(),
            price: None,
            freight: None,
            url: url.to_string(),
        }
    }

    /// Landed cost of this offer (price plus freight, missing freight counts as zero).
    ///
    /// A sum that overflows `Decimal` is treated as absent.
    pub fn total(&self) -> Option<Decimal> {
        let price = self.price?;
        let total = price.checked_add(self.freight.unwrap_or(Decimal::ZERO));
        if total.is_none() {
            log::debug!("total for {} overflows, ignoring offer", self.url);
        }
        total
    }
}

impl fmt::Display for VendorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.vendor,
            DisplayOpt(self.price),
            DisplayOpt(self.freight),
            self.url
        )
    }
}

struct DisplayOpt(Option<Decimal>);

impl fmt::Display for DisplayOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "None"),
        }
    }
}

pub const COL_ITEM_NAME: &str = "Item Name";
pub const COL_ORIGINAL_VENDOR: &str = "Original Vendor";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_ORIGINAL_UNIT_PRICE: &str = "Original Unit Price";
pub const COL_ORIGINAL_FREIGHT: &str = "Original Freight";
pub const COL_BEST_TOTAL: &str = "Best Total Price";

/// Columns present on every result row, in report order.
pub const FIXED_COLUMNS: [&str; 6] = [
    COL_ITEM_NAME,
    COL_ORIGINAL_VENDOR,
    COL_QUANTITY,
    COL_ORIGINAL_UNIT_PRICE,
    COL_ORIGINAL_FREIGHT,
    COL_BEST_TOTAL,
];

/// Header of the n-th (1-based) alternate vendor column.
pub fn alt_vendor_column(n: usize) -> String {
    format!("Alt Vendor {n}")
}

/// Comparison outcome for a single line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub item_name: String,
    pub original_vendor: String,
    pub quantity: u32,
    pub original_unit_price: Decimal,
    pub original_freight: Decimal,
    pub best_total: Option<Decimal>,
    /// One "vendor, price, freight, url" description per candidate, in search order.
    pub alt_vendors: Vec<String>,
}

impl ResultRow {
    /// Column names this row carries, fixed columns first.
    pub fn columns(&self) -> Vec<String> {
        let mut cols: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        cols.extend((1..=self.alt_vendors.len()).map(alt_vendor_column));
        cols
    }

    /// Cell values in the same order as [`ResultRow::columns`].
    pub fn values(&self) -> Vec<String> {
        let mut values = vec![
            self.item_name.clone(),
            self.original_vendor.clone(),
            self.quantity.to_string(),
            self.original_unit_price.to_string(),
            self.original_freight.to_string(),
            self.best_total.map(|t| t.to_string()).unwrap_or_default(),
        ];
        values.extend(self.alt_vendors.iter().cloned());
        values
    }
}
