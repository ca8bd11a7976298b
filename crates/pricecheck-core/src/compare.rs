use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::model::{LineItem, ResultRow, VendorOption};
use crate::scrape::VendorScraper;
use crate::search::{normalize_link, SearchClient};

#[derive(Debug, Clone)]
pub struct CompareSettings {
    /// Appended to the item name to form the search query.
    pub query_suffix: String,
    /// Search hits scraped per item.
    pub max_results: usize,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            query_suffix: " buy online".to_string(),
            max_results: 3,
        }
    }
}

/// Runs the search-and-scrape loop for each line item.
pub struct Comparator<'a> {
    search: &'a dyn SearchClient,
    scraper: &'a dyn VendorScraper,
    settings: CompareSettings,
}

impl<'a> Comparator<'a> {
    pub fn new(
        search: &'a dyn SearchClient,
        scraper: &'a dyn VendorScraper,
        settings: CompareSettings,
    ) -> Self {
        Self {
            search,
            scraper,
            settings,
        }
    }

    /// Compare every item and return the rows cheapest-first.
    pub fn compare_all(&self, items: &[LineItem]) -> Vec<ResultRow> {
        let mut rows: Vec<ResultRow> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                log::info!("[{}/{}] comparing '{}'", i + 1, items.len(), item.name);
                self.compare_item(item)
            })
            .collect();
        sort_rows(&mut rows);
        rows
    }

    /// Search for one item, scrape each hit and build its result row.
    pub fn compare_item(&self, item: &LineItem) -> ResultRow {
        let options = self.vendor_options(item);
        let best_total = best_total(&options);
        log::debug!(
            "'{}': {} option(s), best total {:?}",
            item.name,
            options.len(),
            best_total
        );

        ResultRow {
            item_name: item.name.clone(),
            original_vendor: item.vendor.clone(),
            quantity: item.quantity,
            original_unit_price: item.unit_price,
            original_freight: item.freight,
            best_total,
            alt_vendors: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn vendor_options(&self, item: &LineItem) -> Vec<VendorOption> {
        let query = format!("{}{}", item.name, self.settings.query_suffix);
        let hits = match self.search.search(&query, self.settings.max_results) {
            Ok(hits) => hits,
            Err(err) => {
                log::warn!("{}; no alternate vendors for '{}'", err, item.name);
                Vec::new()
            }
        };

        hits.iter()
            .take(self.settings.max_results)
            .map(|hit| self.scraper.scrape(&normalize_link(&hit.link)))
            .collect()
    }
}

/// Cheapest landed cost (price plus freight) among options that have a price.
pub fn best_total(options: &[VendorOption]) -> Option<Decimal> {
    options.iter().filter_map(VendorOption::total).min()
}

/// Order rows by best total ascending; rows without a total go last.
/// Rows with equal keys keep their relative order.
pub fn sort_rows(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| compare_totals(a.best_total, b.best_total));
}

fn compare_totals(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
