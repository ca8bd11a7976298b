pub mod extract;
pub mod fetch;
pub mod text;

use url::Url;

use crate::model::VendorOption;
use extract::PriceExtractor;
use fetch::PageFetcher;
use text::visible_text;

/// Turns a candidate URL into a vendor offer. Never fails: problems show up as
/// absent fields on the returned option.
pub trait VendorScraper {
    fn scrape(&self, url: &str) -> VendorOption;
}

/// Fetch a page, then run a price extractor over its visible text.
pub struct PageScraper<F, E> {
    fetcher: F,
    extractor: E,
}

impl<F: PageFetcher, E: PriceExtractor> PageScraper<F, E> {
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self { fetcher, extractor }
    }
}

impl<F: PageFetcher, E: PriceExtractor> VendorScraper for PageScraper<F, E> {
    fn scrape(&self, url: &str) -> VendorOption {
        let html = match self.fetcher.fetch(url) {
            Ok(html) => html,
            Err(err) => {
                log::warn!("could not fetch {}: {}", url, err);
                return VendorOption::unreachable(url);
            }
        };

        let found = self.extractor.extract(&visible_text(&html));
        log::debug!(
            "scraped {}: price {:?}, freight {:?}",
            url,
            found.price,
            found.freight
        );

        VendorOption {
            vendor: vendor_from_url(url),
            price: found.price,
            freight: found.freight,
            url: url.to_string(),
        }
    }
}

/// Vendor name for an offer: the host part of its URL, empty when unparseable.
pub fn vendor_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}
