use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DEFAULT_PRICE_PATTERN: &str = r"\$(\d+[\d,.]*)";
pub const DEFAULT_FREIGHT_PATTERN: &str = r"(?i)shipping[^$]*\$(\d+[\d,.]*)";

/// Price and freight figures found in a page's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPrices {
    pub price: Option<Decimal>,
    pub freight: Option<Decimal>,
}

/// Strategy for pulling price figures out of visible page text.
pub trait PriceExtractor {
    fn extract(&self, text: &str) -> ExtractedPrices;
}

/// First-match regex heuristics: the first dollar amount is the price, the
/// first dollar amount after the word "shipping" is the freight.
#[derive(Debug, Clone)]
pub struct RegexPriceExtractor {
    price: Regex,
    freight: Regex,
}

impl RegexPriceExtractor {
    /// Both patterns must capture the numeric part in group 1.
    pub fn new(price_pattern: &str, freight_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            price: Regex::new(price_pattern)?,
            freight: Regex::new(freight_pattern)?,
        })
    }
}

impl Default for RegexPriceExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_PATTERN, DEFAULT_FREIGHT_PATTERN)
            .expect("built-in price patterns are valid")
    }
}

impl PriceExtractor for RegexPriceExtractor {
    fn extract(&self, text: &str) -> ExtractedPrices {
        ExtractedPrices {
            price: first_amount(&self.price, text),
            freight: first_amount(&self.freight, text),
        }
    }
}

fn first_amount(pattern: &Regex, text: &str) -> Option<Decimal> {
    let token = pattern.captures(text)?.get(1)?.as_str();
    parse_amount(token)
}

/// Parse a scraped amount token, dropping thousands separators and any
/// sentence punctuation left at the end ("$1,299.00." -> 1299.00).
fn parse_amount(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    let cleaned = cleaned.trim_end_matches('.');
    Decimal::from_str(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn extract(text: &str) -> ExtractedPrices {
        RegexPriceExtractor::default().extract(text)
    }

    #[test]
    fn first_dollar_amount_is_price() {
        let found = extract("Widget Pro $1,299.99 was $1,499.00");
        assert_eq!(found.price, Some(dec!(1299.99)));
        assert_eq!(found.freight, None);
    }

    #[test]
    fn shipping_amount_is_freight() {
        let found = extract("Price $8.00 Add to cart Shipping: $2.00 Returns free");
        assert_eq!(found.price, Some(dec!(8.00)));
        assert_eq!(found.freight, Some(dec!(2.00)));
    }

    #[test]
    fn shipping_match_is_case_insensitive() {
        let found = extract("$5 SHIPPING calculated at checkout, flat $7.50");
        assert_eq!(found.freight, Some(dec!(7.50)));
    }

    #[test]
    fn shipping_takes_next_dollar_after_the_word() {
        // The price precedes "shipping" so freight is the later amount.
        let found = extract("Now $20 free shipping over $35");
        assert_eq!(found.price, Some(dec!(20)));
        assert_eq!(found.freight, Some(dec!(35)));
    }

    #[test]
    fn trailing_period_is_not_part_of_amount() {
        assert_eq!(extract("It costs $10.").price, Some(dec!(10)));
    }

    #[test]
    fn no_amounts_found() {
        assert_eq!(extract("Call for pricing"), ExtractedPrices::default());
    }

    #[test]
    fn malformed_amount_is_absent() {
        assert_eq!(extract("version $1.2.3").price, None);
    }

    #[test]
    fn custom_patterns() {
        let euro = RegexPriceExtractor::new(r"€(\d+[\d,.]*)", r"(?i)versand[^€]*€(\d+[\d,.]*)")
            .unwrap();
        let found = euro.extract("Preis €12,50 Versand €3");
        assert_eq!(found.price, Some(dec!(1250)));
        assert_eq!(found.freight, Some(dec!(3)));
    }
}
