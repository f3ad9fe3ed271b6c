//! Price arithmetic shared by the upload transforms and the quote builder.
//!
//! Marketplace exports and the catalog sheet both carry prices as loosely
//! formatted text (`"￦1,250"`, `"12,300원"`), so everything numeric goes
//! through [`strip_numeric`] before parsing.

use std::collections::HashMap;

use crate::products::ProductRow;

/// Removes every character that is not an ASCII digit, `.` or `-`.
#[must_use]
pub fn strip_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Parses a loosely formatted number after [`strip_numeric`].
///
/// Returns `None` when nothing numeric is left or the remainder is not a
/// finite number (`"1.2.3"`, `"12-3"`, `""`).
#[must_use]
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let stripped = strip_numeric(raw);
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Rounds to the nearest multiple of 100, halves rounding up
/// (`12345 → 12300`, `1250 → 1300`).
#[must_use]
pub fn round_to_hundred(value: f64) -> f64 {
    (value / 100.0 + 0.5).floor() * 100.0
}

/// Lookup from catalog `code` to the price used for marketplace listings.
///
/// Built once per catalog snapshot. The listed price is the `online` price,
/// falling back to the `deal` price when `online` is zero, and to `0` when
/// both are zero.
#[derive(Debug, Clone, Default)]
pub struct PriceIndex {
    prices: HashMap<String, f64>,
}

impl PriceIndex {
    #[must_use]
    pub fn from_products(products: &[ProductRow]) -> Self {
        let mut prices = HashMap::with_capacity(products.len());
        for product in products {
            let code = product.code.trim();
            if code.is_empty() {
                continue;
            }
            prices.insert(code.to_string(), listed_price(product));
        }
        Self { prices }
    }

    /// Price for `code`, or `None` when the code is not in the catalog.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<f64> {
        self.prices.get(code).copied()
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.prices.contains_key(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// The `online → deal → 0` fallback used for marketplace and quote prices.
#[must_use]
pub fn listed_price(product: &ProductRow) -> f64 {
    [product.online, product.deal]
        .into_iter()
        .find(|p| p.is_finite() && *p != 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, online: f64, deal: f64) -> ProductRow {
        ProductRow {
            code: code.to_string(),
            online,
            deal,
            ..ProductRow::default()
        }
    }

    #[test]
    fn strip_numeric_keeps_digits_dot_and_minus() {
        assert_eq!(strip_numeric("￦1,250"), "1250");
        assert_eq!(strip_numeric("-12.5원"), "-12.5");
        assert_eq!(strip_numeric("abc"), "");
    }

    #[test]
    fn parse_lenient_number_handles_currency_text() {
        assert_eq!(parse_lenient_number("￦1,250"), Some(1250.0));
        assert_eq!(parse_lenient_number(" 12,300 원"), Some(12300.0));
        assert_eq!(parse_lenient_number("-5"), Some(-5.0));
    }

    #[test]
    fn parse_lenient_number_rejects_garbage() {
        assert_eq!(parse_lenient_number(""), None);
        assert_eq!(parse_lenient_number("문의"), None);
        assert_eq!(parse_lenient_number("1.2.3"), None);
        assert_eq!(parse_lenient_number("12-3"), None);
    }

    #[test]
    fn round_to_hundred_matches_examples() {
        assert!((round_to_hundred(12345.0) - 12300.0).abs() < f64::EPSILON);
        assert!((round_to_hundred(1250.0) - 1300.0).abs() < f64::EPSILON);
        assert!((round_to_hundred(1249.0) - 1200.0).abs() < f64::EPSILON);
        assert!((round_to_hundred(0.0)).abs() < f64::EPSILON);
        assert!((round_to_hundred(49.9)).abs() < f64::EPSILON);
    }

    #[test]
    fn round_to_hundred_is_idempotent() {
        for p in [0.0, 99.0, 150.0, 12345.0, 987_654.0] {
            let once = round_to_hundred(p);
            assert!((round_to_hundred(once) - once).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn price_index_prefers_online_then_deal() {
        let index = PriceIndex::from_products(&[
            product("A1", 12345.0, 9000.0),
            product("B2", 0.0, 9000.0),
            product("C3", 0.0, 0.0),
        ]);
        assert_eq!(index.get("A1"), Some(12345.0));
        assert_eq!(index.get("B2"), Some(9000.0));
        assert_eq!(index.get("C3"), Some(0.0));
        assert_eq!(index.get("missing"), None);
    }

    #[test]
    fn price_index_trims_codes_and_skips_blank_ones() {
        let index = PriceIndex::from_products(&[product("  A1 ", 100.0, 0.0), product("", 5.0, 0.0)]);
        assert_eq!(index.len(), 1);
        assert!(index.contains("A1"));
    }
}
