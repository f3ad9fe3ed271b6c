//! Quote builder: estimate lines sharing one discount percentage.

use crate::browse::filter_products;
use crate::pricing::listed_price;
use crate::products::ProductRow;

/// Column headers of an exported estimate, in export order.
pub const ESTIMATE_HEADERS: [&str; 7] = ["코드", "품명", "규격", "수량", "단가", "공급가액", "비고"];

/// Value-added tax applied on top of the supply total.
const VAT_RATE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateLine {
    pub code: String,
    pub name: String,
    pub size: String,
    pub qty: u32,
    pub unit_price: f64,
    /// `round(unit_price * qty * (1 - discount_pct / 100))`; kept in sync by
    /// every [`Estimate`] mutator.
    pub supply: f64,
    pub note: Option<String>,
}

impl Default for EstimateLine {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            size: String::new(),
            qty: 1,
            unit_price: 0.0,
            supply: 0.0,
            note: None,
        }
    }
}

impl EstimateLine {
    /// A line with no product picked yet.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }

    fn recompute(&mut self, discount_pct: f64) {
        self.supply = supply_amount(self.unit_price, self.qty, discount_pct);
    }
}

/// Supply amount for one line, rounded half-up to a whole won.
#[must_use]
pub fn supply_amount(unit_price: f64, qty: u32, discount_pct: f64) -> f64 {
    (unit_price * f64::from(qty) * (1.0 - discount_pct / 100.0) + 0.5).floor()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateTotals {
    pub supply: f64,
    pub vat: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    discount_pct: f64,
    lines: Vec<EstimateLine>,
}

impl Default for Estimate {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Estimate {
    /// An estimate pre-filled with `blank_lines` empty lines.
    #[must_use]
    pub fn new(blank_lines: usize) -> Self {
        Self {
            discount_pct: 0.0,
            lines: vec![EstimateLine::default(); blank_lines],
        }
    }

    #[must_use]
    pub fn discount_pct(&self) -> f64 {
        self.discount_pct
    }

    #[must_use]
    pub fn lines(&self) -> &[EstimateLine] {
        &self.lines
    }

    /// Lines with a product picked, in order.
    pub fn filled_lines(&self) -> impl Iterator<Item = &EstimateLine> {
        self.lines.iter().filter(|l| !l.is_blank())
    }

    /// Sets the shared discount (clamped into `0..=100`) and recomputes every line.
    pub fn set_discount_pct(&mut self, pct: f64) {
        self.discount_pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
        let discount = self.discount_pct;
        for line in &mut self.lines {
            line.recompute(discount);
        }
    }

    pub fn set_qty(&mut self, index: usize, qty: u32) -> Option<&EstimateLine> {
        let discount = self.discount_pct;
        let line = self.lines.get_mut(index)?;
        line.qty = qty;
        line.recompute(discount);
        Some(line)
    }

    /// Negative or non-finite prices are stored as `0`.
    pub fn set_unit_price(&mut self, index: usize, unit_price: f64) -> Option<&EstimateLine> {
        let discount = self.discount_pct;
        let line = self.lines.get_mut(index)?;
        line.unit_price = if unit_price.is_finite() { unit_price.max(0.0) } else { 0.0 };
        line.recompute(discount);
        Some(line)
    }

    pub fn set_note(&mut self, index: usize, note: Option<String>) -> Option<&EstimateLine> {
        let line = self.lines.get_mut(index)?;
        line.note = note.filter(|n| !n.trim().is_empty());
        Some(line)
    }

    /// Copies code, name and size from `product` into line `index` and takes
    /// its listed price as the unit price. Quantity and note are kept.
    pub fn fill_from_product(&mut self, index: usize, product: &ProductRow) -> Option<&EstimateLine> {
        let discount = self.discount_pct;
        let line = self.lines.get_mut(index)?;
        line.code.clone_from(&product.code);
        line.name.clone_from(&product.name);
        line.size.clone_from(&product.size);
        line.unit_price = listed_price(product);
        line.recompute(discount);
        Some(line)
    }

    /// Puts `product` into the first blank line, appending one when all are
    /// taken. Returns the line index.
    pub fn add_product(&mut self, product: &ProductRow, qty: u32) -> usize {
        let index = match self.lines.iter().position(EstimateLine::is_blank) {
            Some(i) => i,
            None => {
                self.lines.push(EstimateLine::default());
                self.lines.len() - 1
            }
        };
        self.fill_from_product(index, product);
        self.set_qty(index, qty);
        index
    }

    pub fn add_line(&mut self) -> usize {
        self.lines.push(EstimateLine::default());
        self.lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> Option<EstimateLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    #[must_use]
    pub fn totals(&self) -> EstimateTotals {
        let supply: f64 = self.lines.iter().map(|l| l.supply).sum();
        let vat = (supply * VAT_RATE + 0.5).floor();
        EstimateTotals {
            supply,
            vat,
            total: supply + vat,
        }
    }

    /// Catalog search for the product picker, capped at `limit` results.
    #[must_use]
    pub fn search<'a>(items: &'a [ProductRow], query: &str, limit: usize) -> Vec<&'a ProductRow> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let mut hits = filter_products(items, query, "");
        hits.truncate(limit);
        hits
    }
}
