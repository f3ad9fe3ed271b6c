//! Catalog browsing: search, category filter, sorting, and paging over a
//! read-only snapshot of [`ProductRow`]s.

use std::cmp::Ordering;

use crate::products::ProductRow;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Column a catalog listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Code,
    Name,
    Size,
    Category,
    Deal,
    Online,
    Cost,
    DiscountRate,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "code" => Ok(SortKey::Code),
            "name" => Ok(SortKey::Name),
            "size" => Ok(SortKey::Size),
            "category" => Ok(SortKey::Category),
            "deal" => Ok(SortKey::Deal),
            "online" => Ok(SortKey::Online),
            "cost" => Ok(SortKey::Cost),
            "discountRate" | "discount_rate" => Ok(SortKey::DiscountRate),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Rows matching `category` (exact, empty = any) and `query`
/// (case-insensitive substring of code, name and size).
#[must_use]
pub fn filter_products<'a>(
    items: &'a [ProductRow],
    query: &str,
    category: &str,
) -> Vec<&'a ProductRow> {
    let needle = query.trim().to_lowercase();
    let category = category.trim();
    items
        .iter()
        .filter(|item| category.is_empty() || item.category == category)
        .filter(|item| needle.is_empty() || item.search_text().contains(&needle))
        .collect()
}

/// Stable sort of `rows` by `key`.
pub fn sort_products(rows: &mut [&ProductRow], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_by(a, b, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &ProductRow, b: &ProductRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Code => a.code.cmp(&b.code),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Size => a.size.cmp(&b.size),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Deal => a.deal.total_cmp(&b.deal),
        SortKey::Online => a.online.total_cmp(&b.online),
        SortKey::Cost => a.cost.total_cmp(&b.cost),
        SortKey::DiscountRate => a.discount_rate.total_cmp(&b.discount_rate),
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// 1-based page number after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<&'a ProductRow>,
}

/// Slices `rows` into 1-based pages; out-of-range page numbers are clamped.
#[must_use]
pub fn paginate<'a>(rows: &[&'a ProductRow], page: usize, page_size: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let total_pages = rows.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(rows.len());
    Page {
        page,
        total_pages,
        total_items: rows.len(),
        items: rows.get(start..end).map(<[_]>::to_vec).unwrap_or_default(),
    }
}

/// Distinct non-empty category codes, sorted.
#[must_use]
pub fn categories(items: &[ProductRow]) -> Vec<String> {
    let mut codes: Vec<String> = items
        .iter()
        .map(|item| item.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    codes.sort();
    codes.dedup();
    codes
}

/// Human label for a category code, e.g. `"WRK"` → `"작업대(WRK)"`.
/// Unknown codes are returned unchanged.
#[must_use]
pub fn category_label(code: &str) -> String {
    let label = match code {
        "WRK" => "작업대",
        "SNK" => "싱크대",
        "SHF" => "선반",
        "GAS" => "가스장비",
        "KIT" => "주방키트",
        "EQP" => "설비",
        "DWR" => "서랍",
        "ETC" => "기타",
        "ACC" => "악세사리",
        _ => return code.to_string(),
    };
    format!("{label}({code})")
}

#[cfg(test)]
#[path = "browse_test.rs"]
mod tests;
