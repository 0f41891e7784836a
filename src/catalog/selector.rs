use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::catalog::item::{CatalogItem, Category};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("catalog is empty, no skill can be selected")]
    EmptyCatalog,
}

/// Days elapsed since Dec 31 of the previous year, so Jan 1 is 1.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Items eligible under the interest filter, in catalog order.
/// An empty filter admits every item. A filter naming only categories the
/// catalog has no items for also admits every item.
pub fn candidate_pool<'a>(
    items: &'a [CatalogItem],
    interests: &HashSet<Category>,
) -> Vec<&'a CatalogItem> {
    if interests.is_empty() {
        return items.iter().collect();
    }

    let pool: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| interests.contains(&item.category))
        .collect();

    if pool.is_empty() {
        tracing::debug!(
            interests = ?interests,
            "No catalog items match interests, using whole catalog"
        );
        return items.iter().collect();
    }
    pool
}

/// Pick today's item: filter by interests, drop completed ids (unless that
/// drops everything), then index the pool by day of year.
pub fn select_daily<'a>(
    items: &'a [CatalogItem],
    interests: &HashSet<Category>,
    excluded_ids: &HashSet<String>,
    today: NaiveDate,
) -> Result<&'a CatalogItem, SelectError> {
    if items.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }

    let eligible = candidate_pool(items, interests);
    let fresh: Vec<&CatalogItem> = eligible
        .iter()
        .copied()
        .filter(|item| !excluded_ids.contains(&item.id))
        .collect();

    let pool = if fresh.is_empty() {
        tracing::debug!(
            eligible = eligible.len(),
            "Every eligible item already completed, allowing repeats"
        );
        eligible
    } else {
        fresh
    };

    let index = day_of_year(today) as usize % pool.len();
    Ok(pool[index])
}

pub fn items_by_category(items: &[CatalogItem], category: Category) -> Vec<&CatalogItem> {
    let filtered: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| item.category == category)
        .collect();

    if filtered.is_empty() && !items.is_empty() {
        tracing::debug!(category = %category, "No catalog items for category");
    }

    filtered
}
