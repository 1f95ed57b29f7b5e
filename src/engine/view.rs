//! Derived list views
//!
//! Pure functions over the mirror and the current search/filter state.

use std::cmp::Ordering;

use pinyin::ToPinyin;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::Item;

/// Locale-aware name comparison.
///
/// Accents and case only break ties: "açúcar" sorts next to "acucar" and
/// "banana" before "Beans". Among names differing only in case, lowercase
/// comes first. Chinese characters sort by pinyin.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| uppercase_marks(a).cmp(&uppercase_marks(b)))
        .then_with(|| a.cmp(b))
}

fn uppercase_marks(name: &str) -> Vec<bool> {
    name.chars().map(char::is_uppercase).collect()
}

fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        match c.to_pinyin() {
            Some(p) => key.push_str(p.plain()),
            None => key.extend(c.to_lowercase()),
        }
    }
    key
}

/// Items matching `search` and `subcategory`, sorted by priority then name.
///
/// - blank search text matches everything; otherwise name or subcategory must
///   contain it, ignoring case
/// - the subcategory filter is an exact, case-sensitive match
pub fn filter_and_sort<'a>(
    items: &'a [Item],
    search: &str,
    subcategory: Option<&str>,
) -> Vec<&'a Item> {
    let query = search.to_lowercase();
    let searching = !search.trim().is_empty();

    let mut visible: Vec<&Item> = items
        .iter()
        .filter(|item| !searching || matches_search(item, &query))
        .filter(|item| subcategory.map_or(true, |wanted| item.subcategory == wanted))
        .collect();

    visible.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| compare_names(&a.name, &b.name))
    });
    visible
}

fn matches_search(item: &Item, lowercase_query: &str) -> bool {
    item.name.to_lowercase().contains(lowercase_query)
        || item.subcategory.to_lowercase().contains(lowercase_query)
}

/// Distinct non-blank subcategories, trimmed and sorted
pub fn available_subcategories(items: &[Item]) -> Vec<String> {
    let mut subcategories: Vec<String> = items
        .iter()
        .map(|item| item.subcategory.trim())
        .filter(|sub| !sub.is_empty())
        .map(str::to_string)
        .collect();
    subcategories.sort_by(|a, b| compare_names(a, b));
    subcategories.dedup();
    subcategories
}

/// Why the visible list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing matches the active search or filter
    NoMatches,
    /// The list itself has no items
    EmptyList,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoMatches => "No items match your filters.",
            EmptyState::EmptyList => "Your shopping list is empty. Start by adding an item!",
        }
    }
}
