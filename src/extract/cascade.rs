//! Ordered fallback evaluation shared by the row, hero and outcome heuristics.

use super::dom::TreeElement;

/// Walks `selectors` in priority order and, within each, the matched
/// elements in document order. Returns the first element `accept` admits.
pub fn first_accepted<E, P>(scope: &E, selectors: &[&str], accept: P) -> Option<E>
where
    E: TreeElement,
    P: Fn(&E) -> bool,
{
    selectors
        .iter()
        .find_map(|selector| scope.select(selector).into_iter().find(|el| accept(el)))
}

/// Returns the matches of the first selector that yields anything. Results
/// of different selectors are never merged.
pub fn first_non_empty<E>(scope: &E, selectors: &[&str]) -> Vec<E>
where
    E: TreeElement,
{
    for selector in selectors {
        let found = scope.select(selector);
        if !found.is_empty() {
            tracing::debug!(selector, count = found.len(), "selector matched");
            return found;
        }
    }
    Vec::new()
}
