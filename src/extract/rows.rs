use super::cascade::first_non_empty;
use super::dom::TreeElement;

/// Candidate row selectors, most specific first.
pub const ROW_SELECTORS: &[&str] = &[
    ".matches-tab table tbody tr",
    "tbody tr",
    ".match-row",
    "table tr",
];

/// Rows of the first selector that matches anything. An empty result means
/// the page has no recognisable rows, which callers treat as "no matches".
pub fn locate_rows<E: TreeElement>(root: &E) -> Vec<E> {
    let rows = first_non_empty(root, ROW_SELECTORS);
    if rows.is_empty() {
        tracing::debug!("no candidate match rows found");
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn row_texts(markup: &str) -> Vec<String> {
        let doc = Html::parse_document(markup);
        locate_rows(&doc.root_element())
            .iter()
            .map(TreeElement::text)
            .collect()
    }

    #[test]
    fn body_rows_win_over_header_rows() {
        let rows = row_texts(
            "<table><thead><tr><th>Hero</th></tr></thead>\
             <tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>",
        );
        assert_eq!(rows, vec!["a", "b"]);
    }

    #[test]
    fn match_tab_table_is_preferred() {
        let rows = row_texts(
            "<table><tbody><tr><td>sidebar</td></tr></tbody></table>\
             <div class=\"matches-tab\"><table><tbody><tr><td>match</td></tr></tbody></table></div>",
        );
        assert_eq!(rows, vec!["match"]);
    }

    #[test]
    fn div_rows_are_found_without_tables() {
        let rows = row_texts(
            "<div class=\"match-row\">one</div><div class=\"match-row\">two</div>",
        );
        assert_eq!(rows, vec!["one", "two"]);
    }

    #[test]
    fn page_without_rows_is_empty() {
        assert!(row_texts("<p>This player has not played any matches.</p>").is_empty());
    }
}
