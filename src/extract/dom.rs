//! Minimal element capability the extraction heuristics are written against.
//!
//! Every heuristic only needs three things from a tree node: an attribute by
//! name, its visible text, and its descendants matching a CSS selector. The
//! `scraper` implementation below is the one used in production; anything
//! else that can answer those three questions can drive the pipeline.

use std::cell::RefCell;
use std::collections::HashMap;

use scraper::{ElementRef, Selector};

thread_local! {
    /// Compiled selectors by source text. `None` marks a selector that failed
    /// to parse, so it is reported once and then skipped.
    static SELECTORS: RefCell<HashMap<String, Option<Selector>>> = RefCell::new(HashMap::new());
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(selector, error = ?e, "unsupported selector, skipping");
            None
        }
    }
}

pub trait TreeElement: Sized {
    /// Attribute value, `None` when the attribute is absent.
    fn attr(&self, name: &str) -> Option<String>;

    /// Visible text with whitespace runs collapsed to single spaces.
    fn text(&self) -> String;

    /// Descendants matching `selector`, in document order. A selector the
    /// backend cannot understand matches nothing.
    fn select(&self, selector: &str) -> Vec<Self>;

    /// Attribute value, or the empty string when absent.
    fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default()
    }
}

impl<'a> TreeElement for ElementRef<'a> {
    fn attr(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        let raw: String = ElementRef::text(self).collect();
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn select(&self, selector: &str) -> Vec<Self> {
        SELECTORS.with(|cache| {
            let mut cache = cache.borrow_mut();
            let compiled = cache
                .entry(selector.to_string())
                .or_insert_with(|| compile(selector));
            match compiled.as_ref() {
                Some(parsed) => ElementRef::select(self, parsed).collect(),
                None => Vec::new(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn text_collapses_whitespace_across_nodes() {
        let html = Html::parse_fragment("<div>  Radiant\n   <b>Victory</b>  </div>");
        let div = TreeElement::select(&html.root_element(), "div").remove(0);
        assert_eq!(TreeElement::text(&div), "Radiant Victory");
    }

    #[test]
    fn missing_attribute_is_none() {
        let html = Html::parse_fragment(r#"<img src="/a.png">"#);
        let img = TreeElement::select(&html.root_element(), "img").remove(0);
        assert_eq!(img.attr("src").as_deref(), Some("/a.png"));
        assert_eq!(img.attr("alt"), None);
        assert_eq!(img.attr_or_empty("alt"), "");
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let html = Html::parse_fragment("<p>x</p>");
        assert!(TreeElement::select(&html.root_element(), "p[[").is_empty());
    }

    fn cached_selectors() -> usize {
        SELECTORS.with(|cache| cache.borrow().len())
    }

    #[test]
    fn selectors_are_compiled_once_per_source() {
        let html = Html::parse_fragment("<ul><li>a</li><li>b</li></ul>");
        let root = html.root_element();
        let before = cached_selectors();

        for _ in 0..3 {
            assert_eq!(TreeElement::select(&root, "ul > li").len(), 2);
            assert!(TreeElement::select(&root, "li[[").is_empty());
        }
        assert_eq!(cached_selectors(), before + 2);
    }
}
