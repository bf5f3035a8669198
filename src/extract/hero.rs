use std::sync::LazyLock;

use regex::Regex;

use super::cascade::first_accepted;
use super::dom::TreeElement;

/// Where hero portraits usually live inside a match row, in priority order.
pub const HERO_IMAGE_SELECTORS: &[&str] = &[
    ".cell-xlarge img",
    ".r-tab-hero img",
    "td:first-child img",
    ".match-cell--hero img",
    ".cell-hero img",
    "td img[src*='heroes']",
    "img[src*='/heroes/']",
];

/// Image path substrings that mark a hero icon rather than an item or
/// ability icon. Decorative images containing "hero" pass too.
pub const HERO_PATH_MARKERS: &[&str] = &["/heroes/", "hero"];

/// Ability and spell names seen in the same image family as hero icons.
pub const ABILITY_TERMS: &[&str] = &[
    "bladestorm",
    "omnislash",
    "blade fury",
    "healing ward",
    "berserker",
    "battle hunger",
    "culling blade",
    "hook",
    "rot",
    "dismember",
    "fissure",
    "enchant totem",
    "echo slam",
    "power shot",
    "windrun",
    "focus fire",
    "mana burn",
    "blink",
    "reality rift",
    "telekinesis",
    "spell steal",
    "invoke",
    "storm bolt",
    "thunder clap",
    "god's strength",
];

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".gif"];
const SIZE_SUFFIXES: &[&str] = &["_full", "_icon", "_small", "_vert", "_large"];

static TRAILING_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - .*").expect("invalid regex: trailing dash"));
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("invalid regex: parenthesized"));
static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Ability|Spell): ").expect("invalid regex: label prefix"));

/// Resolves the hero played in `row`, or `None` when no hero icon can be
/// found or no usable name can be derived from it.
pub fn identify_hero<E: TreeElement>(row: &E) -> Option<String> {
    let image = first_accepted(row, HERO_IMAGE_SELECTORS, |img| {
        let src = img.attr_or_empty("src");
        HERO_PATH_MARKERS.iter().any(|marker| src.contains(marker))
    })?;

    let src = image.attr_or_empty("src");
    let alt = image.attr_or_empty("alt");
    let title = image.attr_or_empty("title");

    let candidate = usable_label(&alt)
        .or_else(|| usable_label(&title))
        .or_else(|| name_from_path(&src))?;
    let name = clean_hero_name(&candidate);

    if name.is_empty() {
        tracing::debug!(src = %src, "hero name empty after cleanup");
        None
    } else {
        Some(name)
    }
}

fn usable_label(label: &str) -> Option<String> {
    if label.trim().is_empty() || is_ability_name(label) {
        None
    } else {
        Some(label.to_string())
    }
}

/// True when `name` contains any known ability or spell fragment.
pub fn is_ability_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    ABILITY_TERMS.iter().any(|term| lower.contains(term))
}

/// Derives a display name from the image file name, e.g.
/// `/assets/heroes/juggernaut_full.png` becomes `Juggernaut`.
pub fn name_from_path(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next().unwrap_or_default();

    path.split('/').find_map(|segment| {
        let mut stem = IMAGE_EXTENSIONS
            .iter()
            .find_map(|ext| strip_suffix_ignore_case(segment, ext))?;

        while let Some(rest) = SIZE_SUFFIXES
            .iter()
            .find_map(|suffix| strip_suffix_ignore_case(stem, suffix))
        {
            stem = rest;
        }

        let name = title_case(&stem.replace(['_', '-'], " "));
        (name.chars().count() > 2).then_some(name)
    })
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    (s.is_char_boundary(split) && s[split..].eq_ignore_ascii_case(suffix)).then(|| &s[..split])
}

fn title_case(words: &str) -> String {
    words
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Strips ` - ...` tails, parenthesized notes and `Ability: ` / `Spell: `
/// labels.
pub fn clean_hero_name(name: &str) -> String {
    let name = TRAILING_DASH.replace_all(name, "");
    let name = PARENTHESIZED.replace_all(&name, "");
    let name = LABEL_PREFIX.replace_all(&name, "");
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn hero_in(row_markup: &str) -> Option<String> {
        let doc = Html::parse_document(&format!("<table><tbody><tr>{row_markup}</tr></tbody></table>"));
        let row = TreeElement::select(&doc.root_element(), "tr").remove(0);
        identify_hero(&row)
    }

    #[test]
    fn alt_text_is_preferred() {
        let hero = hero_in(r#"<td><img src="/assets/heroes/axe_full.png" alt="Axe" title="Mogul Khan"></td>"#);
        assert_eq!(hero.as_deref(), Some("Axe"));
    }

    #[test]
    fn ability_alt_falls_back_to_title() {
        let hero = hero_in(
            r#"<td><img src="/assets/heroes/pudge.png" alt="Meat Hook" title="Pudge"></td>"#,
        );
        assert_eq!(hero.as_deref(), Some("Pudge"));
    }

    #[test]
    fn ability_alt_and_title_fall_back_to_path() {
        let hero = hero_in(
            r#"<td><img src="/assets/heroes/juggernaut_full.png" alt="Omnislash" title="Blade Fury"></td>"#,
        );
        assert_eq!(hero.as_deref(), Some("Juggernaut"));
    }

    #[test]
    fn first_matching_selector_wins() {
        let hero = hero_in(
            r#"<td><img src="/assets/items/blink.png" alt="Blink Dagger"></td>
               <td class="cell-xlarge"><img src="/assets/heroes/lina.png" alt="Lina"></td>"#,
        );
        assert_eq!(hero.as_deref(), Some("Lina"));
    }

    #[test]
    fn non_hero_images_are_ignored() {
        assert_eq!(hero_in(r#"<td><img src="/assets/items/blink.png" alt="Blink"></td>"#), None);
        assert_eq!(hero_in("<td>Axe</td>"), None);
    }

    #[test]
    fn name_is_cleaned() {
        assert_eq!(clean_hero_name("Invoker - Exort build"), "Invoker");
        assert_eq!(clean_hero_name("Tiny (Prestige)"), "Tiny");
        assert_eq!(clean_hero_name("Ability: Sven"), "Sven");
        assert_eq!(clean_hero_name("  Spell: Lion  "), "Lion");
    }

    #[test]
    fn cleanup_to_empty_yields_none() {
        let hero = hero_in(r#"<td><img src="/assets/heroes/x.png" alt="(unknown)"></td>"#);
        assert_eq!(hero, None);
    }

    #[test]
    fn path_names_drop_suffixes_and_separators() {
        assert_eq!(name_from_path("/heroes/juggernaut_full.png").as_deref(), Some("Juggernaut"));
        assert_eq!(
            name_from_path("https://cdn.example/heroes/anti_mage_icon.jpg?v=3").as_deref(),
            Some("Anti Mage")
        );
        assert_eq!(name_from_path("/heroes/queen-of-pain_vert.webp").as_deref(), Some("Queen Of Pain"));
        assert_eq!(name_from_path("/heroes/io.png"), None);
        assert_eq!(name_from_path("/heroes/"), None);
    }

    #[test]
    fn ability_terms_match_case_insensitively() {
        assert!(is_ability_name("Echo Slam"));
        assert!(is_ability_name("GOD'S STRENGTH"));
        assert!(!is_ability_name("Earthshaker"));
    }
}
