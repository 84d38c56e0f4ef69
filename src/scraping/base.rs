use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::models::Pricing;
use crate::patterns;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector"));

const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

pub fn clean_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

pub fn inner_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Element text with line structure kept: lines trimmed, blank lines dropped.
pub fn block_text(element: ElementRef<'_>) -> String {
    let raw = element.text().collect::<String>();
    let mut out = String::new();
    for line in raw.lines() {
        let trimmed = clean_text(line);
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&trimmed);
    }
    out
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|node| non_empty(inner_text(node)))
}

pub fn first_block(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|node| non_empty(block_text(node)))
}

/// Attribute of the first element matching `selector`, if that element has it.
pub fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn title_text(document: &Html) -> Option<String> {
    first_text(document, &TITLE_SELECTOR)
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    HIDDEN_TAGS.contains(&element.value().name())
}

/// Every text node outside script-like elements, paired with its parent
/// element, in document order.
pub fn visible_text_nodes(document: &Html) -> Vec<(&str, ElementRef<'_>)> {
    let mut nodes = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let Some(parent) = node.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(is_hidden);
        if hidden {
            continue;
        }
        nodes.push((&**text, parent));
    }
    nodes
}

/// Visible text nodes joined into one string, separated by spaces.
pub fn visible_text(nodes: &[(&str, ElementRef<'_>)]) -> String {
    nodes
        .iter()
        .map(|(text, _)| *text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two-tier price policy for a block of text: a "free" mention wins,
/// otherwise the first currency amount.
pub fn pricing_from_text(text: &str) -> Option<Pricing> {
    if patterns::mentions_free(text) {
        return Some(Pricing::Free);
    }
    patterns::find_amount(text).map(Pricing::Paid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
    <html>
      <head>
        <title>  Harvest   Festival | Town Events </title>
        <style>.free { color: red; }</style>
      </head>
      <body>
        <div class="about">
          First line
             of text

          Second   paragraph
        </div>
        <script>var free = true;</script>
        <img class="hero" src=" /img/hero.png ">
        <img class="empty" src="">
      </body>
    </html>
    "#;

    #[test]
    fn extracts_clean_and_block_text() {
        let document = Html::parse_document(SAMPLE_HTML);
        assert_eq!(
            title_text(&document).as_deref(),
            Some("Harvest Festival | Town Events")
        );
        let about = Selector::parse(".about").expect("about selector");
        assert_eq!(
            first_block(&document, &about).as_deref(),
            Some("First line\nof text\nSecond paragraph")
        );
        assert_eq!(
            first_text(&document, &about).as_deref(),
            Some("First line of text Second paragraph")
        );
    }

    #[test]
    fn first_attr_skips_missing_values() {
        let document = Html::parse_document(SAMPLE_HTML);
        let hero = Selector::parse("img.hero").expect("hero selector");
        let empty = Selector::parse("img.empty").expect("empty selector");
        assert_eq!(
            first_attr(&document, &hero, "src").as_deref(),
            Some("/img/hero.png")
        );
        assert_eq!(first_attr(&document, &empty, "src"), None);
    }

    #[test]
    fn visible_text_ignores_scripts_and_styles() {
        let document = Html::parse_document(SAMPLE_HTML);
        let nodes = visible_text_nodes(&document);
        let text = visible_text(&nodes);
        assert!(text.contains("Harvest"));
        assert!(text.contains("Second"));
        assert!(!text.to_lowercase().contains("free"));
    }

    #[test]
    fn pricing_policy_prefers_free() {
        assert_eq!(pricing_from_text("Free - donations welcome $5"), Some(Pricing::Free));
        assert_eq!(
            pricing_from_text("General $12.50, VIP $30"),
            Some(Pricing::Paid("$12.50".to_string()))
        );
        assert_eq!(pricing_from_text("Pay what you can"), None);
    }
}
