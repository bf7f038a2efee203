//! Plain-text rendering of description HTML fragments
//!
//! The description endpoint returns a rich-content fragment. Only the heading,
//! the text-only paragraphs and the first ordered list carry product text.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

fn blank_lines_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank line pattern is valid"))
}

/// Extracts readable text from a description fragment
///
/// Collects, in this order:
/// - the first `h2` inside `#rich-content-wrapper`
/// - each direct `div` child of the wrapper that holds no image
/// - each `li` of the first `ol` inside the wrapper
///
/// Returns an empty string if the fragment has no content wrapper.
pub fn extract_description_text(fragment: &str) -> String {
    collect_lines(fragment)
        .map(|lines| {
            let joined = lines.join("\n");
            blank_lines_pattern()
                .replace_all(&joined, "\n")
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

fn collect_lines(fragment: &str) -> Option<Vec<String>> {
    let wrapper_selector = Selector::parse("#rich-content-wrapper").ok()?;
    let heading_selector = Selector::parse("h2").ok()?;
    let image_selector = Selector::parse("img").ok()?;
    let list_selector = Selector::parse("ol").ok()?;
    let item_selector = Selector::parse("li").ok()?;

    let document = Html::parse_fragment(fragment);
    let wrapper = document.select(&wrapper_selector).next()?;

    let mut lines = Vec::new();

    if let Some(heading) = wrapper.select(&heading_selector).next() {
        push_text(&mut lines, heading);
    }

    for div in wrapper
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "div")
    {
        if div.select(&image_selector).next().is_some() {
            continue;
        }
        push_text(&mut lines, div);
    }

    if let Some(list) = wrapper.select(&list_selector).next() {
        for item in list.select(&item_selector) {
            push_text(&mut lines, item);
        }
    }

    Some(lines)
}

fn push_text(lines: &mut Vec<String>, element: ElementRef<'_>) {
    let text = element.text().collect::<String>();
    let text = text.trim();
    // Escaped line breaks show up as literal text in some fragments
    if !text.is_empty() && text != "<br>" {
        lines.push(text.to_string());
    }
}
