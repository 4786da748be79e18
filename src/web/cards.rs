//! Link card rendering and placeholder substitution.

use crate::application::services::LinkCardData;
use askama::Template;
use lol_html::html_content::ContentType;
use lol_html::{element, HtmlRewriter, Settings};
use std::collections::HashMap;
use url::Url;

/// Template for one inline link card.
///
/// Rendered with full metadata when extraction succeeded, and as a bare
/// outbound link otherwise (`has_meta` false).
#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    has_meta: bool,
    external: bool,
    link_url: &'a str,
    title: &'a str,
    description: Option<&'a str>,
    image_url: Option<&'a str>,
    favicon_url: Option<&'a str>,
    host: &'a str,
}

/// Renders one card to an HTML snippet.
///
/// The `external` flag controls new-tab navigation; the renderer does no
/// classification of its own. A record without a title renders as a bare
/// link, same as a missing record.
pub fn render_card(card: &LinkCardData, external: bool) -> String {
    let host = Url::parse(&card.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    let template = match &card.ogp {
        Some(ogp) if ogp.title.is_some() => CardTemplate {
            has_meta: true,
            external,
            link_url: &ogp.link_url,
            title: ogp.title.as_deref().unwrap_or_default(),
            description: ogp.description.as_deref(),
            image_url: ogp.image_url.as_deref(),
            favicon_url: ogp.favicon_url.as_deref(),
            host: &host,
        },
        _ => CardTemplate {
            has_meta: false,
            external,
            link_url: &card.url,
            title: &card.url,
            description: None,
            image_url: None,
            favicon_url: None,
            host: &host,
        },
    };

    template.render().unwrap_or_else(|e| {
        tracing::error!(url = %card.url, error = %e, "Card template render failed");
        String::new()
    })
}

/// Replaces every card placeholder in `html` with its rendered card.
///
/// Placeholders whose target has no card data are left in place; they are
/// empty elements and render as nothing.
pub fn substitute_cards(html: &str, cards: &[LinkCardData]) -> String {
    if cards.is_empty() {
        return html.to_string();
    }

    let rendered: HashMap<&str, String> = cards
        .iter()
        .map(|card| (card.url.as_str(), render_card(card, true)))
        .collect();

    let mut output = Vec::new();
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("[data-link-card-placeholder]", |el| {
                if let Some(url) = el.get_attribute("data-resolved-href")
                    && let Some(card_html) = rendered.get(url.as_str())
                {
                    el.replace(card_html, ContentType::Html);
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::error!(error = %e, "Card substitution failed, serving content without cards");
        return html.to_string();
    }
    if let Err(e) = rewriter.end() {
        tracing::error!(error = %e, "Card substitution failed, serving content without cards");
        return html.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OgpRecord;

    fn card(url: &str, title: Option<&str>) -> LinkCardData {
        let ogp = title.map(|t| {
            let mut record = OgpRecord::empty(url);
            record.title = Some(t.to_string());
            record.description = Some("desc".to_string());
            record
        });
        LinkCardData {
            url: url.to_string(),
            ogp,
        }
    }

    #[test]
    fn test_card_with_metadata_renders_title() {
        let html = render_card(&card("https://shop.example/item", Some("An Item")), true);
        assert!(html.contains("An Item"));
        assert!(html.contains("https://shop.example/item"));
        assert!(html.contains("shop.example"));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_internal_card_opens_in_same_tab() {
        let html = render_card(&card("https://shop.example/item", Some("An Item")), false);
        assert!(!html.contains("target="));
        assert!(!html.contains("rel="));
    }

    #[test]
    fn test_card_without_metadata_falls_back_to_bare_link() {
        let html = render_card(&card("https://down.example/p", None), true);
        assert!(html.contains(r#"href="https://down.example/p""#));
        assert!(!html.contains("link-card-body"));
    }

    #[test]
    fn test_untitled_record_falls_back_to_bare_link() {
        let mut data = card("https://shop.example/item", Some("unused"));
        data.ogp.as_mut().unwrap().title = None;

        let html = render_card(&data, true);
        assert!(html.contains(r#"href="https://shop.example/item""#));
        assert!(!html.contains("link-card-body"));
    }

    #[test]
    fn test_card_link_points_at_deep_link() {
        let mut data = card("https://shop.example/item", Some("An Item"));
        data.ogp.as_mut().unwrap().link_url =
            "https://click.linksynergy.com/deeplink?id=x".to_string();

        let html = render_card(&data, true);
        assert!(html.contains(r#"href="https://click.linksynergy.com/deeplink?id=x""#));
    }

    #[test]
    fn test_substitute_replaces_placeholder() {
        let body = r#"<p>intro</p><div data-link-card-placeholder data-resolved-href="https://shop.example/item"></div>"#;
        let out = substitute_cards(body, &[card("https://shop.example/item", Some("An Item"))]);

        assert!(out.contains("intro"));
        assert!(out.contains("An Item"));
        assert!(!out.contains("data-link-card-placeholder"));
    }

    #[test]
    fn test_placeholder_without_card_data_is_left_alone() {
        let body = r#"<div data-link-card-placeholder data-resolved-href="https://other.example/"></div>"#;
        let out = substitute_cards(body, &[card("https://shop.example/item", Some("An Item"))]);
        assert!(out.contains("data-link-card-placeholder"));
    }
}
