//! RSS and sitemap XML generation.

use crate::application::services::SITEMAP_PAGE_SIZE;
use crate::domain::entities::Product;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io;

const FEED_TITLE: &str = "New products";
const FEED_DESCRIPTION: &str = "Recently added products";
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

fn into_string(writer: Writer<Vec<u8>>) -> String {
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Renders the RSS 2.0 feed of recently added products.
pub fn render_rss(site_base: &str, products: &[Product]) -> io::Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("rss")
        .with_attribute(("version", "2.0"))
        .write_inner_content(|rss| {
            rss.create_element("channel").write_inner_content(|ch| {
                ch.create_element("title")
                    .write_text_content(BytesText::new(FEED_TITLE))?;
                ch.create_element("link")
                    .write_text_content(BytesText::new(site_base))?;
                ch.create_element("description")
                    .write_text_content(BytesText::new(FEED_DESCRIPTION))?;

                for product in products {
                    let url = format!("{}{}", site_base, product.path());
                    ch.create_element("item").write_inner_content(|item| {
                        item.create_element("title")
                            .write_text_content(BytesText::new(&product.name))?;
                        item.create_element("link")
                            .write_text_content(BytesText::new(&url))?;
                        item.create_element("guid")
                            .with_attribute(("isPermaLink", "true"))
                            .write_text_content(BytesText::new(&url))?;
                        if let Some(ref description) = product.description {
                            item.create_element("description")
                                .write_text_content(BytesText::new(description))?;
                        }
                        if let Some(created_at) = product.created_at {
                            item.create_element("pubDate")
                                .write_text_content(BytesText::new(&created_at.to_rfc2822()))?;
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
            Ok(())
        })?;

    Ok(into_string(writer))
}

/// Renders the sitemap index pointing at the product sub-sitemaps.
pub fn render_sitemap_index(site_base: &str, product_count: u64) -> io::Result<String> {
    let sitemap_count = product_count.div_ceil(SITEMAP_PAGE_SIZE as u64);

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("sitemapindex")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|index| {
            for n in 1..=sitemap_count {
                let loc = format!("{site_base}/sitemaps/products-{n}.xml");
                index.create_element("sitemap").write_inner_content(|s| {
                    s.create_element("loc")
                        .write_text_content(BytesText::new(&loc))?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;

    Ok(into_string(writer))
}

/// Renders one product sub-sitemap.
pub fn render_product_sitemap(site_base: &str, products: &[Product]) -> io::Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|urlset| {
            for product in products {
                let loc = format!("{}{}", site_base, product.path());
                urlset.create_element("url").write_inner_content(|u| {
                    u.create_element("loc")
                        .write_text_content(BytesText::new(&loc))?;
                    if let Some(created_at) = product.created_at {
                        u.create_element("lastmod")
                            .write_text_content(BytesText::new(
                                &created_at.format("%Y-%m-%d").to_string(),
                            ))?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })?;

    Ok(into_string(writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: Some("A <fine> product".to_string()),
            price: Some(9.99),
            image_url: None,
            category: None,
            maker: None,
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_rss_contains_items_with_absolute_links() {
        let xml = render_rss("https://shop.example", &[product(1, "Camera")]).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<title>Camera</title>"));
        assert!(xml.contains("<link>https://shop.example/products/1</link>"));
        assert!(xml.contains("<pubDate>"));
    }

    #[test]
    fn test_rss_escapes_markup_in_text() {
        let xml = render_rss("https://shop.example", &[product(1, "a < b")]).unwrap();
        assert!(xml.contains("a &lt; b"));
        assert!(xml.contains("A &lt;fine&gt; product"));
    }

    #[test]
    fn test_sitemap_index_rounds_up() {
        let xml = render_sitemap_index("https://shop.example", 2500).unwrap();
        assert!(xml.contains("https://shop.example/sitemaps/products-1.xml"));
        assert!(xml.contains("https://shop.example/sitemaps/products-3.xml"));
        assert!(!xml.contains("products-4.xml"));
    }

    #[test]
    fn test_empty_catalog_yields_empty_index() {
        let xml = render_sitemap_index("https://shop.example", 0).unwrap();
        assert!(!xml.contains("<sitemap>"));
    }

    #[test]
    fn test_product_sitemap_entries() {
        let xml =
            render_product_sitemap("https://shop.example", &[product(42, "Lens")]).unwrap();
        assert!(xml.contains("<loc>https://shop.example/products/42</loc>"));
        assert!(xml.contains("<lastmod>2026-01-15</lastmod>"));
    }
}
