use crate::utils::error::Result;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Static routes first, then one route per published project.
pub fn sitemap_entries(base_url: &str, project_ids: &[String], today: NaiveDate) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let mut entries = vec![
        SitemapEntry {
            url: base.to_string(),
            last_modified: today,
            change_frequency: "monthly",
            priority: 1.0,
        },
        SitemapEntry {
            url: format!("{}/about", base),
            last_modified: today,
            change_frequency: "monthly",
            priority: 0.8,
        },
    ];

    entries.extend(project_ids.iter().map(|id| SitemapEntry {
        url: format!("{}/projects/{}", base, id),
        last_modified: today,
        change_frequency: "monthly",
        priority: 0.6,
    }));

    entries
}

/// Serializes entries as a sitemaps.org `urlset` document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
    ))?;

    for entry in entries {
        let last_modified = entry.last_modified.format("%Y-%m-%d").to_string();
        let priority = format!("{:.1}", entry.priority);

        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer
            .create_element("loc")
            .write_text_content(BytesText::new(&entry.url))?;
        writer
            .create_element("lastmod")
            .write_text_content(BytesText::new(&last_modified))?;
        writer
            .create_element("changefreq")
            .write_text_content(BytesText::new(entry.change_frequency))?;
        writer
            .create_element("priority")
            .write_text_content(BytesText::new(&priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
