use crate::core::{PageRecord, Project, RichText, PLACEHOLDER_IMAGE};
use crate::render::rich_text::plain_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property names of the projects data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSchema {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: String,
    pub demo_url: String,
    pub github_url: String,
    pub featured: String,
    pub status: String,
    pub published_value: String,
    pub order: String,
}

impl Default for ProjectSchema {
    fn default() -> Self {
        Self {
            title: "Name".to_string(),
            description: "Description".to_string(),
            image: "Image".to_string(),
            tags: "Tech Stack".to_string(),
            demo_url: "Demo URL".to_string(),
            github_url: "GitHub URL".to_string(),
            featured: "Featured".to_string(),
            status: "Status".to_string(),
            published_value: "Published".to_string(),
            order: "Order".to_string(),
        }
    }
}

/// Projects one upstream page into a `Project`.
///
/// Every field is read independently: a missing or wrongly typed property
/// falls back to that field's default and never affects the others.
pub fn project_page(page: &PageRecord, schema: &ProjectSchema) -> Project {
    let props = &page.properties;

    Project {
        id: page.id.clone(),
        title: rich_text_property(props.get(&schema.title), "title"),
        description: rich_text_property(props.get(&schema.description), "rich_text"),
        image: image_property(props.get(&schema.image))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        tags: multi_select_property(props.get(&schema.tags)),
        demo_url: url_property(props.get(&schema.demo_url)),
        github_url: url_property(props.get(&schema.github_url)),
        featured: checkbox_property(props.get(&schema.featured)),
    }
}

/// Returns the type-specific payload of a property when its `type` tag matches.
fn typed<'a>(prop: Option<&'a Value>, expected: &str) -> Option<&'a Value> {
    let prop = prop?;
    if prop.get("type").and_then(Value::as_str) != Some(expected) {
        return None;
    }
    prop.get(expected)
}

fn rich_text_property(prop: Option<&Value>, expected: &str) -> String {
    typed(prop, expected)
        .and_then(|v| serde_json::from_value::<Vec<RichText>>(v.clone()).ok())
        .map(|spans| plain_text(&spans))
        .unwrap_or_default()
}

fn image_property(prop: Option<&Value>) -> Option<String> {
    let first = typed(prop, "files")?.as_array()?.first()?;
    let kind = first.get("type").and_then(Value::as_str)?;
    match kind {
        "file" | "external" => first
            .get(kind)
            .and_then(|f| f.get("url"))
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

fn multi_select_property(prop: Option<&Value>) -> Vec<String> {
    typed(prop, "multi_select")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|opt| opt.get("name").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn url_property(prop: Option<&Value>) -> Option<String> {
    typed(prop, "url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(String::from)
}

fn checkbox_property(prop: Option<&Value>) -> bool {
    typed(prop, "checkbox")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
