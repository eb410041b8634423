use serde::{de, Deserialize, Deserializer, Serialize};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder-project.jpg";

/// A published portfolio entry, projected from one upstream page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
    pub blocks: Vec<ContentBlock>,
}

/// Raw page as returned by the content API. The property bag stays untyped
/// until projection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageRecord {
    pub id: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

/// One annotated span of a rich-text array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub text: Option<TextContent>,
}

impl RichText {
    pub fn plain(content: &str) -> Self {
        Self {
            plain_text: content.to_string(),
            annotations: Annotations::default(),
            text: Some(TextContent {
                content: content.to_string(),
                link: None,
            }),
        }
    }

    /// Link target of a `text` span; mentions and equations never link.
    pub fn link_url(&self) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|t| t.link.as_ref())
            .map(|l| l.url.as_str())
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Hosted upload or external link, as used by image blocks and `files` properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    File { file: FileUrl },
    External { external: FileUrl },
    /// Sources without a public URL, such as `file_upload`.
    #[serde(other)]
    Other,
}

impl FileSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            FileSource::File { file } => Some(&file.url),
            FileSource::External { external } => Some(&external.url),
            FileSource::Other => None,
        }
    }
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageBody {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji {
        emoji: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalloutBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookmarkBody {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToDoBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph {
        paragraph: TextBody,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: TextBody,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: TextBody,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: TextBody,
    },
    BulletedListItem {
        bulleted_list_item: TextBody,
    },
    NumberedListItem {
        numbered_list_item: TextBody,
    },
    Code {
        code: CodeBody,
    },
    Image {
        image: ImageBody,
    },
    Quote {
        quote: TextBody,
    },
    Callout {
        callout: CalloutBody,
    },
    Divider,
    Bookmark {
        bookmark: BookmarkBody,
    },
    ToDo {
        to_do: ToDoBody,
    },
    Toggle {
        toggle: TextBody,
    },
    #[serde(other)]
    Unsupported,
}

/// One unit of page content in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub id: String,
    pub kind: BlockKind,
}

/// Only a missing `id` or `type` rejects a block. A typed block whose body
/// does not match the known shape is kept as `BlockKind::Unsupported`.
impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        let id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| <D::Error as de::Error>::missing_field("id"))?
            .to_string();
        let block_type = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| <D::Error as de::Error>::missing_field("type"))?;

        let kind = BlockKind::deserialize(&value).unwrap_or_else(|e| {
            tracing::warn!("Block {} ({}) has an unexpected shape: {}", id, block_type, e);
            BlockKind::Unsupported
        });

        Ok(Self { id, kind })
    }
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        match self.kind {
            BlockKind::BulletedListItem { .. } => Some(ListKind::Bulleted),
            BlockKind::NumberedListItem { .. } => Some(ListKind::Numbered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockGroup {
    Single(ContentBlock),
    Run(ListKind, Vec<ContentBlock>),
}

impl BlockGroup {
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            BlockGroup::Single(block) => std::slice::from_ref(block),
            BlockGroup::Run(_, blocks) => blocks,
        }
    }
}


/// One item of a list response: either a full record or a partial stub the
/// API returns when the integration lacks access.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Entry<T> {
    Full(T),
    Partial(serde_json::Value),
}

impl<T> Entry<T> {
    pub fn into_full(self) -> Option<T> {
        match self {
            Entry::Full(item) => Some(item),
            Entry::Partial(_) => None,
        }
    }
}

/// A bounded page of a cursor-paginated list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub results: Vec<Entry<T>>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectEquals {
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    pub select: SelectEquals,
}

impl PropertyFilter {
    pub fn select_equals(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            select: SelectEquals {
                equals: value.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<PropertySort>,
}


#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub projects: Vec<Project>,
    pub details: Vec<ProjectDetail>,
    pub sitemap_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone, Default)]
pub struct SiteBundle {
    pub files: Vec<OutputFile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_deserialize_known_and_unknown_types() {
        let paragraph: ContentBlock = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {"rich_text": [{"type": "text", "plain_text": "Hi", "text": {"content": "Hi", "link": null}}], "color": "default"}
        }))
        .unwrap();
        assert_eq!(paragraph.id, "b1");
        match &paragraph.kind {
            BlockKind::Paragraph { paragraph } => {
                assert_eq!(paragraph.rich_text[0].plain_text, "Hi")
            }
            other => panic!("unexpected kind {:?}", other),
        }

        let table: ContentBlock = serde_json::from_value(json!({
            "id": "b2",
            "type": "table",
            "table": {"table_width": 2}
        }))
        .unwrap();
        assert_eq!(table.kind, BlockKind::Unsupported);

        let divider: ContentBlock =
            serde_json::from_value(json!({"id": "b3", "type": "divider", "divider": {}})).unwrap();
        assert_eq!(divider.kind, BlockKind::Divider);
    }

    #[test]
    fn test_image_block_sources() {
        let hosted: ContentBlock = serde_json::from_value(json!({
            "id": "img",
            "type": "image",
            "image": {"type": "file", "file": {"url": "https://s3/a.png", "expiry_time": "2026-01-01"}, "caption": []}
        }))
        .unwrap();
        match hosted.kind {
            BlockKind::Image { image } => assert_eq!(image.source.url(), Some("https://s3/a.png")),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_typed_blocks_survive_listing_with_unusual_bodies() {
        let listing: Listing<ContentBlock> = serde_json::from_value(json!({
            "results": [
                {"id": "a", "type": "paragraph", "paragraph": {"rich_text": []}},
                {"id": "img", "type": "image", "image": {"type": "file_upload", "file_upload": {"id": "u1"}, "caption": []}},
                {"id": "bm", "type": "bookmark", "bookmark": {"url": null, "caption": []}},
                {"id": "odd", "type": "quote", "quote": {"rich_text": "not an array"}},
                {"object": "block", "id": "stub"},
                {"id": "z", "type": "divider", "divider": {}}
            ],
            "has_more": false,
            "next_cursor": null
        }))
        .unwrap();

        let blocks: Vec<ContentBlock> =
            listing.results.into_iter().filter_map(Entry::into_full).collect();
        let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "img", "bm", "odd", "z"]);

        match &blocks[1].kind {
            BlockKind::Image { image } => assert_eq!(image.source, FileSource::Other),
            other => panic!("unexpected kind {:?}", other),
        }
        match &blocks[2].kind {
            BlockKind::Bookmark { bookmark } => assert_eq!(bookmark.url, None),
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(blocks[3].kind, BlockKind::Unsupported);
    }

    #[test]
    fn test_listing_separates_partial_entries() {
        let listing: Listing<PageRecord> = serde_json::from_value(json!({
            "object": "list",
            "results": [
                {"object": "page", "id": "p1", "properties": {}},
                {"object": "page", "id": "p2"}
            ],
            "has_more": false,
            "next_cursor": null
        }))
        .unwrap();
        let full: Vec<PageRecord> = listing.results.into_iter().filter_map(Entry::into_full).collect();
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].id, "p1");
    }

    #[test]
    fn test_page_query_serializes_notion_shape() {
        let query = PageQuery {
            filter: Some(PropertyFilter::select_equals("Status", "Published")),
            sorts: vec![PropertySort {
                property: "Order".to_string(),
                direction: SortDirection::Ascending,
            }],
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": {"property": "Status", "select": {"equals": "Published"}},
                "sorts": [{"property": "Order", "direction": "ascending"}]
            })
        );
        assert_eq!(serde_json::to_value(PageQuery::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_project_json_uses_camel_case() {
        let project = Project {
            id: "p1".to_string(),
            title: "Folio".to_string(),
            description: String::new(),
            image: PLACEHOLDER_IMAGE.to_string(),
            tags: vec![],
            demo_url: Some("https://demo".to_string()),
            github_url: None,
            featured: true,
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["demoUrl"], "https://demo");
        assert!(value.get("githubUrl").is_none());
    }
}
