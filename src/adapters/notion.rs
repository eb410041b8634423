use crate::domain::model::{ContentBlock, Entry, Listing, PageQuery, PageRecord};
use crate::domain::ports::ContentSource;
use crate::utils::error::{ContentError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const NOTION_VERSION: &str = "2025-09-03";
const PAGE_SIZE: u32 = 100;
const SERVICE: &str = "Notion";

#[derive(Serialize)]
struct QueryBody<'a> {
    #[serde(flatten)]
    query: &'a PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
    page_size: u32,
}

/// HTTP client for the Notion data-source, page and block endpoints.
///
/// Documentation: https://developers.notion.com/reference/intro
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(api_key: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Maps non-success statuses onto the error taxonomy and decodes the body.
    async fn decode<T: DeserializeOwned>(response: Response, resource: &str) -> Result<T> {
        let status = response.status();
        tracing::debug!("Notion response status for {}: {}", resource, status);

        match status {
            s if s.is_success() => {
                let bytes = response.bytes().await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            StatusCode::NOT_FOUND => Err(ContentError::NotFound {
                resource: resource.to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(ContentError::Authentication {
                message: "Invalid Notion API key".to_string(),
            }),
            StatusCode::TOO_MANY_REQUESTS => Err(ContentError::RateLimited {
                service: SERVICE.to_string(),
            }),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(ContentError::UpstreamStatus {
                    service: SERVICE.to_string(),
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl ContentSource for NotionClient {
    async fn query_pages(
        &self,
        data_source_id: &str,
        query: &PageQuery,
        cursor: Option<&str>,
    ) -> Result<Listing<PageRecord>> {
        let url = format!("{}/v1/data_sources/{}/query", self.base_url, data_source_id);
        let body = QueryBody {
            query,
            start_cursor: cursor,
            page_size: PAGE_SIZE,
        };

        tracing::debug!("Querying data source {} (cursor: {:?})", data_source_id, cursor);
        let response = self
            .authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await?;

        Self::decode(response, &format!("Data source {}", data_source_id)).await
    }

    async fn list_blocks(
        &self,
        page_id: &str,
        cursor: Option<&str>,
    ) -> Result<Listing<ContentBlock>> {
        let url = format!("{}/v1/blocks/{}/children", self.base_url, page_id);
        let page_size = PAGE_SIZE.to_string();
        let mut params = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = cursor {
            params.push(("start_cursor", cursor));
        }

        tracing::debug!("Listing blocks of {} (cursor: {:?})", page_id, cursor);
        let response = self
            .authorized(self.client.get(&url))
            .query(&params)
            .send()
            .await?;

        Self::decode(response, &format!("Block {}", page_id)).await
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<PageRecord> {
        let url = format!("{}/v1/pages/{}", self.base_url, page_id);
        let resource = format!("Page {}", page_id);

        let response = self.authorized(self.client.get(&url)).send().await?;

        // A page the integration cannot read comes back without properties.
        match Self::decode::<Entry<PageRecord>>(response, &resource).await? {
            Entry::Full(page) => Ok(page),
            Entry::Partial(_) => Err(ContentError::NotFound { resource }),
        }
    }
}
