use crate::domain::model::{
    ContentBlock, Listing, PageQuery, PageRecord, SiteBundle, SiteContent,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_source_id(&self) -> &str;
    fn cache_ttl(&self) -> Duration;
    fn output_path(&self) -> &str;
}

/// The workspace-document API the site pulls its content from.
///
/// Both list operations follow the same cursor contract: pass `None` for the
/// first page and the previous `next_cursor` afterwards.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn query_pages(
        &self,
        data_source_id: &str,
        query: &PageQuery,
        cursor: Option<&str>,
    ) -> Result<Listing<PageRecord>>;

    async fn list_blocks(
        &self,
        page_id: &str,
        cursor: Option<&str>,
    ) -> Result<Listing<ContentBlock>>;

    /// Fails with `ContentError::NotFound` when the page does not exist.
    async fn retrieve_page(&self, page_id: &str) -> Result<PageRecord>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SiteContent>;
    async fn transform(&self, content: SiteContent) -> Result<SiteBundle>;
    async fn load(&self, bundle: SiteBundle) -> Result<String>;
}
