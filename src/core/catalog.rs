use crate::core::cache::ReadThroughCache;
use crate::core::paginator::{list_all_blocks, query_all_pages};
use crate::core::projector::{project_page, ProjectSchema};
use crate::core::{
    ConfigProvider, ContentSource, PageQuery, Project, ProjectDetail, PropertyFilter,
    PropertySort, SortDirection,
};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

const PROJECTS_KEY: &str = "projects";
const PROJECT_IDS_KEY: &str = "project-ids";

/// Published projects of one data source, fetched through a shared cache.
///
/// Share one catalog per process (behind an `Arc`) so every caller sees the
/// same cache entries.
pub struct ProjectCatalog<S: ContentSource> {
    source: Arc<S>,
    data_source_id: String,
    schema: ProjectSchema,
    projects_cache: ReadThroughCache<Vec<Project>>,
    ids_cache: ReadThroughCache<Vec<String>>,
}

impl<S: ContentSource> ProjectCatalog<S> {
    pub fn new(source: Arc<S>, data_source_id: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            source,
            data_source_id: data_source_id.into(),
            schema: ProjectSchema::default(),
            projects_cache: ReadThroughCache::new(cache_ttl),
            ids_cache: ReadThroughCache::new(cache_ttl),
        }
    }

    pub fn from_config<P: ConfigProvider>(source: Arc<S>, config: &P) -> Self {
        Self::new(source, config.data_source_id(), config.cache_ttl())
    }

    pub fn with_schema(mut self, schema: ProjectSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn schema(&self) -> &ProjectSchema {
        &self.schema
    }

    fn published_filter(&self) -> PropertyFilter {
        PropertyFilter::select_equals(&self.schema.status, &self.schema.published_value)
    }

    /// Published projects ordered by the order property. Uncached; errors propagate.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>> {
        let query = PageQuery {
            filter: Some(self.published_filter()),
            sorts: vec![PropertySort {
                property: self.schema.order.clone(),
                direction: SortDirection::Ascending,
            }],
        };

        let pages = query_all_pages(self.source.as_ref(), &self.data_source_id, &query).await?;
        tracing::info!("Fetched {} published project pages", pages.len());

        Ok(pages
            .iter()
            .map(|page| project_page(page, &self.schema))
            .collect())
    }

    pub async fn fetch_project_ids(&self) -> Result<Vec<String>> {
        let query = PageQuery {
            filter: Some(self.published_filter()),
            sorts: Vec::new(),
        };

        let pages = query_all_pages(self.source.as_ref(), &self.data_source_id, &query).await?;
        Ok(pages.into_iter().map(|page| page.id).collect())
    }

    /// `fetch_projects` behind the cache. A failed fetch is not cached and is
    /// returned to the caller.
    pub async fn cached_projects(&self) -> Result<Vec<Project>> {
        self.projects_cache
            .get_or_fetch(PROJECTS_KEY, || async move { self.fetch_projects().await })
            .await
    }

    pub async fn cached_project_ids(&self) -> Result<Vec<String>> {
        self.ids_cache
            .get_or_fetch(PROJECT_IDS_KEY, || async move { self.fetch_project_ids().await })
            .await
    }

    /// Never fails: any error is logged and an empty list returned so the page
    /// still renders.
    pub async fn published_projects(&self) -> Vec<Project> {
        match self.cached_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                tracing::error!("Failed to load projects from Notion: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn published_project_ids(&self) -> Vec<String> {
        match self.cached_project_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!("Failed to load project ids from Notion: {}", e);
                Vec::new()
            }
        }
    }

    /// One project with its body blocks.
    ///
    /// `Ok(None)` means the page does not exist or is not shared with the
    /// integration; transport and protocol failures stay errors.
    pub async fn project_detail(&self, page_id: &str) -> Result<Option<ProjectDetail>> {
        let page = match self.source.retrieve_page(page_id).await {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                tracing::debug!("{}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let project = project_page(&page, &self.schema);
        // The page can be deleted between the two calls.
        let blocks = match list_all_blocks(self.source.as_ref(), page_id).await {
            Ok(blocks) => blocks,
            Err(e) if e.is_not_found() => {
                tracing::debug!("Blocks of {} vanished: {}", page_id, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        tracing::debug!("Loaded project '{}' with {} blocks", project.title, blocks.len());

        Ok(Some(ProjectDetail { project, blocks }))
    }
}
