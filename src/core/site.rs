use crate::config::toml_config::SiteSection;
use crate::core::catalog::ProjectCatalog;
use crate::core::{ContentSource, OutputFile, Pipeline, SiteBundle, SiteContent, Storage};
use crate::render::{render_project_page, render_sitemap, sitemap_entries};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::sync::Arc;

pub const PROJECT_INDEX_PATH: &str = "projects/index.json";
pub const SITEMAP_PATH: &str = "sitemap.xml";

/// Page ids become file names; anything that could escape the output
/// directory is rejected.
fn is_safe_segment(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub struct SiteBuilder<S: Storage, C: ContentSource> {
    storage: S,
    catalog: Arc<ProjectCatalog<C>>,
    site: SiteSection,
    output_path: String,
    build_date: Option<NaiveDate>,
}

impl<S: Storage, C: ContentSource> SiteBuilder<S, C> {
    pub fn new(
        storage: S,
        catalog: Arc<ProjectCatalog<C>>,
        site: SiteSection,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            catalog,
            site,
            output_path: output_path.into(),
            build_date: None,
        }
    }

    /// Pins the sitemap `lastmod` date instead of using today's date.
    pub fn with_build_date(mut self, date: NaiveDate) -> Self {
        self.build_date = Some(date);
        self
    }

    fn build_date(&self) -> NaiveDate {
        self.build_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ContentSource> Pipeline for SiteBuilder<S, C> {
    async fn extract(&self) -> Result<SiteContent> {
        let projects = self.catalog.published_projects().await;
        let mut details = Vec::with_capacity(projects.len());

        for project in &projects {
            match self.catalog.project_detail(&project.id).await {
                Ok(Some(detail)) => details.push(detail),
                Ok(None) => {
                    tracing::warn!("Project {} disappeared before its page could be loaded", project.id)
                }
                Err(e) => tracing::error!("Skipping project {}: {}", project.id, e),
            }
        }

        let sitemap_ids = self.catalog.published_project_ids().await;

        Ok(SiteContent {
            projects,
            details,
            sitemap_ids,
        })
    }

    async fn transform(&self, content: SiteContent) -> Result<SiteBundle> {
        let mut files = Vec::with_capacity(content.details.len() + 2);

        files.push(OutputFile {
            path: PROJECT_INDEX_PATH.to_string(),
            contents: serde_json::to_string_pretty(&content.projects)?,
        });

        for detail in &content.details {
            if !is_safe_segment(&detail.project.id) {
                tracing::warn!("Skipping project with unusable id '{}'", detail.project.id);
                continue;
            }
            files.push(OutputFile {
                path: format!("projects/{}.html", detail.project.id),
                contents: render_project_page(&self.site.name, detail),
            });
        }

        let entries = sitemap_entries(&self.site.base_url, &content.sitemap_ids, self.build_date());
        files.push(OutputFile {
            path: SITEMAP_PATH.to_string(),
            contents: render_sitemap(&entries)?,
        });

        Ok(SiteBundle { files })
    }

    async fn load(&self, bundle: SiteBundle) -> Result<String> {
        tracing::debug!("Writing {} files", bundle.files.len());

        for file in &bundle.files {
            self.storage
                .write_file(&file.path, file.contents.as_bytes())
                .await?;
        }

        Ok(self.output_path.clone())
    }
}
