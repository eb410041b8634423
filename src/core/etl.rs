use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs a pipeline's extract, transform and load stages in order.
pub struct BuildEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BuildEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting site build...");

        tracing::info!("Extracting content...");
        let content = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} projects ({} with detail pages)",
            content.projects.len(),
            content.details.len()
        );

        tracing::info!("Rendering pages...");
        let bundle = self.pipeline.transform(content).await?;
        tracing::info!("Rendered {} files", bundle.files.len());

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OutputFile, SiteBundle, SiteContent};
    use crate::utils::error::ContentError;
    use std::sync::Mutex;

    struct RecordingPipeline {
        stages: Mutex<Vec<&'static str>>,
        fail_transform: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<SiteContent> {
            self.stages.lock().unwrap().push("extract");
            Ok(SiteContent::default())
        }

        async fn transform(&self, _content: SiteContent) -> Result<SiteBundle> {
            self.stages.lock().unwrap().push("transform");
            if self.fail_transform {
                return Err(ContentError::Config {
                    message: "broken template".to_string(),
                });
            }
            Ok(SiteBundle {
                files: vec![OutputFile {
                    path: "index.html".to_string(),
                    contents: String::new(),
                }],
            })
        }

        async fn load(&self, _bundle: SiteBundle) -> Result<String> {
            self.stages.lock().unwrap().push("load");
            Ok("out".to_string())
        }
    }

    #[tokio::test]
    async fn test_runs_stages_in_order() {
        let engine = BuildEngine::new(RecordingPipeline {
            stages: Mutex::new(Vec::new()),
            fail_transform: false,
        });

        assert_eq!(engine.run().await.unwrap(), "out");
        assert_eq!(
            *engine.pipeline.stages.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }

    #[tokio::test]
    async fn test_stops_at_first_failing_stage() {
        let engine = BuildEngine::new(RecordingPipeline {
            stages: Mutex::new(Vec::new()),
            fail_transform: true,
        });

        assert!(engine.run().await.is_err());
        assert_eq!(*engine.pipeline.stages.lock().unwrap(), vec!["extract", "transform"]);
    }
}
