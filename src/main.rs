use anyhow::Context;
use clap::Parser;
use folio_content::core::ConfigProvider;
use folio_content::render::{
    render_not_found_page, render_project_page, render_sitemap, sitemap_entries,
};
use folio_content::utils::{logger, validation::Validate};
use folio_content::{
    BuildEngine, Cli, Command, LocalStorage, NotionClient, ProjectCatalog, SiteBuilder, SiteConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Loading configuration from: {}", cli.config);
    let mut config = SiteConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load config file '{}'", cli.config))?;

    if let Some(output) = &cli.output {
        tracing::info!("Output directory overridden to: {}", output);
        config.output.path = output.clone();
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let client = NotionClient::new(
        config.api_key(),
        config.notion_base_url(),
        config.request_timeout(),
    )?;
    let catalog = Arc::new(
        ProjectCatalog::from_config(Arc::new(client), &config).with_schema(config.schema.clone()),
    );

    match cli.command {
        Command::Build => {
            let storage = LocalStorage::new(config.output_path());
            let builder = SiteBuilder::new(
                storage,
                catalog,
                config.site.clone(),
                config.output_path(),
            );
            let engine = BuildEngine::new(builder);

            match engine.run().await {
                Ok(output_path) => {
                    println!("✅ Site built successfully");
                    println!("📁 Output saved to: {}", output_path);
                }
                Err(e) => {
                    tracing::error!("Site build failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(if e.is_transient() { 2 } else { 1 });
                }
            }
        }
        Command::Projects => {
            let projects = catalog.published_projects().await;
            println!("{}", serde_json::to_string_pretty(&projects)?);
        }
        Command::Project { id } => match catalog.project_detail(&id).await {
            Ok(Some(detail)) => print!("{}", render_project_page(&config.site.name, &detail)),
            Ok(None) => {
                print!("{}", render_not_found_page(&config.site.name));
                eprintln!("❌ Project {} was not found", id);
                std::process::exit(4);
            }
            Err(e) => {
                tracing::error!("Failed to load project {}: {}", id, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(if e.is_transient() { 2 } else { 1 });
            }
        },
        Command::Sitemap => {
            let ids = catalog.published_project_ids().await;
            let today = chrono::Utc::now().date_naive();
            print!(
                "{}",
                render_sitemap(&sitemap_entries(&config.site.base_url, &ids, today))?
            );
        }
    }

    Ok(())
}
