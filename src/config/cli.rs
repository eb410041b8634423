use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Builds portfolio pages from a Notion projects data source")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "folio.toml")]
    pub config: String,

    /// Override the output directory from config
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render every published project, the project index and the sitemap
    Build,
    /// Print the published projects as JSON
    Projects,
    /// Print one project's detail page as HTML
    Project {
        /// Notion page id of the project
        id: String,
    },
    /// Print the sitemap XML
    Sitemap,
}
