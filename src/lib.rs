pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Cli, Command};
pub use config::SiteConfig;

pub use adapters::{LocalStorage, NotionClient};
pub use core::{
    catalog::ProjectCatalog, etl::BuildEngine, grouper::group_blocks, site::SiteBuilder,
};
pub use domain::model::{BlockGroup, ContentBlock, Project, ProjectDetail};
pub use utils::error::{ContentError, Result};
