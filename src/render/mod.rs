pub mod blocks;
pub mod page;
pub mod rich_text;
pub mod sitemap;

pub use blocks::{render_block, render_groups};
pub use page::{render_not_found_page, render_project_page};
pub use rich_text::{plain_text, render_rich_text};
pub use sitemap::{render_sitemap, sitemap_entries, SitemapEntry};
