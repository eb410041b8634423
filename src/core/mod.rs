pub mod cache;
pub mod catalog;
pub mod etl;
pub mod grouper;
pub mod paginator;
pub mod projector;
pub mod site;

pub use crate::domain::model::*;
pub use crate::domain::ports::{ConfigProvider, ContentSource, Pipeline, Storage};
pub use crate::utils::error::Result;
