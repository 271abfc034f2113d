//! Input loading: format dispatch and data source metadata.

mod delimited;
mod excel;
mod json;
mod loader;
mod source;

pub use loader::{LoadOptions, load_table};
pub use source::SourceMetadata;
