pub mod error;
pub mod loader;
pub mod models;

// 重新导出常用类型，方便直接使用
pub use error::LoadError;
pub use loader::{CatalogLoader, CatalogSource, FetchResponse, DEFAULT_CANDIDATE_PATHS};
pub use models::{parse_date, Catalog, Post};
