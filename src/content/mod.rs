//! Content module - posts, reading list, TIL entries and resources

pub mod frontmatter;
pub mod fs;
pub mod loader;
mod markdown;
mod post;
mod reading;
pub mod resource;
mod store;
mod til;

pub use fs::{ContentFs, DiskFs};
pub use loader::{ContentKind, ContentLoader, DateWarnings, Validation};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostMetadata};
pub use reading::{sort_by_status, ReadingCategory, ReadingMetadata, ReadingStatus};
pub use resource::{Resource, ResourceCategory};
pub use store::ContentStore;
pub use til::TilEntry;
