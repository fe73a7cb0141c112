//! Configuration module

mod site;

pub use site::FeedConfig;
pub use site::Mode;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::StaticPage;
pub use site::ENV_VAR;
