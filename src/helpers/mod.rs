//! Helper functions shared by loaders, feeds and the server
//!
//! Date parsing and formatting, sorting and grouping, text statistics, URL
//! building and escaping.

mod date;
mod html;
mod list;
mod text;
mod url;

pub use date::*;
pub use html::*;
pub use list::*;
pub use text::*;
pub use url::*;
