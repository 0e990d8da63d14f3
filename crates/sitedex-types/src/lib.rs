//! Shared data model and error taxonomy for the site-indexing crawler.

pub mod error;
pub mod record;
pub mod resource;
pub mod site;
pub mod sitemap_index;
pub mod url_info;
pub mod value;

pub use error::CrawlError;
pub use record::IndexRecord;
pub use resource::ResourceInfo;
pub use site::Site;
pub use sitemap_index::SitemapIndex;
pub use url_info::{Sitemap, UrlInfo};
pub use value::{FieldType, Value};
