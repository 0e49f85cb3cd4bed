pub mod error;
pub mod models;
pub mod store;

pub use error::Error;
pub use models::{Article, Feed, NewsResponse, Source};
pub use store::BookmarkStore;

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::models::{Article, Feed, NewsResponse, Source};
    pub use crate::store::BookmarkStore;
    pub use crate::{Error, Result};
}
