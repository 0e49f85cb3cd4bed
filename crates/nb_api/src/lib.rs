pub mod client;

pub use client::{NewsClient, DEFAULT_BASE_URL};

pub mod prelude {
    pub use crate::client::NewsClient;
    pub use nb_core::{Article, Error, Feed, NewsResponse, Result};
}
