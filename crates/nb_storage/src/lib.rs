pub mod backends;
pub mod document;

pub use backends::*;

pub mod prelude {
    pub use super::backends::*;
    pub use nb_core::{Article, BookmarkStore, Error, Result};
}
