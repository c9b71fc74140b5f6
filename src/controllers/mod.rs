pub mod catalog;
pub mod root;
pub use catalog::{CatalogController, PLAYLIST_TRACK_LIMIT};
pub use root::RootController;
