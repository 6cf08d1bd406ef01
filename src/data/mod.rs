//! Retrieval and caching of the published input files.

mod fetch;

pub use fetch::{cached_path, fetch_quantity_file, FetchError};
