//! Embedded asset browser: a flat folder/file config ingested into an
//! in-memory tree, browsed through a navigable hierarchy with search, sort,
//! multi-select, preview, and copy/download actions.

pub mod access;
pub mod breadcrumb;
pub mod config;
pub mod error;
pub mod index;
pub mod ingest;
pub mod interact;
pub mod mime;
pub mod overlay;
pub mod prefs;
pub mod query;
pub mod render;
pub mod state;

pub use access::AccessLevel;
pub use config::LibraryConfig;
pub use error::DeckError;
pub use index::TreeIndex;
pub use ingest::build_index;
pub use interact::Controller;
pub use state::ViewState;
