//! Art Institute of Chicago artworks client library
//!
//! An async client for the public artworks collection API, together with the
//! paging and cross-page selection state needed to browse it as a table.

pub mod api;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod navigation;
pub mod retry;
pub mod selection;
pub mod session;
pub mod view;

mod client;

pub use client::*;
