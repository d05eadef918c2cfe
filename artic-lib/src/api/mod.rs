//! Web API operations

mod artworks;
mod request;
