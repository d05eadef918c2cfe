//! Data model types

mod artwork;
mod page;

pub use artwork::*;
pub use page::*;
