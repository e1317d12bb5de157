//! Removal of fixed-frequency instrument spurs from FIDs

pub mod list;
pub mod extractor;

pub use list::SpurList;
pub use extractor::{components, remove_spur, SpurComponents, SpurExtractor};
