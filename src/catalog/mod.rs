mod error;
mod parser;
mod source;

pub use error::CatalogError;
pub use parser::{parse_element_sets, ElementSet};
pub use source::{CatalogSource, HttpCatalog};
