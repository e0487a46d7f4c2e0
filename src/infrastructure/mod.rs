pub mod entities;
pub mod xml_query;

pub use entities::{decode_entities, decode_entities_fully};
