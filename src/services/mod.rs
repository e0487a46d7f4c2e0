pub mod asset_store;
pub mod json_writer;
pub mod metadata_reader;
pub mod scoring;
pub mod text_normalizer;

pub use asset_store::{AssetStore, PublicBucketStore};
pub use json_writer::JsonWriter;
pub use text_normalizer::{TextKind, TextNormalizer};
