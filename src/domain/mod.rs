pub mod image_file;
pub mod input_source;
pub mod metadata_fields;
pub mod metadata_store;
pub mod pair_merger;
pub mod pairing;
pub mod perceptual_hash;

#[cfg(test)]
pub(crate) mod memory_store;

// --- public re-exports ---
pub use image_file::ImageFile;
pub use metadata_fields::{MetadataField, MetadataFieldSet};
pub use metadata_store::{MetadataError, MetadataStore};
pub use pair_merger::{MergeReport, PairMerger};
pub use pairing::{FileNameRule, PairPredicate, PerceptualHashRule};
