//! `MetadataStore` の実装（アダプター）。

pub mod dry_run;
pub mod exiftool;

pub use dry_run::DryRunStore;
pub use exiftool::ExifToolStore;
