//! File-backed storage: plugin records, icons and README artifacts

pub mod error;
pub mod icons;
pub mod readmes;
pub mod records;

pub use error::StoreError;
pub use icons::IconSet;
pub use readmes::ReadmeStore;
pub use records::{FsRecordStore, RecordStore, is_valid_key};
