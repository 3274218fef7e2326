//! Plugin records and their on-disk schema

pub mod types;

pub use types::{
    Category, DistributionType, FrameworkCompatibility, Maintainer, PluginRecord,
    PythonCompatibility,
};
