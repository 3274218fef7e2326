//! Plugin registry sync: enriches plugin records from PyPI, pypistats and
//! GitHub, and builds the catalog distribution file.

pub mod config;
pub mod dist;
pub mod logging;
pub mod plugin;
pub mod source;
pub mod store;
pub mod sync;
pub mod version;
