//! Python version compatibility
//!
//! - [`requires_python`]: resolves a package's `requires_python` against the
//!   Python versions the catalog advertises

pub mod requires_python;
