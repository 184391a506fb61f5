//! Android boilerplate generation for MVVM projects built on the comvvmhelper base classes.
//!
//! The core is two sets of pure helpers: name conversions ([`names`]) and source-root /
//! package discovery ([`packages`]). [`generate`] ties them to a [`fs::ProjectFs`] to
//! create Activity, Fragment, DialogFragment and RecyclerView adapter sources, their
//! data-binding layouts, optional ViewModels and manifest entries.

#![forbid(unsafe_code)]

pub mod error;
pub mod fs;
pub mod generate;
pub mod manifest;
pub mod names;
pub mod packages;
pub mod templates;

pub use error::GenerateError;
pub use fs::{DiskFs, MemoryFs, ProjectFs};
pub use generate::{generate, GenerateReport, GenerateRequest};
pub use names::{
    class_name_to_layout_name, layout_name_to_binding_class_name, ComponentKind,
};
pub use packages::{resolve_candidate_packages, PackageGroup};
