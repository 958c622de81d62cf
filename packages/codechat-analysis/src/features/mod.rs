//! Feature modules (vertical slices)

pub mod chunking;
pub mod cross_file;
pub mod parsing;
