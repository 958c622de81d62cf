//! Local adapters for the collaborator ports

mod local_source;
mod memory;

pub use local_source::LocalDirectorySource;
pub use memory::{InMemoryChunkIndex, InMemorySource, NoopChunkIndexer};
