//! Dataset loading and the in-memory record store.

pub mod loaders;
pub mod store;

pub use loaders::{DatasetLoadResult, DatasetSourceType, MovieLoader};
pub use store::RecordStore;
