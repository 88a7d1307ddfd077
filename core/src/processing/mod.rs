pub mod buffer_pool;
pub mod injection;
pub mod reepoch;
pub mod resolution;
pub mod transfer;

pub use buffer_pool::BufferPool;
pub use injection::{InjectionAccumulator, SharedAccumulator};
pub use reepoch::reepoch;
pub use resolution::ModelResolution;
pub use transfer::{flat_transfer, response_to_transfer, transfer_from};
