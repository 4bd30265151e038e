pub mod platform;
pub mod refresh;
pub mod sampler;
pub mod snapshot;
pub mod store;
