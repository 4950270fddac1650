//! # Adapters Layer
//!
//! Implementations of the [`Provider`](crate::ports::Provider) port.

pub mod cache;
pub mod codec;
pub mod files;
pub mod memory;
pub mod rpc;

pub use cache::CacheProvider;
pub use files::FileProvider;
pub use memory::MemoryProvider;
pub use rpc::RpcProvider;
