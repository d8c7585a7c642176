//! A small, thread-safe virtual filesystem with disk fallback, plus
//! the path normalization rules the resolver and the LSP both need.

mod cache;
mod path_resolve;

pub use cache::{CachedFileSystem, FileSystem, ReadError};
pub use path_resolve::{clean, resolve};
