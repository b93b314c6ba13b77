//! Cache Module
//!
//! The namespace-aware facade applications talk to, and the codecs that
//! implement object mode.

mod codec;
mod facade;


// Re-export public types
pub use codec::{Codec, Json, Passthrough};
pub use facade::{Cache, Options, SetParams};

/// Facade running in object mode over JSON values of type `T`.
pub type ObjectCache<T> = Cache<Json<T>>;
