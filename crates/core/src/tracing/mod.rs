//! Tracing initialisation for native binaries
//!
//! The wasm frontend installs its own console subscriber; everything here is
//! native only.

#[cfg(all(feature = "tracing", not(target_arch = "wasm32")))]
pub mod config;
#[cfg(all(feature = "tracing", not(target_arch = "wasm32")))]
pub mod init;

#[cfg(all(feature = "tracing", not(target_arch = "wasm32")))]
pub use config::InstrumentationConfig;
#[cfg(all(feature = "tracing", not(target_arch = "wasm32")))]
pub use init::init_tracing;
