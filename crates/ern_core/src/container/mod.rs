//! Runtime container embedding.
//!
//! This module wires a host application, a container config and a resolved
//! plugin list into one lazily built runtime manager. The JS runtime itself
//! stays behind the `runtime` traits.

pub mod config;
pub mod headless;
pub mod host;
pub mod plugin;
pub mod runtime;
