//! Mock data sources for testing.
//!
//! This module provides `MockFs`, `MockRuntime` and pre-built scenarios for
//! testing metrics without a Linux `/proc` or a running Docker daemon.

mod filesystem;
mod runtime;
mod scenarios;

pub use filesystem::MockFs;
pub use runtime::MockRuntime;
