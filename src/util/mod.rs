//! Utility modules for cwmonitor.

mod build_info;
mod multi_error;

pub use build_info::BuildInfo;
pub use multi_error::MultiError;
