//! Application-level configuration.
//!
//! - [`SelectionParams`]: store timeouts and the default digest size

pub mod selection_params;

pub use selection_params::SelectionParams;
