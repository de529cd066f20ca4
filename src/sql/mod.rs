//! Parameterized SQL for the few statements whose shape depends on the request.
//! Identifiers are fixed in code; every value goes through a bind parameter.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
