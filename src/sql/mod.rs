//! Parameterized SQL for the players table: identifiers are constants, values are parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
