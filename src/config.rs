//! Configuration schema and loader.
//!
//! Settings come from struct defaults, an optional TOML file and `PLAYTR__`
//! environment variables, in increasing order of precedence.

mod load;
mod schema;

pub use load::*;
pub use schema::*;
