//! Data models for the FreeToGame explorer.
//!
//! Game records keep the catalog's wire format; explorer views use camelCase.

mod explorer;
mod filters;
mod game;

pub use explorer::*;
pub use filters::*;
pub use game::*;
