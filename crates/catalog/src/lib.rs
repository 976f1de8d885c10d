//! Static inputs for the travel map: the capital table and the rule that
//! maps each country code to a boundary source.

pub mod boundary;
pub mod capitals;

pub use boundary::*;
pub use capitals::*;
