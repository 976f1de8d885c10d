pub mod latlon;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use latlon::*;
