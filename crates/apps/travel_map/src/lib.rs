pub mod compose;
pub mod config;
pub mod fetch;

pub use compose::*;
pub use config::*;
pub use fetch::*;
