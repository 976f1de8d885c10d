pub mod canvas;
pub mod html;

pub use canvas::*;
pub use html::{RenderError, SaveError};
