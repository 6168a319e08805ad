//! Chart aggregate: period ranges, series composition and the declarative options handed to the renderer.

pub mod composer;
pub mod display;
pub mod options;
pub mod range;

pub use composer::*;
pub use display::OhlcDisplay;
pub use options::*;
pub use range::*;
