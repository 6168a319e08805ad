//! Market data aggregate: provider payloads, derived series and the indicators computed over them.

pub mod entities;
pub mod indicator_engine;
pub mod normalizer;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use indicator_engine::*;
pub use normalizer::normalize;
pub use repositories::{QuoteRequest, QuoteSource};
pub use value_objects::*;
