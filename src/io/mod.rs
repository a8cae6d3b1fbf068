//! Output helpers.
//!
//! - artifact naming with an injectable clock (`naming`)
//! - report/chart/JSON writers (`export`)

pub mod export;
pub mod naming;

pub use export::*;
pub use naming::*;
