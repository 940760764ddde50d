//! Core value types.

mod date;
mod frequency;
mod tenor;

pub use date::{Date, WorkDate};
pub use frequency::Frequency;
pub use tenor::{Tenor, TenorUnit};
