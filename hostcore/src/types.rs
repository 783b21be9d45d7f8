mod common;
mod contracts;
mod currency;
mod specifier;

pub use common::*;
pub use contracts::*;
pub use currency::*;
pub use specifier::*;
