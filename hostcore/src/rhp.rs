mod contracts;
mod sectors;
mod settings;

pub use contracts::*;
pub use sectors::*;
pub use settings::*;
