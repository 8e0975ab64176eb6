pub mod advisory;
pub mod climate;
pub mod risk;
pub mod viability;

pub use advisory::*;
pub use climate::*;
pub use risk::*;
pub use viability::*;
