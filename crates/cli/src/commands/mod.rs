pub mod issues;
pub mod providers;

pub use issues::*;
pub use providers::*;
