pub mod execution;
pub mod intent;
pub mod validation;

pub use execution::*;
pub use intent::*;
pub use validation::*;
