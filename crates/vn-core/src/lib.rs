pub mod cast;
pub mod error;
pub mod script;
pub mod types;

pub use cast::*;
pub use error::VnError;
pub use script::*;
pub use types::*;
