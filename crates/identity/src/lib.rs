pub mod alias;
pub mod country;
pub mod flag;
pub mod resolver;

pub use alias::*;
pub use country::*;
pub use flag::*;
pub use resolver::*;
