pub mod feature;
pub mod key;
pub mod region;
pub mod tier;

pub use feature::*;
pub use key::*;
pub use region::*;
pub use tier::*;
