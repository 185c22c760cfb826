pub mod aggregator;
pub mod news;
pub mod result;

pub use aggregator::*;
pub use news::*;
pub use result::*;
