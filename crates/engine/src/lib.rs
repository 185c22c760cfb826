pub mod cache;
pub mod clock;
pub mod coordinator;
pub mod fetch;
pub mod store;

pub use cache::*;
pub use clock::*;
pub use coordinator::*;
pub use fetch::*;
pub use store::*;
