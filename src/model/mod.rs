pub mod filter;
pub mod session;
pub mod task;

pub use filter::*;
pub use session::*;
pub use task::*;
