pub mod job;
pub mod request;
pub mod result;
pub mod verdict;

pub use job::*;
pub use request::*;
pub use result::*;
