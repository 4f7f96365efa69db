mod comment;
mod get;
mod manage;

pub use comment::*;
pub use get::*;
pub use manage::*;
