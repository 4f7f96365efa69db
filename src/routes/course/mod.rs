mod comment;
mod get;

pub use comment::*;
pub use get::*;
