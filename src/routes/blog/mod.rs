mod admin;
mod comment;
mod get;

pub use admin::*;
pub use comment::*;
pub use get::*;
