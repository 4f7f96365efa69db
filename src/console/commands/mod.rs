mod callable;
mod migrate;
mod token;

pub use callable::*;
pub use migrate::*;
pub use token::*;
