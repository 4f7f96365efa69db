mod extractor;
mod manager;
mod manager_middleware;
mod method;

pub use extractor::*;
pub use manager::*;
pub use manager_middleware::*;
