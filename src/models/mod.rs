mod actor;
mod blog;
mod comment;
mod course;
mod enrollment;
mod post;
pub mod reaction;
mod seller;
mod user;

pub use actor::*;
pub use blog::*;
pub use comment::*;
pub use course::*;
pub use enrollment::*;
pub use post::*;
pub use reaction::*;
pub use seller::*;
pub use user::*;
