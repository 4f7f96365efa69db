pub mod blog;
pub mod comment;
pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod post;
pub mod seller;
pub mod user;
