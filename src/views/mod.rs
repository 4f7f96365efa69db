pub mod blog;
pub mod cart;
pub mod course;
pub mod enrollment;
pub mod post;
pub mod reaction;
pub mod seller;
