mod cart;
mod enrollment;
mod profile;
mod wishlist;

pub use cart::*;
pub use enrollment::*;
pub use profile::*;
pub use wishlist::*;
