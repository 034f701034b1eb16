mod field;
pub mod timestamp;
mod user;

pub use field::*;
pub use user::*;
