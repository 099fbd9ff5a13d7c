pub mod color;
pub mod compose;
pub mod cursor;
pub mod layout;
