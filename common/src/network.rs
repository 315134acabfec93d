pub mod interface;
pub mod range;
pub mod sender;
pub mod target;
