pub mod notify;
pub mod objects;
