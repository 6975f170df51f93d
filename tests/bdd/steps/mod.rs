pub mod common;
pub mod elements;
pub mod forms;
