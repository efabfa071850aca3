pub mod commands;
pub mod form;
pub mod render;
