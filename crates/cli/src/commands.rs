pub mod build;
pub mod mdbook;
pub mod render;
pub mod show;
