pub mod log;
pub mod clock;
pub mod file_tools;
pub mod image_tools;
