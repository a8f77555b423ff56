pub mod json_dir;
pub mod memory;
