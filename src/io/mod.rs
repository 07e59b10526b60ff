pub mod instance_reader;
pub use instance_reader::*;
