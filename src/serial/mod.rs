pub mod line;
pub mod reader;
pub mod transport;

pub use reader::spawn_reader;
