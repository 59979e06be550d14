//! Support services for image I/O and output format handling

pub mod format;
pub mod io;

pub use format::OutputFormatHandler;
pub use io::ImageIOService;
