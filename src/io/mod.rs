pub mod config_io;
pub mod session_io;
