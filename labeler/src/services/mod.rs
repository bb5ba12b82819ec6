pub mod log_buffer;
pub mod status;
