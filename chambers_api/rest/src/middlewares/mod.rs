pub mod panic_handler;
pub mod request_id;
pub mod source_id;
pub mod trace;
