pub mod file_store;
pub mod http;
pub mod memory_store;
