pub mod board;
pub mod options;
