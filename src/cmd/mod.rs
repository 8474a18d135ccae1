pub mod board;
pub mod view;
