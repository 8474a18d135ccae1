pub mod board;
pub mod collation;
pub mod priority;
pub mod ticket;
pub mod view;
