pub mod dis;
pub mod dump;
