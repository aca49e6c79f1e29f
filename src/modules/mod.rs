pub mod label;
pub mod player;
pub mod segments;
pub mod storage;
pub mod ui;
