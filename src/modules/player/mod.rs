pub mod media_probe;
pub mod simulated;
