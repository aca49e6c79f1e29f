pub mod engine;
pub mod progress_bar;
pub mod time_format;
