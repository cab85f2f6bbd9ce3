pub mod detector;
pub mod errors;
pub mod models;
pub mod quality_lister;
pub mod stream_selector;
