pub mod engine;
pub mod error;
pub mod replay;
pub mod settings;
pub mod stats;
