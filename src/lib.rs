pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::SamplerConfig;
pub use error::SampleError;
