pub mod clock;
pub mod config;
pub mod error;
pub mod sample;

pub use config::ServiceConfig;
pub use error::FinsecError;
pub use sample::{SampleCatalog, SampleDocument};
