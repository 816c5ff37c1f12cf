pub mod data_log;

pub use data_log::DataLogWriter;
