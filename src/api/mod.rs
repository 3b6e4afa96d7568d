pub mod admin;

pub use admin::{IndexInfo, InfoReport, info, log_configure, log_configure_from_env};
