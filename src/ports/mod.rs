//! Port traits for the crate's external collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
