//! Test harness: isolated data directories

mod data_dir;

pub use data_dir::TestDataDir;
