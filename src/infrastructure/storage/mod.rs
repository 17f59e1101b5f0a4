//! Output directory infrastructure module

mod data_dir;

pub use data_dir::DataDirectory;
