//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, FfmpegConfig, DEFAULT_BITRATE, DEFAULT_DIRECTORY_NAME, DEFAULT_INPUT_DEVICE,
    DEFAULT_INPUT_FORMAT,
};
