//! Recording domain module

mod location;

pub use location::{RecordingLocation, RECORDING_FILE_EXTENSION, RECORDING_FILE_PREFIX};
