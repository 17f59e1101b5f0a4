//! Voice Recorder - record the microphone to MP3 and play it back
//!
//! This crate provides a recording session controller that acquires capture
//! permission, prepares the output directory, drives an external capture
//! facility and plays back the last recording.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Session state, recording locations, status, config and errors
//! - **Application**: The session controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, rodio, cpal, filesystem, etc.)
//! - **CLI**: Argument parsing, the interactive screen and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
