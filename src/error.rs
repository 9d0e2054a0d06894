//! Error types shared across the crate

use std::fmt;

/// Everything that can go wrong while setting up or running an instrument session
#[derive(Debug)]
pub enum NoteFrameError {
    /// Configuration file is missing or malformed
    Config(String),
    /// IO error
    Io(std::io::Error),
    /// JSON (de)serialization error
    Json(serde_json::Error),
    /// Image decoding error
    Image(image::ImageError),
    /// MIDI backend error
    Midi(String),
    /// The MIDI backend reports no input ports at all
    NoMidiPorts,
    /// The requested port name matched none of the available ports
    PortNotFound {
        requested: String,
        available: Vec<String>,
    },
    /// A sample buffer does not match the frame geometry it claims
    FrameGeometry { expected: usize, actual: usize },
}

impl fmt::Display for NoteFrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteFrameError::Config(msg) => write!(f, "Configuration error: {}", msg),
            NoteFrameError::Io(e) => write!(f, "IO error: {}", e),
            NoteFrameError::Json(e) => write!(f, "JSON error: {}", e),
            NoteFrameError::Image(e) => write!(f, "Image error: {}", e),
            NoteFrameError::Midi(msg) => write!(f, "MIDI error: {}", msg),
            NoteFrameError::NoMidiPorts => write!(f, "No MIDI input ports found."),
            NoteFrameError::PortNotFound { requested, .. } => {
                write!(f, "Port \"{}\" not found among available ports", requested)
            }
            NoteFrameError::FrameGeometry { expected, actual } => write!(
                f,
                "Frame geometry mismatch: expected {} samples, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for NoteFrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NoteFrameError::Io(e) => Some(e),
            NoteFrameError::Json(e) => Some(e),
            NoteFrameError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NoteFrameError {
    fn from(e: std::io::Error) -> Self {
        NoteFrameError::Io(e)
    }
}

impl From<serde_json::Error> for NoteFrameError {
    fn from(e: serde_json::Error) -> Self {
        NoteFrameError::Json(e)
    }
}

impl From<image::ImageError> for NoteFrameError {
    fn from(e: image::ImageError) -> Self {
        NoteFrameError::Image(e)
    }
}

/// Result type for noteframe operations
pub type Result<T> = std::result::Result<T, NoteFrameError>;
