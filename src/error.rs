//! Error types for mic-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a chart.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// A record lacks a value for a declared antibiotic.
    #[error("record for {species:?} has no MIC value for {antibiotic:?}")]
    MissingMic {
        /// Species whose record is incomplete.
        species: String,
        /// Antibiotic the value is missing for.
        antibiotic: String,
    },

    /// A MIC value is zero or negative and cannot go on a log scale.
    #[error("MIC for {species:?}/{antibiotic:?} is {value}, log scale requires > 0")]
    NonPositiveMic {
        /// Species of the offending record.
        species: String,
        /// Antibiotic the value belongs to.
        antibiotic: String,
        /// The offending value.
        value: f64,
    },

    /// An antibiotic name not present in the authored antibiotic list.
    #[error("unknown antibiotic: {name:?}")]
    UnknownAntibiotic {
        /// The unrecognized name.
        name: String,
    },

    /// An encoding channel references a column absent from the layer's table.
    #[error("channel {channel:?} references missing column {column:?}")]
    UnknownColumn {
        /// The visual channel with the bad binding.
        channel: &'static str,
        /// The column that does not exist.
        column: String,
    },

    /// A positional axis is never bound by any layer.
    #[error("no layer binds the {axis} axis")]
    UnboundAxis {
        /// Axis name ("x" or "y").
        axis: &'static str,
    },

    /// Scale domain error (e.g., log of non-positive value, mixed scale kinds).
    #[error("scale domain error: {0}")]
    ScaleDomain(String),

    /// Invalid chart or raster dimensions.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Chart composition error.
    #[error("composition error: {0}")]
    Composition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mic_display() {
        let err = Error::MissingMic {
            species: "Escherichia coli".to_string(),
            antibiotic: "Neomycin".to_string(),
        };
        assert!(err.to_string().contains("Escherichia coli"));
        assert!(err.to_string().contains("Neomycin"));
    }

    #[test]
    fn test_non_positive_mic_display() {
        let err = Error::NonPositiveMic {
            species: "Bacillus anthracis".to_string(),
            antibiotic: "Penicillin".to_string(),
            value: 0.0,
        };
        assert!(err.to_string().contains("log scale"));
    }

    #[test]
    fn test_unknown_column_display() {
        let err = Error::UnknownColumn { channel: "color", column: "gram".to_string() };
        assert!(err.to_string().contains("color"));
        assert!(err.to_string().contains("gram"));
    }
}
