//! Error types for the metasvg library.
//!
//! This module defines all error types that can occur while decoding a
//! metafile and replaying it into SVG.

use thiserror::Error;

pub type MetafileResult<T> = Result<T, MetafileError>;

/// Errors that can occur during metafile decoding and replay.
#[derive(Error, Debug)]
pub enum MetafileError {
    /// A read would run past the end of the input buffer.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// The input is not a recognized WMF or EMF metafile.
    #[error("format not recognized")]
    FormatNotRecognized,

    /// A metafile header is internally inconsistent.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A record in the stream is structurally invalid.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The record stream ended without an end-of-file record.
    #[error("could not read all records")]
    UnterminatedStream,

    /// Valid input that uses a feature this renderer does not implement.
    ///
    /// Raised instead of silently ignoring the record, since ignoring it
    /// would produce a visually wrong but "successful" result.
    #[error("not implemented: {0}")]
    Unimplemented(String),

    /// Replay was asked to pop the last device-context state.
    #[error("no saved device contexts")]
    NoSavedContexts,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
