//! SVD reader errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading an SVD document.
#[derive(Debug, Error)]
pub enum SvdError {
    /// I/O error reading the SVD file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// A required child element is absent.
    #[error("missing <{element}> in <{parent}>")]
    MissingElement { parent: String, element: String },

    /// A numeric element holds text that is not a number.
    #[error("invalid number '{text}' in <{element}>")]
    InvalidNumber { element: String, text: String },

    /// A field declares no usable bit position.
    #[error("field '{field}' declares neither bitOffset/bitWidth, lsb/msb, nor bitRange")]
    MissingBitRange { field: String },

    /// A field's bit range text cannot be interpreted.
    #[error("invalid bitRange '{text}' for field '{field}'")]
    InvalidBitRange { field: String, text: String },

    /// A peripheral derives from a peripheral not defined before it.
    #[error("peripheral '{name}' is derived from unknown peripheral '{base}'")]
    UnknownBase { name: String, base: String },
}
