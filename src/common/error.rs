use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input
    InvalidInputType,
    UnsupportedContent,
    ContentTooLarge,

    // Configuration
    InvalidVersion,
    InvalidECLevel,
    InvalidMaskingPattern,
    InvalidColor,

    // Persistence & export
    MalformedPersistedState,
    ImageEncoding,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::InvalidInputType => "Input is not valid text",
            Self::UnsupportedContent => "No encoding mode supports the content",
            Self::ContentTooLarge => "Content does not fit in any QR version",

            Self::InvalidVersion => "Invalid version",
            Self::InvalidECLevel => "Invalid error correction level",
            Self::InvalidMaskingPattern => "Invalid masking pattern",
            Self::InvalidColor => "Invalid color",

            Self::MalformedPersistedState => "Malformed persisted QR state",
            Self::ImageEncoding => "Failed to encode image",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
