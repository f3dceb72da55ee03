use std::io;

use thiserror::Error;

use crate::decoder::{DecodeError, DecodeErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Category of decompression failure
pub enum ErrorKind {
    ///Byte source failed to produce bytes
    IoRead,
    ///Byte sink failed or performed short write
    IoWrite,
    ///Input ended before end of stream, or is malformed, or needs preset dictionary
    TruncatedOrInvalidStream,
    ///Engine could not allocate memory
    ResourceExhausted,
    ///Engine reported violation of its own state
    EngineFault,
}

///Decompression error
#[derive(Debug, Error)]
pub enum Error {
    ///Byte source failed to produce bytes
    #[error("failed to read compressed input: {0}")]
    IoRead(#[source] io::Error),
    ///Byte sink failed or performed short write
    #[error("failed to write decompressed output: {0}")]
    IoWrite(#[source] io::Error),
    ///Input ended early or is not valid compressed data
    #[error("truncated or invalid stream: {detail}")]
    TruncatedOrInvalidStream {
        ///Description of the failure
        detail: &'static str,
    },
    ///Engine could not allocate memory
    #[error("resource exhausted: {detail}")]
    ResourceExhausted {
        ///Description of the failure
        detail: &'static str,
    },
    ///Engine reported violation of its own state
    #[error("decoding engine fault: {detail}")]
    EngineFault {
        ///Description of the failure
        detail: &'static str,
    },
}

impl Error {
    #[inline]
    ///Returns error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IoRead(_) => ErrorKind::IoRead,
            Self::IoWrite(_) => ErrorKind::IoWrite,
            Self::TruncatedOrInvalidStream { .. } => ErrorKind::TruncatedOrInvalidStream,
            Self::ResourceExhausted { .. } => ErrorKind::ResourceExhausted,
            Self::EngineFault { .. } => ErrorKind::EngineFault,
        }
    }

    ///Creates error from engine failure.
    ///
    ///Missing dictionary is folded into invalid stream as no dictionary is ever supplied.
    pub(crate) fn from_decode(error: DecodeError, description: Option<&'static str>) -> Self {
        match error.kind() {
            DecodeErrorKind::InvalidData => Self::TruncatedOrInvalidStream {
                detail: description.unwrap_or("invalid compressed data"),
            },
            DecodeErrorKind::NeedDictionary => Self::TruncatedOrInvalidStream {
                detail: description.unwrap_or("preset dictionary required"),
            },
            DecodeErrorKind::OutOfMemory => Self::ResourceExhausted {
                detail: description.unwrap_or("out of memory"),
            },
            DecodeErrorKind::StateViolation => Self::EngineFault {
                detail: description.unwrap_or("inconsistent decoder state"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_decode_errors() {
        let error = Error::from_decode(DecodeError::new(DecodeErrorKind::InvalidData, -3), Some("data error"));
        assert_eq!(error.kind(), ErrorKind::TruncatedOrInvalidStream);
        assert_eq!(error.to_string(), "truncated or invalid stream: data error");

        let error = Error::from_decode(DecodeError::new(DecodeErrorKind::NeedDictionary, 2), None);
        assert_eq!(error.kind(), ErrorKind::TruncatedOrInvalidStream);

        let error = Error::from_decode(DecodeError::new(DecodeErrorKind::OutOfMemory, -4), None);
        assert_eq!(error.kind(), ErrorKind::ResourceExhausted);

        let error = Error::from_decode(DecodeError::new(DecodeErrorKind::StateViolation, -2), None);
        assert_eq!(error.kind(), ErrorKind::EngineFault);
    }

    #[test]
    fn should_keep_io_source() {
        use std::error::Error as _;

        let error = Error::IoWrite(io::Error::new(io::ErrorKind::WriteZero, "sink closed"));
        assert_eq!(error.kind(), ErrorKind::IoWrite);
        assert!(error.source().is_some());
    }
}
