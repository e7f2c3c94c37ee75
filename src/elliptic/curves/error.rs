use thiserror::Error;

/// Constructing Point from coordinates or bytes failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointError {
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("coordinate is not a reduced field element")]
    CoordinateOutOfRange,
    #[error("invalid point encoding (tag {tag:#04x}, {len} bytes)")]
    InvalidEncoding { tag: u8, len: usize },
}

/// Hash-to-curve input rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashToCurveError {
    #[error("domain separation tag must be 1..=255 bytes, got {0}")]
    InvalidDst(usize),
    #[error("requested {0} uniform bytes, more than expand_message_xmd can produce")]
    OutputTooLong(usize),
}
