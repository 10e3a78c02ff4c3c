use core::fmt::{self, Display, Formatter};
use core2::error::Error;

/// Decoding failures for the algebraic types
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PairingError {
    InvalidScalarBytes,
    InvalidG1Bytes,
    InvalidG2Bytes,
    InvalidGtBytes,
}

impl Display for PairingError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PairingError::InvalidScalarBytes => write!(f, "Invalid scalar bytes"),
            PairingError::InvalidG1Bytes => write!(f, "Invalid G1 bytes"),
            PairingError::InvalidG2Bytes => write!(f, "Invalid G2 bytes"),
            PairingError::InvalidGtBytes => write!(f, "Invalid Gt bytes"),
        }
    }
}

impl Error for PairingError {}

/// Protocol level failures reported by the M-Pin and WCC operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MpinError {
    /// A required input was missing, had the wrong length or did not reduce
    BadParams,
    /// An octet did not decode to a point of the expected group
    InvalidPoint,
    /// The authentication check failed
    BadPin,
}

impl MpinError {
    /// The numeric code used on the wire by existing M-Pin deployments
    pub const fn code(&self) -> i32 {
        match self {
            MpinError::BadParams => -11,
            MpinError::InvalidPoint => -14,
            MpinError::BadPin => -19,
        }
    }
}

impl Display for MpinError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            MpinError::BadParams => write!(f, "Bad parameters"),
            MpinError::InvalidPoint => write!(f, "Invalid point"),
            MpinError::BadPin => write!(f, "Bad PIN"),
        }
    }
}

impl Error for MpinError {}

impl From<PairingError> for MpinError {
    fn from(value: PairingError) -> Self {
        match value {
            PairingError::InvalidScalarBytes => MpinError::BadParams,
            PairingError::InvalidG1Bytes
            | PairingError::InvalidG2Bytes
            | PairingError::InvalidGtBytes => MpinError::InvalidPoint,
        }
    }
}

/// Results returned by the protocol layer
pub type MpinResult<T> = Result<T, MpinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(MpinError::BadParams.code(), -11);
        assert_eq!(MpinError::InvalidPoint.code(), -14);
        assert_eq!(MpinError::BadPin.code(), -19);
        assert_eq!(
            MpinError::from(PairingError::InvalidG2Bytes),
            MpinError::InvalidPoint
        );
        assert_eq!(
            MpinError::from(PairingError::InvalidScalarBytes),
            MpinError::BadParams
        );
    }
}
