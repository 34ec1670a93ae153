use thiserror::Error;

use crate::model::RadioType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The operator string could not be split into mcc and mnc.
    #[error("malformed operator code: {0:?}")]
    MalformedOperatorCode(Option<String>),

    /// The platform handed over a cell shape the decoders do not know.
    #[error("unrecognized {0} variant")]
    UnrecognizedObservationVariant(&'static str),

    /// A source cannot be queried on this device right now.
    #[error("{0} is unavailable")]
    CapabilityUnavailable(&'static str),

    /// A decoded cell has neither a known operator nor an in-range PCI/PSC.
    #[error("{0} cell carries no usable identity")]
    IdentityInsufficient(RadioType),
}

impl Error {
    /// Whether the error should abort a scan rather than skip one record or source.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnrecognizedObservationVariant(_))
    }
}
