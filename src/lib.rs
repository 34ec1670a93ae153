//! Cell tower scanning: reads whatever cellular telemetry the device offers,
//! normalizes it into [`RadioRecord`]s and renders the upload report.

pub mod config;
pub mod decode;
pub mod error;
pub mod legacy;
pub mod merge;
pub mod model;
pub mod observation;
pub mod operator;
pub mod report;
pub mod scanner;
pub mod sentinel;
pub mod snapshot;
pub mod telephony;

pub use error::{Error, Result};
pub use model::{RadioRecord, RadioType};
pub use scanner::Scanner;
pub use telephony::Telephony;
