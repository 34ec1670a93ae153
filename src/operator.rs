//! Parsing of the combined mcc/mnc operator string (e.g. `"310260"`).
//!
//! The legacy sources carry no operator on the cell itself, so the device's
//! registered operator is parsed once and applied to every record built from
//! those sources.

use std::str::FromStr;

use crate::error::{Error, Result};

const MIN_LEN: usize = 5;
const MAX_LEN: usize = 8;
const MCC_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorCode {
    pub mcc: i32,
    pub mnc: i32,
}

impl OperatorCode {
    pub fn parse(code: Option<&str>) -> Result<Self> {
        let malformed = || Error::MalformedOperatorCode(code.map(str::to_owned));

        let code = code.ok_or_else(malformed)?;
        if !(MIN_LEN..=MAX_LEN).contains(&code.len()) || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let (mcc, mnc) = code.split_at(MCC_LEN);
        Ok(Self {
            mcc: mcc.parse().map_err(|_| malformed())?,
            mnc: mnc.parse().map_err(|_| malformed())?,
        })
    }
}

impl FromStr for OperatorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}

/// Picks the operator string to parse: the network operator, or the SIM
/// operator when the network one is missing or too short to hold an mnc.
pub fn select<'a>(network: Option<&'a str>, sim: Option<&'a str>) -> Option<&'a str> {
    match network {
        Some(x) if x.len() > MCC_LEN => Some(x),
        _ => sim,
    }
}
