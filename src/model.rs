use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::sentinel::{serialize_plain, Sentinel};

/// Header matching the line rendered by [`RadioRecord`]'s `Display` impl.
pub const HEADER: &str = "Radio,Mcc,Mnc,Cid,Lac,SignalS,Level,mAsu,mTa,PscPci,isReg";

/// Highest LTE physical cell id + 1.
pub const LTE_PCI_LIMIT: i32 = 504;

/// Highest WCDMA primary scrambling code + 1.
pub const WCDMA_PSC_LIMIT: i32 = 512;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RadioType {
    Gsm,
    Wcdma,
    Lte,
    Cdma,
    /// Rendered as an empty string in the textual formats.
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unknown,
}

impl RadioType {
    /// Maps a platform network type code to the radio family it belongs to.
    pub fn from_network_type(code: i32) -> Self {
        match code {
            1 | 2 => RadioType::Gsm,
            3 | 8 | 9 | 10 | 15 => RadioType::Wcdma,
            5 | 6 | 7 | 11 | 12 | 14 => RadioType::Cdma,
            13 => RadioType::Lte,
            _ => RadioType::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != RadioType::Unknown
    }
}

/// One observed cell, independent of the technology and source it came from.
///
/// Equality ignores `simple_level`, which is a derived bucket of the signal.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioRecord {
    pub radio: RadioType,
    #[serde(serialize_with = "serialize_plain")]
    pub mcc: Option<i32>,
    #[serde(serialize_with = "serialize_plain")]
    pub mnc: Option<i32>,
    #[serde(rename = "cid", serialize_with = "serialize_plain")]
    pub cell_id: Option<i32>,
    #[serde(rename = "lac", serialize_with = "serialize_plain")]
    pub location_area_code: Option<i32>,
    /// LTE PCI or GSM/WCDMA PSC.
    #[serde(rename = "psc", skip_serializing_if = "Option::is_none")]
    pub physical_cell_id: Option<i32>,
    #[serde(rename = "signal", skip_serializing_if = "Option::is_none")]
    pub signal_dbm: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asu: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_advance: Option<i32>,
    #[serde(serialize_with = "serialize_plain")]
    pub simple_level: Option<i32>,
    pub is_registered: bool,
}

type Identity = (
    RadioType,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    bool,
);

impl RadioRecord {
    /// A record with every field unknown. GSM is the default radio until the
    /// source tells otherwise.
    pub fn unknown() -> Self {
        Self {
            radio: RadioType::Gsm,
            mcc: None,
            mnc: None,
            cell_id: None,
            location_area_code: None,
            physical_cell_id: None,
            signal_dbm: None,
            asu: None,
            timing_advance: None,
            simple_level: None,
            is_registered: false,
        }
    }

    fn identity(&self) -> Identity {
        (
            self.radio,
            self.mcc,
            self.mnc,
            self.cell_id,
            self.location_area_code,
            self.signal_dbm,
            self.asu,
            self.timing_advance,
            self.physical_cell_id,
            self.is_registered,
        )
    }

    /// Whether the record can be attributed to a cell at all.
    ///
    /// CDMA never carries an mcc and is always accepted.
    pub fn has_identity(&self) -> bool {
        if self.radio == RadioType::Cdma || (self.mcc.is_some() && self.mnc.is_some()) {
            return true;
        }
        let unit = self.physical_cell_id;
        match self.radio {
            RadioType::Lte => unit.is_some_and(|x| (0..LTE_PCI_LIMIT).contains(&x)),
            RadioType::Wcdma => unit.is_some_and(|x| (0..WCDMA_PSC_LIMIT).contains(&x)),
            _ => false,
        }
    }

    /// Natural key used by consumers that do not need full identity semantics.
    pub fn tower_id(&self) -> String {
        format!(
            "{}:{}:{}",
            Sentinel::Plain.encode(self.cell_id),
            Sentinel::Plain.encode(self.location_area_code),
            Sentinel::Plain.encode(self.physical_cell_id),
        )
    }

    /// Short human readable identity, used in log output.
    pub fn cell_identity(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.radio,
            Sentinel::Plain.encode(self.mcc),
            Sentinel::Plain.encode(self.mnc),
            Sentinel::Plain.encode(self.location_area_code),
            Sentinel::Plain.encode(self.cell_id),
            Sentinel::Plain.encode(self.physical_cell_id),
        )
    }
}

impl Default for RadioRecord {
    fn default() -> Self {
        Self::unknown()
    }
}

impl PartialEq for RadioRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for RadioRecord {}

impl Hash for RadioRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Renders the fixed 11 field line described by [`HEADER`].
impl fmt::Display for RadioRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = |x| Sentinel::Plain.encode(x);
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{}",
            self.radio,
            plain(self.mcc),
            plain(self.mnc),
            plain(self.cell_id),
            plain(self.location_area_code),
            Sentinel::SignalStrength.encode(self.signal_dbm),
            plain(self.simple_level),
            plain(self.asu),
            plain(self.timing_advance),
            plain(self.physical_cell_id),
            u8::from(self.is_registered),
        )
    }
}
