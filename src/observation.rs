//! Raw readings as the platform reports them.
//!
//! Integer fields hold the platform's raw value, [`UNAVAILABLE`] when it has
//! none. Nothing here is normalized; that happens in the decoders.

use serde::Deserialize;

use crate::sentinel::UNAVAILABLE;

/// Neighbor rssi value meaning "not measured".
pub const UNKNOWN_RSSI: i32 = 99;

/// Legacy APIs report missing lac/cid/psc as -1.
const LEGACY_UNKNOWN: i32 = -1;

/// One entry of the unified cell list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Observation {
    Gsm(ObservedCell<GsmIdentity, GsmSignal>),
    Cdma(ObservedCell<CdmaIdentity, CdmaSignal>),
    Lte(ObservedCell<LteIdentity, LteSignal>),
    Wcdma(ObservedCell<WcdmaIdentity, WcdmaSignal>),
    /// Any shape the decoders cannot handle, such as NR cells.
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservedCell<I, S> {
    pub registered: bool,
    pub identity: I,
    pub signal: S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GsmIdentity {
    pub mcc: i32,
    pub mnc: i32,
    pub lac: i32,
    pub cid: i32,
}

impl Default for GsmIdentity {
    fn default() -> Self {
        Self {
            mcc: UNAVAILABLE,
            mnc: UNAVAILABLE,
            lac: UNAVAILABLE,
            cid: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GsmSignal {
    pub asu: i32,
    pub dbm: i32,
    pub level: i32,
}

impl Default for GsmSignal {
    fn default() -> Self {
        Self {
            asu: UNAVAILABLE,
            dbm: UNAVAILABLE,
            level: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdmaIdentity {
    pub system_id: i32,
    pub network_id: i32,
    pub base_station_id: i32,
}

impl Default for CdmaIdentity {
    fn default() -> Self {
        Self {
            system_id: UNAVAILABLE,
            network_id: UNAVAILABLE,
            base_station_id: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CdmaSignal {
    pub dbm: i32,
    pub level: i32,
}

impl Default for CdmaSignal {
    fn default() -> Self {
        Self {
            dbm: UNAVAILABLE,
            level: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LteIdentity {
    pub mcc: i32,
    pub mnc: i32,
    pub ci: i32,
    pub pci: i32,
    pub tac: i32,
}

impl Default for LteIdentity {
    fn default() -> Self {
        Self {
            mcc: UNAVAILABLE,
            mnc: UNAVAILABLE,
            ci: UNAVAILABLE,
            pci: UNAVAILABLE,
            tac: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LteSignal {
    pub asu: i32,
    pub dbm: i32,
    pub timing_advance: i32,
    pub level: i32,
}

impl Default for LteSignal {
    fn default() -> Self {
        Self {
            asu: UNAVAILABLE,
            dbm: UNAVAILABLE,
            timing_advance: UNAVAILABLE,
            level: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WcdmaIdentity {
    pub mcc: i32,
    pub mnc: i32,
    pub lac: i32,
    pub cid: i32,
    pub psc: i32,
}

impl Default for WcdmaIdentity {
    fn default() -> Self {
        Self {
            mcc: UNAVAILABLE,
            mnc: UNAVAILABLE,
            lac: UNAVAILABLE,
            cid: UNAVAILABLE,
            psc: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WcdmaSignal {
    pub asu: i32,
    pub dbm: i32,
    pub level: i32,
}

impl Default for WcdmaSignal {
    fn default() -> Self {
        Self {
            asu: UNAVAILABLE,
            dbm: UNAVAILABLE,
            level: UNAVAILABLE,
        }
    }
}

/// Serving cell as reported by the legacy location API.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellLocation {
    Gsm(GsmLocation),
    Cdma(CdmaLocation),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GsmLocation {
    pub lac: i32,
    pub cid: i32,
    pub psc: i32,
    pub dbm: i32,
}

impl Default for GsmLocation {
    fn default() -> Self {
        Self {
            lac: LEGACY_UNKNOWN,
            cid: LEGACY_UNKNOWN,
            psc: LEGACY_UNKNOWN,
            dbm: UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdmaLocation {
    pub base_station_id: i32,
    pub network_id: i32,
    pub system_id: i32,
    pub dbm: i32,
}

impl Default for CdmaLocation {
    fn default() -> Self {
        Self {
            base_station_id: LEGACY_UNKNOWN,
            network_id: LEGACY_UNKNOWN,
            system_id: LEGACY_UNKNOWN,
            dbm: UNAVAILABLE,
        }
    }
}

/// One entry of the legacy neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NeighborCell {
    pub network_type: i32,
    pub lac: i32,
    pub cid: i32,
    pub psc: i32,
    pub rssi: i32,
}

impl Default for NeighborCell {
    fn default() -> Self {
        Self {
            network_type: 0,
            lac: LEGACY_UNKNOWN,
            cid: LEGACY_UNKNOWN,
            psc: LEGACY_UNKNOWN,
            rssi: UNKNOWN_RSSI,
        }
    }
}
