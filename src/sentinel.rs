//! Encoding of "unknown" values.
//!
//! Records keep unknown fields as `None`. The platform marks missing readings
//! with `i32::MAX`, while the textual formats use `-1` (or `-1000` for dBm
//! readings, where small negative numbers are legitimate). Every conversion
//! between those worlds goes through [`Sentinel`].

use serde::Serializer;

/// Marker the platform uses for a reading it cannot provide.
pub const UNAVAILABLE: i32 = i32::MAX;

/// Unknown value for identifiers, asu, timing advance and level.
pub const UNKNOWN: i32 = -1;

/// Unknown value for signal strength in dBm.
pub const UNKNOWN_SIGNAL_STRENGTH: i32 = -1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Identifiers and coarse readings, unknown is `-1`.
    Plain,
    /// Signal strength in dBm, unknown is `-1000`.
    SignalStrength,
}

impl Sentinel {
    pub const fn unknown(self) -> i32 {
        match self {
            Sentinel::Plain => UNKNOWN,
            Sentinel::SignalStrength => UNKNOWN_SIGNAL_STRENGTH,
        }
    }

    /// Converts a raw reading. Both the platform marker and our own sentinel
    /// mean "unknown".
    pub fn decode(self, raw: i32) -> Option<i32> {
        if raw == UNAVAILABLE || raw == self.unknown() {
            None
        } else {
            Some(raw)
        }
    }

    /// Converts a reading from the legacy APIs, which report anything negative
    /// as "not available".
    pub fn decode_non_negative(self, raw: i32) -> Option<i32> {
        self.decode(raw).filter(|x| *x >= 0)
    }

    pub fn encode(self, value: Option<i32>) -> i32 {
        value.unwrap_or(self.unknown())
    }
}

pub(crate) fn serialize_plain<S: Serializer>(
    value: &Option<i32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(Sentinel::Plain.encode(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_marker_is_unknown() {
        assert_eq!(Sentinel::Plain.decode(UNAVAILABLE), None);
        assert_eq!(Sentinel::SignalStrength.decode(UNAVAILABLE), None);
    }

    #[test]
    fn own_sentinel_is_unknown() {
        assert_eq!(Sentinel::Plain.decode(-1), None);
        assert_eq!(Sentinel::SignalStrength.decode(-1000), None);

        // -1 dBm is a reading, not a sentinel
        assert_eq!(Sentinel::SignalStrength.decode(-1), Some(-1));
        assert_eq!(Sentinel::SignalStrength.decode(0), Some(0));
    }

    #[test]
    fn non_negative() {
        assert_eq!(Sentinel::Plain.decode_non_negative(-5), None);
        assert_eq!(Sentinel::Plain.decode_non_negative(0), Some(0));
        assert_eq!(Sentinel::Plain.decode_non_negative(UNAVAILABLE), None);
    }

    #[test]
    fn encode() {
        assert_eq!(Sentinel::Plain.encode(None), -1);
        assert_eq!(Sentinel::SignalStrength.encode(None), -1000);
        assert_eq!(Sentinel::SignalStrength.encode(Some(-85)), -85);
    }
}
