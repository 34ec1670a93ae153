//! The platform capability the scanner reads cells from.

use serde::Deserialize;
use strum::Display;

use crate::{
    error::Result,
    observation::{CellLocation, NeighborCell, Observation},
    operator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PhoneType {
    /// No cellular radio.
    #[default]
    None,
    Gsm,
    Cdma,
    Sip,
}

impl PhoneType {
    /// Whether the device can report the network it is registered on.
    pub fn has_radio(self) -> bool {
        matches!(self, PhoneType::Gsm | PhoneType::Cdma)
    }
}

/// Access to the modem's telemetry.
///
/// Source methods return [`crate::Error::CapabilityUnavailable`] when they
/// cannot be queried on this device, for example for lack of permission.
/// Calls may block on radio I/O.
pub trait Telephony {
    fn phone_type(&self) -> PhoneType;

    /// Platform API level, which decides the sources that exist.
    fn capability_level(&self) -> u32;

    /// Current network type code.
    fn network_type(&self) -> i32;

    fn network_operator(&self) -> Option<String>;

    fn sim_operator(&self) -> Option<String>;

    /// Unified list of all visible cells. `Ok(None)` when the platform
    /// returned nothing at all, as opposed to an empty list.
    fn all_cell_info(&self) -> Result<Option<Vec<Observation>>>;

    fn cell_location(&self) -> Result<Option<CellLocation>>;

    fn neighboring_cell_info(&self) -> Result<Vec<NeighborCell>>;

    fn hardware_id(&self) -> Option<String>;

    /// Identifier assigned to this installation by the platform.
    fn install_id(&self) -> Option<String>;

    /// Operator string used for the legacy sources.
    fn operator(&self) -> Option<String> {
        let network = self.network_operator();
        let sim = self.sim_operator();
        operator::select(network.as_deref(), sim.as_deref()).map(str::to_owned)
    }

    /// Hardware id, falling back to the install id.
    fn device_identifier(&self) -> String {
        self.hardware_id()
            .filter(|x| !x.is_empty())
            .or_else(|| self.install_id())
            .unwrap_or_default()
    }
}
