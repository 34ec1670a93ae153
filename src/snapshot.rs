//! A recording of everything a device's telephony reported at one moment.
//!
//! Snapshots implement [`Telephony`], so a scan can be replayed off-device.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    error,
    observation::{CellLocation, NeighborCell, Observation},
    report::Fix,
    telephony::{PhoneType, Telephony},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub phone_type: PhoneType,
    pub capability_level: u32,
    pub network_type: i32,
    pub network_operator: Option<String>,
    pub sim_operator: Option<String>,
    pub hardware_id: Option<String>,
    pub install_id: Option<String>,

    /// Missing when the platform returned nothing for the unified list.
    pub all_cell_info: Option<Vec<Observation>>,
    pub cell_location: Option<CellLocation>,
    /// Missing when the neighbor list could not be queried.
    pub neighboring_cells: Option<Vec<NeighborCell>>,

    pub location: Option<Fix>,
}

impl Snapshot {
    /// Loads a snapshot, as TOML when the file extension says so and as
    /// JSON otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

        let snapshot = if path.extension().is_some_and(|x| x == "toml") {
            toml::from_str(&data).context("Failed to parse snapshot")?
        } else {
            serde_json::from_str(&data).context("Failed to parse snapshot")?
        };
        Ok(snapshot)
    }
}

impl Telephony for Snapshot {
    fn phone_type(&self) -> PhoneType {
        self.phone_type
    }

    fn capability_level(&self) -> u32 {
        self.capability_level
    }

    fn network_type(&self) -> i32 {
        self.network_type
    }

    fn network_operator(&self) -> Option<String> {
        self.network_operator.clone()
    }

    fn sim_operator(&self) -> Option<String> {
        self.sim_operator.clone()
    }

    fn all_cell_info(&self) -> error::Result<Option<Vec<Observation>>> {
        Ok(self.all_cell_info.clone())
    }

    fn cell_location(&self) -> error::Result<Option<CellLocation>> {
        Ok(self.cell_location.clone())
    }

    fn neighboring_cell_info(&self) -> error::Result<Vec<NeighborCell>> {
        self.neighboring_cells
            .clone()
            .ok_or(error::Error::CapabilityUnavailable("neighbor list"))
    }

    fn hardware_id(&self) -> Option<String> {
        self.hardware_id.clone()
    }

    fn install_id(&self) -> Option<String> {
        self.install_id.clone()
    }
}
