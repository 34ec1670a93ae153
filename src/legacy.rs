//! Records built from the two legacy sources: the serving cell location and
//! the neighbor list.
//!
//! Neither source carries an operator or a registration flag. The operator
//! comes from the device's registered network, and records are never marked
//! as registered.

use tracing::debug;

use crate::{
    error::{Error, Result},
    model::{RadioRecord, RadioType},
    observation::{CellLocation, NeighborCell, UNKNOWN_RSSI},
    operator::OperatorCode,
    sentinel::Sentinel,
};

/// Builds the serving cell record.
///
/// `read_psc` is false on capability levels whose GSM location has no PSC.
pub fn serving_cell(
    location: &CellLocation,
    network_type: i32,
    operator: Option<&str>,
    read_psc: bool,
) -> Result<RadioRecord> {
    let radio = RadioType::from_network_type(network_type);
    match location {
        CellLocation::Gsm(gsm) => {
            let code = OperatorCode::parse(operator)?;
            Ok(RadioRecord {
                radio,
                mcc: Some(code.mcc),
                mnc: Some(code.mnc),
                location_area_code: Sentinel::Plain.decode_non_negative(gsm.lac),
                cell_id: Sentinel::Plain.decode_non_negative(gsm.cid),
                physical_cell_id: if read_psc {
                    Sentinel::Plain.decode_non_negative(gsm.psc)
                } else {
                    None
                },
                signal_dbm: Sentinel::SignalStrength.decode(gsm.dbm),
                ..RadioRecord::unknown()
            })
        }
        CellLocation::Cdma(cdma) => {
            let code = OperatorCode::parse(operator)?;
            Ok(RadioRecord {
                radio,
                mcc: Some(code.mcc),
                mnc: Sentinel::Plain.decode(cdma.system_id),
                location_area_code: Sentinel::Plain.decode(cdma.network_id),
                cell_id: Sentinel::Plain.decode(cdma.base_station_id),
                signal_dbm: Sentinel::SignalStrength.decode(cdma.dbm),
                ..RadioRecord::unknown()
            })
        }
        CellLocation::Unrecognized => Err(Error::UnrecognizedObservationVariant("cell location")),
    }
}

/// Builds a neighbor record, or `None` when its network type is unknown.
pub fn neighbor(entry: &NeighborCell, operator: OperatorCode) -> Option<RadioRecord> {
    let radio = RadioType::from_network_type(entry.network_type);
    if !radio.is_known() {
        debug!(network_type = entry.network_type, "skipping neighbor of unknown radio");
        return None;
    }

    Some(RadioRecord {
        radio,
        mcc: Some(operator.mcc),
        mnc: Some(operator.mnc),
        location_area_code: Sentinel::Plain.decode_non_negative(entry.lac),
        cell_id: Sentinel::Plain.decode_non_negative(entry.cid),
        physical_cell_id: Sentinel::Plain.decode_non_negative(entry.psc),
        signal_dbm: if entry.rssi == UNKNOWN_RSSI {
            None
        } else {
            Sentinel::SignalStrength.decode(entry.rssi)
        },
        ..RadioRecord::unknown()
    })
}

/// Builds records for a whole neighbor list, parsing the operator once.
pub fn neighbors(entries: &[NeighborCell], operator: Option<&str>) -> Result<Vec<RadioRecord>> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    let code = OperatorCode::parse(operator)?;
    Ok(entries.iter().filter_map(|x| neighbor(x, code)).collect())
}
