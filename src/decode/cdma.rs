use crate::{
    model::{RadioRecord, RadioType},
    observation::{CdmaIdentity, CdmaSignal, ObservedCell},
    sentinel::Sentinel,
};

/// CDMA identity maps onto the GSM-shaped record as
/// system id → mnc, network id → lac and base station id → cid.
/// There is no mcc, and the record is never rejected.
pub fn decode(cell: &ObservedCell<CdmaIdentity, CdmaSignal>) -> RadioRecord {
    let ObservedCell {
        registered,
        identity,
        signal,
    } = cell;

    RadioRecord {
        radio: RadioType::Cdma,
        mnc: Sentinel::Plain.decode(identity.system_id),
        location_area_code: Sentinel::Plain.decode(identity.network_id),
        cell_id: Sentinel::Plain.decode(identity.base_station_id),
        signal_dbm: Sentinel::SignalStrength.decode(signal.dbm),
        simple_level: Sentinel::Plain.decode(signal.level),
        is_registered: *registered,
        ..RadioRecord::unknown()
    }
}
