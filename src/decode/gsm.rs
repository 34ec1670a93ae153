use crate::{
    error::Result,
    model::{RadioRecord, RadioType},
    observation::{GsmIdentity, GsmSignal, ObservedCell},
    sentinel::Sentinel,
};

/// GSM cells need both mcc and mnc; a GSM PSC does not identify a cell.
pub fn decode(cell: &ObservedCell<GsmIdentity, GsmSignal>) -> Result<RadioRecord> {
    let ObservedCell {
        registered,
        identity,
        signal,
    } = cell;

    super::accept(RadioRecord {
        radio: RadioType::Gsm,
        mcc: Sentinel::Plain.decode(identity.mcc),
        mnc: Sentinel::Plain.decode(identity.mnc),
        location_area_code: Sentinel::Plain.decode(identity.lac),
        cell_id: Sentinel::Plain.decode(identity.cid),
        asu: Sentinel::Plain.decode(signal.asu),
        signal_dbm: Sentinel::SignalStrength.decode(signal.dbm),
        simple_level: Sentinel::Plain.decode(signal.level),
        is_registered: *registered,
        ..RadioRecord::unknown()
    })
}
