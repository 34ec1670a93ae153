use crate::{
    error::Result,
    model::{RadioRecord, RadioType},
    observation::{LteIdentity, LteSignal, ObservedCell},
    sentinel::Sentinel,
};

/// LTE cells are kept with a known operator or with a PCI below 504.
pub fn decode(cell: &ObservedCell<LteIdentity, LteSignal>) -> Result<RadioRecord> {
    let ObservedCell {
        registered,
        identity,
        signal,
    } = cell;

    super::accept(RadioRecord {
        radio: RadioType::Lte,
        mcc: Sentinel::Plain.decode(identity.mcc),
        mnc: Sentinel::Plain.decode(identity.mnc),
        cell_id: Sentinel::Plain.decode(identity.ci),
        physical_cell_id: Sentinel::Plain.decode(identity.pci),
        location_area_code: Sentinel::Plain.decode(identity.tac),
        asu: Sentinel::Plain.decode(signal.asu),
        signal_dbm: Sentinel::SignalStrength.decode(signal.dbm),
        timing_advance: Sentinel::Plain.decode(signal.timing_advance),
        simple_level: Sentinel::Plain.decode(signal.level),
        is_registered: *registered,
    })
}
