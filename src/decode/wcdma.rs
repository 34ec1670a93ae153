use crate::{
    error::Result,
    model::{RadioRecord, RadioType},
    observation::{ObservedCell, WcdmaIdentity, WcdmaSignal},
    sentinel::Sentinel,
};

/// WCDMA cells are kept with a known operator or with a PSC below 512.
pub fn decode(cell: &ObservedCell<WcdmaIdentity, WcdmaSignal>) -> Result<RadioRecord> {
    let ObservedCell {
        registered,
        identity,
        signal,
    } = cell;

    super::accept(RadioRecord {
        radio: RadioType::Wcdma,
        mcc: Sentinel::Plain.decode(identity.mcc),
        mnc: Sentinel::Plain.decode(identity.mnc),
        location_area_code: Sentinel::Plain.decode(identity.lac),
        cell_id: Sentinel::Plain.decode(identity.cid),
        physical_cell_id: Sentinel::Plain.decode(identity.psc),
        asu: Sentinel::Plain.decode(signal.asu),
        signal_dbm: Sentinel::SignalStrength.decode(signal.dbm),
        simple_level: Sentinel::Plain.decode(signal.level),
        is_registered: *registered,
        ..RadioRecord::unknown()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, sentinel::UNAVAILABLE};

    fn cell(mcc: i32, mnc: i32, psc: i32) -> ObservedCell<WcdmaIdentity, WcdmaSignal> {
        ObservedCell {
            registered: mcc != UNAVAILABLE,
            identity: WcdmaIdentity {
                mcc,
                mnc,
                lac: if mcc == UNAVAILABLE { UNAVAILABLE } else { 20 },
                cid: if mcc == UNAVAILABLE { UNAVAILABLE } else { 1323033 },
                psc,
            },
            signal: WcdmaSignal {
                asu: 6,
                dbm: -101,
                level: UNAVAILABLE,
            },
        }
    }

    #[test]
    fn serving_cell() {
        let record = decode(&cell(302, 490, 400)).unwrap();
        assert_eq!(record.to_string(), "wcdma,302,490,1323033,20,-101,-1,6,-1,400,1");
    }

    #[test]
    fn neighbor_identified_by_psc() {
        let record = decode(&cell(UNAVAILABLE, UNAVAILABLE, 167)).unwrap();
        assert_eq!(record.to_string(), "wcdma,-1,-1,-1,-1,-101,-1,6,-1,167,0");
        assert!(decode(&cell(UNAVAILABLE, UNAVAILABLE, 511)).is_ok());
    }

    #[test]
    fn psc_out_of_range() {
        for psc in [512, -1, UNAVAILABLE] {
            assert!(matches!(
                decode(&cell(UNAVAILABLE, UNAVAILABLE, psc)),
                Err(Error::IdentityInsufficient(RadioType::Wcdma))
            ));
        }
    }

    #[test]
    fn half_known_operator_needs_psc() {
        assert!(decode(&cell(302, UNAVAILABLE, UNAVAILABLE)).is_err());
        assert!(decode(&cell(302, UNAVAILABLE, 12)).is_ok());
    }
}
