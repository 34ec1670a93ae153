//! Per-technology decoding of the unified cell list.

use tracing::debug;

use crate::{
    error::{Error, Result},
    model::RadioRecord,
    observation::Observation,
};

pub mod cdma;
pub mod gsm;
pub mod lte;
pub mod wcdma;

/// Decodes one observation and appends it to `records` when it is usable.
///
/// Returns whether a record was added. Cells without identity are skipped;
/// only a shape the decoders do not know is an error.
pub fn add_cell(records: &mut Vec<RadioRecord>, observation: &Observation) -> Result<bool> {
    let decoded = match observation {
        Observation::Gsm(cell) => gsm::decode(cell),
        Observation::Cdma(cell) => Ok(cdma::decode(cell)),
        Observation::Lte(cell) => lte::decode(cell),
        Observation::Wcdma(cell) => wcdma::decode(cell),
        Observation::Unrecognized => return Err(Error::UnrecognizedObservationVariant("cell info")),
    };

    match decoded {
        Ok(record) => {
            records.push(record);
            Ok(true)
        }
        Err(e @ Error::IdentityInsufficient(_)) => {
            debug!(error = %e, "skipping cell");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn accept(record: RadioRecord) -> Result<RadioRecord> {
    if record.has_identity() {
        Ok(record)
    } else {
        Err(Error::IdentityInsufficient(record.radio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::RadioType,
        observation::{GsmIdentity, LteIdentity, ObservedCell, WcdmaIdentity},
    };

    #[test]
    fn appends_valid_cells() {
        let mut records = Vec::new();
        let gsm = Observation::Gsm(ObservedCell {
            registered: true,
            identity: GsmIdentity {
                mcc: 310,
                mnc: 260,
                lac: 100,
                cid: 200,
            },
            ..Default::default()
        });
        assert!(add_cell(&mut records, &gsm).unwrap());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].radio, RadioType::Gsm);
        assert!(records[0].is_registered);
    }

    #[test]
    fn skips_cells_without_identity() {
        let mut records = Vec::new();
        let observations = [
            Observation::Gsm(ObservedCell::default()),
            Observation::Lte(ObservedCell {
                identity: LteIdentity {
                    pci: 504,
                    ..Default::default()
                },
                ..Default::default()
            }),
            Observation::Wcdma(ObservedCell {
                identity: WcdmaIdentity {
                    psc: -3,
                    ..Default::default()
                },
                ..Default::default()
            }),
        ];
        for ob in &observations {
            assert!(!add_cell(&mut records, ob).unwrap());
        }
        assert!(records.is_empty());
    }

    #[test]
    fn cdma_is_always_added() {
        let mut records = Vec::new();
        assert!(add_cell(&mut records, &Observation::Cdma(ObservedCell::default())).unwrap());
        assert_eq!(records[0].radio, RadioType::Cdma);
    }

    #[test]
    fn unrecognized_is_fatal() {
        let mut records = Vec::new();
        let err = add_cell(&mut records, &Observation::Unrecognized).unwrap_err();
        assert!(err.is_fatal());
        assert!(records.is_empty());
    }
}
