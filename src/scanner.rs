//! The acquisition cascade.
//!
//! Sources are tried in priority order within one scan:
//!
//! 1. the unified cell list, when the capability level offers it;
//! 2. the serving cell location, only when the unified list produced no record;
//! 3. the neighbor list, appended to whatever 1 or 2 produced.
//!
//! An empty unified list ends the scan with no cells. The combined candidates
//! go through [`merge::dedup`] before being returned.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::{
    config::ScannerConfig,
    decode,
    error::{Error, Result},
    legacy, merge,
    model::RadioRecord,
    telephony::Telephony,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lister {
    Unified,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Unbound,
    Bound(Lister),
}

enum Primary {
    Cells(Vec<RadioRecord>),
    NoCells,
    Fallback,
}

/// Scans cells through a telephony handle it owns.
///
/// The handle is bound on first use and kept for the scanner's lifetime.
/// Concurrent calls to [`Scanner::scan`] run one at a time.
pub struct Scanner<T> {
    telephony: T,
    config: ScannerConfig,
    binding: Mutex<Binding>,
}

impl<T: Telephony> Scanner<T> {
    pub fn new(telephony: T) -> Self {
        Self::with_config(telephony, ScannerConfig::default())
    }

    pub fn with_config(telephony: T, config: ScannerConfig) -> Self {
        Self {
            telephony,
            config,
            binding: Mutex::new(Binding::Unbound),
        }
    }

    pub fn telephony(&self) -> &T {
        &self.telephony
    }

    /// Binds to the telephony handle. Later calls are no-ops.
    ///
    /// Returns false while the device has no phone radio to bind to.
    pub fn initialize(&self) -> bool {
        let mut binding = self.lock();
        self.bind(&mut binding).is_some()
    }

    pub fn is_bound(&self) -> bool {
        matches!(*self.lock(), Binding::Bound(_))
    }

    pub fn device_identifier(&self) -> String {
        self.telephony.device_identifier()
    }

    /// Runs one full pass over the sources.
    ///
    /// Only an observation shape the decoders do not know fails the scan.
    /// Every other problem skips a record or a source.
    pub fn scan(&self) -> Result<Vec<RadioRecord>> {
        let mut binding = self.lock();

        let phone = self.telephony.phone_type();
        if !phone.has_radio() {
            debug!(%phone, "device reports no registered network");
            return Ok(Vec::new());
        }
        let Some(lister) = self.bind(&mut binding) else {
            return Ok(Vec::new());
        };

        let primary = match lister {
            Lister::Unified => self.unified()?,
            Lister::Legacy => Primary::Fallback,
        };
        let mut candidates = match primary {
            Primary::NoCells => {
                debug!("no cell towers");
                return Ok(Vec::new());
            }
            Primary::Cells(cells) => cells,
            Primary::Fallback => self.serving_cell()?.into_iter().collect(),
        };
        candidates.extend(self.neighbors()?);

        let cells = merge::dedup(candidates);
        info!(cells = cells.len(), "scan complete");
        Ok(cells)
    }

    fn lock(&self) -> MutexGuard<'_, Binding> {
        // the guarded state is a plain flag, a panicked scan cannot corrupt it
        self.binding.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bind(&self, binding: &mut Binding) -> Option<Lister> {
        if let Binding::Bound(lister) = *binding {
            return Some(lister);
        }

        let phone = self.telephony.phone_type();
        if !phone.has_radio() {
            debug!(%phone, "nothing to bind to");
            return None;
        }

        let level = self.telephony.capability_level();
        let lister = if level >= self.config.unified_list_min_level {
            Lister::Unified
        } else {
            Lister::Legacy
        };
        *binding = Binding::Bound(lister);
        info!(%phone, level, ?lister, "bound to telephony");
        Some(lister)
    }

    fn unified(&self) -> Result<Primary> {
        let observations = recover("unified cell list", self.telephony.all_cell_info())?.flatten();
        let Some(observations) = observations else {
            return Ok(Primary::Fallback);
        };
        if observations.is_empty() {
            return Ok(Primary::NoCells);
        }

        let mut cells = Vec::with_capacity(observations.len());
        for observation in &observations {
            decode::add_cell(&mut cells, observation)?;
        }
        debug!(observed = observations.len(), decoded = cells.len(), "unified cell list");

        if cells.is_empty() {
            Ok(Primary::Fallback)
        } else {
            Ok(Primary::Cells(cells))
        }
    }

    fn serving_cell(&self) -> Result<Option<RadioRecord>> {
        let location = recover("cell location", self.telephony.cell_location())?.flatten();
        let Some(location) = location else {
            return Ok(None);
        };

        let read_psc = self.telephony.capability_level() >= self.config.location_psc_min_level;
        let operator = self.telephony.operator();
        recover(
            "cell location",
            legacy::serving_cell(
                &location,
                self.telephony.network_type(),
                operator.as_deref(),
                read_psc,
            ),
        )
    }

    fn neighbors(&self) -> Result<Vec<RadioRecord>> {
        let entries = recover("neighbor list", self.telephony.neighboring_cell_info())?;
        let Some(entries) = entries.filter(|x| !x.is_empty()) else {
            return Ok(Vec::new());
        };

        let operator = self.telephony.operator();
        let cells = recover("neighbor list", legacy::neighbors(&entries, operator.as_deref()))?;
        Ok(cells.unwrap_or_default())
    }
}

/// Turns the expected failures of a source into "no data".
fn recover<U>(source: &'static str, result: Result<U>) -> Result<Option<U>> {
    match result {
        Ok(x) => Ok(Some(x)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e @ Error::CapabilityUnavailable(_)) => {
            debug!(source, error = %e, "source skipped");
            Ok(None)
        }
        Err(e) => {
            warn!(source, error = %e, "source skipped");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicU32, AtomicUsize, Ordering},
        thread,
        time::Duration,
    };

    use super::*;
    use crate::{
        model::RadioType,
        observation::{
            CellLocation, GsmIdentity, GsmLocation, LteIdentity, NeighborCell, Observation,
            ObservedCell,
        },
        telephony::PhoneType,
    };

    #[derive(Default)]
    enum Unified {
        #[default]
        Unavailable,
        Nothing,
        List(Vec<Observation>),
    }

    #[derive(Default)]
    struct FakeTelephony {
        phone: PhoneType,
        level: AtomicU32,
        network_type: i32,
        operator: Option<String>,
        unified: Unified,
        location: Option<CellLocation>,
        neighbors: Option<Vec<NeighborCell>>,

        unified_calls: AtomicUsize,
        location_calls: AtomicUsize,
        neighbor_calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeTelephony {
        fn gsm(level: u32) -> Self {
            Self {
                phone: PhoneType::Gsm,
                level: AtomicU32::new(level),
                network_type: 1,
                operator: Some("31026".to_owned()),
                ..Default::default()
            }
        }
    }

    impl Telephony for FakeTelephony {
        fn phone_type(&self) -> PhoneType {
            self.phone
        }

        fn capability_level(&self) -> u32 {
            self.level.load(Ordering::SeqCst)
        }

        fn network_type(&self) -> i32 {
            self.network_type
        }

        fn network_operator(&self) -> Option<String> {
            self.operator.clone()
        }

        fn sim_operator(&self) -> Option<String> {
            None
        }

        fn all_cell_info(&self) -> Result<Option<Vec<Observation>>> {
            self.unified_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match &self.unified {
                Unified::Unavailable => Err(Error::CapabilityUnavailable("unified cell list")),
                Unified::Nothing => Ok(None),
                Unified::List(x) => Ok(Some(x.clone())),
            }
        }

        fn cell_location(&self) -> Result<Option<CellLocation>> {
            self.location_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.location.clone())
        }

        fn neighboring_cell_info(&self) -> Result<Vec<NeighborCell>> {
            self.neighbor_calls.fetch_add(1, Ordering::SeqCst);
            self.neighbors
                .clone()
                .ok_or(Error::CapabilityUnavailable("neighbor list"))
        }

        fn hardware_id(&self) -> Option<String> {
            None
        }

        fn install_id(&self) -> Option<String> {
            Some("install-1".to_owned())
        }
    }

    fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn lte(pci: i32, registered: bool) -> Observation {
        Observation::Lte(ObservedCell {
            registered,
            identity: LteIdentity {
                pci,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    fn serving_location() -> CellLocation {
        CellLocation::Gsm(GsmLocation {
            lac: 100,
            cid: 200,
            dbm: -85,
            ..Default::default()
        })
    }

    fn neighbor(lac: i32, cid: i32, rssi: i32) -> NeighborCell {
        NeighborCell {
            network_type: 1,
            lac,
            cid,
            rssi,
            ..Default::default()
        }
    }

    #[test]
    fn unified_list_skips_serving_location() {
        let telephony = FakeTelephony {
            unified: Unified::List(vec![lte(12, true), lte(13, false)]),
            location: Some(serving_location()),
            neighbors: Some(vec![neighbor(101, 201, -90)]),
            ..FakeTelephony::gsm(28)
        };
        let scanner = Scanner::new(telephony);
        let cells = scanner.scan().unwrap();

        let t = scanner.telephony();
        assert_eq!(calls(&t.location_calls), 0);
        assert_eq!(calls(&t.neighbor_calls), 1);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].physical_cell_id, Some(12));
        assert!(cells[0].is_registered);
        assert_eq!(cells[1].physical_cell_id, Some(13));
        assert_eq!(cells[2].radio, RadioType::Gsm);
        assert_eq!(cells[2].cell_id, Some(201));
    }

    #[test]
    fn legacy_sources_with_duplicate() {
        let telephony = FakeTelephony {
            unified: Unified::Unavailable,
            location: Some(serving_location()),
            neighbors: Some(vec![neighbor(100, 200, -85), neighbor(101, 201, -90)]),
            ..FakeTelephony::gsm(28)
        };
        let scanner = Scanner::new(telephony);
        let cells = scanner.scan().unwrap();

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].to_string(), "gsm,310,26,200,100,-85,-1,-1,-1,-1,0");
        assert_eq!(cells[1].to_string(), "gsm,310,26,201,101,-90,-1,-1,-1,-1,0");
        assert_eq!(calls(&scanner.telephony().location_calls), 1);
    }

    #[test]
    fn empty_unified_list_ends_scan() {
        let telephony = FakeTelephony {
            unified: Unified::List(Vec::new()),
            location: Some(serving_location()),
            neighbors: Some(vec![neighbor(101, 201, -90)]),
            ..FakeTelephony::gsm(28)
        };
        let scanner = Scanner::new(telephony);
        assert!(scanner.scan().unwrap().is_empty());

        let t = scanner.telephony();
        assert_eq!(calls(&t.location_calls), 0);
        assert_eq!(calls(&t.neighbor_calls), 0);
    }

    #[test]
    fn falls_back_when_unified_list_has_nothing() {
        for unified in [
            Unified::Nothing,
            Unified::List(vec![Observation::Gsm(ObservedCell::default()), lte(600, true)]),
        ] {
            let telephony = FakeTelephony {
                unified,
                location: Some(serving_location()),
                ..FakeTelephony::gsm(28)
            };
            let scanner = Scanner::new(telephony);
            let cells = scanner.scan().unwrap();
            assert_eq!(cells.len(), 1);
            assert_eq!(cells[0].location_area_code, Some(100));
        }
    }

    #[test]
    fn old_capability_level_uses_legacy_sources() {
        let telephony = FakeTelephony {
            unified: Unified::List(vec![lte(12, true)]),
            location: Some(CellLocation::Gsm(GsmLocation {
                lac: 100,
                cid: 200,
                psc: 33,
                dbm: -85,
            })),
            ..FakeTelephony::gsm(8)
        };
        let scanner = Scanner::new(telephony);
        let cells = scanner.scan().unwrap();

        assert_eq!(calls(&scanner.telephony().unified_calls), 0);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].physical_cell_id, None, "no psc below level 9");
    }

    #[test]
    fn binds_once() {
        let telephony = FakeTelephony {
            unified: Unified::List(vec![lte(12, true)]),
            location: Some(serving_location()),
            ..FakeTelephony::gsm(10)
        };
        let scanner = Scanner::new(telephony);
        assert!(!scanner.is_bound());
        assert!(scanner.initialize());
        assert!(scanner.initialize());
        assert!(scanner.is_bound());

        // a later upgrade does not rebind the handle
        scanner.telephony().level.store(30, Ordering::SeqCst);
        let cells = scanner.scan().unwrap();
        assert_eq!(calls(&scanner.telephony().unified_calls), 0);
        assert_eq!(cells[0].radio, RadioType::Gsm);
    }

    #[test]
    fn no_radio_means_no_cells() {
        let telephony = FakeTelephony {
            phone: PhoneType::None,
            unified: Unified::List(vec![lte(12, true)]),
            location: Some(serving_location()),
            neighbors: Some(vec![neighbor(101, 201, -90)]),
            ..FakeTelephony::gsm(28)
        };
        let scanner = Scanner::new(telephony);
        assert!(!scanner.initialize());
        assert!(scanner.scan().unwrap().is_empty());

        let t = scanner.telephony();
        assert_eq!(calls(&t.unified_calls), 0);
        assert_eq!(calls(&t.location_calls), 0);
        assert_eq!(calls(&t.neighbor_calls), 0);
    }

    #[test]
    fn unrecognized_shapes_fail_the_scan() {
        let telephony = FakeTelephony {
            unified: Unified::List(vec![lte(12, true), Observation::Unrecognized]),
            ..FakeTelephony::gsm(28)
        };
        let err = Scanner::new(telephony).scan().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedObservationVariant("cell info")));

        let telephony = FakeTelephony {
            location: Some(CellLocation::Unrecognized),
            ..FakeTelephony::gsm(28)
        };
        let err = Scanner::new(telephony).scan().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedObservationVariant("cell location")));
    }

    #[test]
    fn malformed_operator_skips_legacy_records() {
        let telephony = FakeTelephony {
            operator: Some("12".to_owned()),
            location: Some(serving_location()),
            neighbors: Some(vec![neighbor(101, 201, -90)]),
            ..FakeTelephony::gsm(28)
        };
        assert!(Scanner::new(telephony).scan().unwrap().is_empty());
    }

    #[test]
    fn neighbors_consulted_without_serving_cell() {
        let telephony = FakeTelephony {
            neighbors: Some(vec![neighbor(101, 201, 99)]),
            ..FakeTelephony::gsm(28)
        };
        let cells = Scanner::new(telephony).scan().unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].signal_dbm, None);
    }

    #[test]
    fn scans_run_one_at_a_time() {
        let telephony = FakeTelephony {
            unified: Unified::List(vec![lte(12, true)]),
            ..FakeTelephony::gsm(28)
        };
        let scanner = Scanner::new(telephony);

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| scanner.scan().unwrap());
            }
        });

        let t = scanner.telephony();
        assert_eq!(calls(&t.unified_calls), 4);
        assert_eq!(calls(&t.max_in_flight), 1);
    }

    #[test]
    fn device_identifier_falls_back_to_install_id() {
        let scanner = Scanner::new(FakeTelephony::gsm(28));
        assert_eq!(scanner.device_identifier(), "install-1");
    }
}
