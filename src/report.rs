//! The text report uploaded after a scan.
//!
//! ```text
//! #collectionDateTime
//! 1543034822177
//! #deviceId,deviceTime
//! 358511080402476,1542594634630
//! #latitude,longitude,age,accuracy,speed,bearing
//! 45.277281,-75.925078,1156,18.224,0,?
//! #Radio,Mcc,Mnc,Cid,Lac,SignalS,Level,mAsu,mTa,PscPci,isReg
//! wcdma,302,490,1323033,20,-101,-1,6,-1,400,1
//! ```
//!
//! The collection section is optional. Timestamps are unix milliseconds.

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::{RadioRecord, RadioType, HEADER},
    sentinel::Sentinel,
};

const COLLECTION_SECTION: &str = "#collectionDateTime";
const DEVICE_SECTION: &str = "#deviceId,deviceTime";
const FIX_SECTION: &str = "#latitude,longitude,age,accuracy,speed,bearing";

/// Placeholder for a fix reading the device did not have.
const MISSING: &str = "?";

/// Timing advance value written by clients that kept the platform marker.
const TA_MAX: &str = "max";

/// Last known position of the device.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    /// Seconds since the fix was taken.
    pub age: i64,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub bearing: Option<f64>,
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6},{:.6},{},{},{},{}",
            self.latitude,
            self.longitude,
            self.age,
            Optional(self.accuracy),
            Optional(self.speed),
            Optional(self.bearing),
        )
    }
}

impl FromStr for Fix {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [latitude, longitude, age, accuracy, speed, bearing] = fields[..] else {
            bail!("expected 6 fields in fix line: {line}");
        };

        let optional = |x: &str| -> Result<Option<f64>> {
            if x == MISSING {
                Ok(None)
            } else {
                Ok(Some(x.parse().with_context(|| format!("invalid number {x:?}"))?))
            }
        };

        Ok(Fix {
            latitude: latitude.parse().context("invalid latitude")?,
            longitude: longitude.parse().context("invalid longitude")?,
            age: age.parse().context("invalid fix age")?,
            accuracy: optional(accuracy)?,
            speed: optional(speed)?,
            bearing: optional(bearing)?,
        })
    }
}

struct Optional(Option<f64>);

impl fmt::Display for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(x) => write!(f, "{x}"),
            None => f.write_str(MISSING),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub collected_at: Option<DateTime<Utc>>,
    pub device_id: String,
    pub device_time: DateTime<Utc>,
    pub fix: Fix,
    pub cells: Vec<RadioRecord>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(collected_at) = self.collected_at {
            writeln!(f, "{COLLECTION_SECTION}")?;
            writeln!(f, "{}", collected_at.timestamp_millis())?;
        }
        writeln!(f, "{DEVICE_SECTION}")?;
        writeln!(f, "{},{}", self.device_id, self.device_time.timestamp_millis())?;
        writeln!(f, "{FIX_SECTION}")?;
        writeln!(f, "{}", self.fix)?;
        write!(f, "#{HEADER}")?;
        for cell in &self.cells {
            write!(f, "\n{cell}")?;
        }
        Ok(())
    }
}

impl FromStr for Report {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().map(str::trim).filter(|x| !x.is_empty());

        let mut section = lines.next().context("empty report")?;
        let collected_at = if section == COLLECTION_SECTION {
            let value = lines.next().context("missing collection time")?;
            section = lines.next().context("missing device section")?;
            Some(parse_millis(value)?)
        } else {
            None
        };

        expect_section(Some(section), DEVICE_SECTION)?;
        let device = lines.next().context("missing device line")?;
        let (device_id, device_time) = device
            .rsplit_once(',')
            .with_context(|| format!("malformed device line: {device}"))?;

        expect_section(lines.next(), FIX_SECTION)?;
        let fix = lines.next().context("missing fix line")?;
        let fix = fix.parse().with_context(|| format!("malformed fix line: {fix}"))?;

        expect_section(lines.next(), &format!("#{HEADER}"))?;
        let cells = parse_cells(&lines.collect::<Vec<_>>())?;

        Ok(Report {
            collected_at,
            device_id: device_id.to_owned(),
            device_time: parse_millis(device_time)?,
            fix,
            cells,
        })
    }
}

fn expect_section(line: Option<&str>, section: &str) -> Result<()> {
    match line {
        Some(x) if x == section => Ok(()),
        Some(x) => bail!("expected {section}, found {x}"),
        None => bail!("missing {section}"),
    }
}

fn parse_millis(value: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid timestamp {value:?}"))?;
    DateTime::from_timestamp_millis(millis).with_context(|| format!("timestamp out of range: {millis}"))
}

/// Cell line in [`HEADER`] order.
#[derive(Debug, Deserialize)]
struct CellLine(
    RadioType,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    String,
    i32,
    u8,
);

impl CellLine {
    fn into_record(self) -> Result<RadioRecord> {
        let CellLine(radio, mcc, mnc, cid, lac, signal, level, asu, ta, psc, registered) = self;
        let plain = |x| Sentinel::Plain.decode(x);

        let timing_advance = match ta.as_str() {
            TA_MAX => None,
            x => plain(x.parse().with_context(|| format!("invalid timing advance {x:?}"))?),
        };

        Ok(RadioRecord {
            radio,
            mcc: plain(mcc),
            mnc: plain(mnc),
            cell_id: plain(cid),
            location_area_code: plain(lac),
            signal_dbm: Sentinel::SignalStrength.decode(signal),
            simple_level: plain(level),
            asu: plain(asu),
            timing_advance,
            physical_cell_id: plain(psc),
            is_registered: registered != 0,
        })
    }
}

fn parse_cells(lines: &[&str]) -> Result<Vec<RadioRecord>> {
    let body = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(body.as_bytes());

    let mut cells = Vec::with_capacity(lines.len());
    for (i, result) in reader.deserialize::<CellLine>().enumerate() {
        let line = lines.get(i).copied().unwrap_or_default();
        let cell = result
            .map_err(Error::from)
            .and_then(CellLine::into_record)
            .with_context(|| format!("malformed cell line: {line}"))?;
        cells.push(cell);
    }
    Ok(cells)
}
