//! Cursor-on-Target event model.
//!
//! One [`CotEvent`] is produced per member-with-location per poll cycle and
//! serialized to the CoT 2.0 XML wire form, e.g.:
//!
//! ```xml
//! <event version="2.0" uid="m-1" type="a-f-G-U-C" how="m-g"
//!        time="2024-01-15T10:30:00Z" start="2024-01-15T10:30:00Z"
//!        stale="2024-01-15T10:35:00Z">
//!     <point lat="37.7749" lon="-122.4194" hae="250" ce="9999999.0" le="9999999.0"/>
//!     <detail>...</detail>
//! </event>
//! ```

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::position::PositionReport;

/// CoT schema version.
const COT_VERSION: &str = "2.0";
/// Friendly ground unit, combatant.
const COT_TYPE: &str = "a-f-G-U-C";
/// Machine-generated GPS position.
const COT_HOW: &str = "m-g";
/// Source data carries no altitude; fixed sentinel in meters HAE.
const COT_HAE: &str = "250";
/// Circular/linear error sentinel signaling unknown precision.
const COT_UNKNOWN_ERROR: &str = "9999999.0";
/// Team color and role for the `__group` detail.
const COT_TEAM_NAME: &str = "Cyan";
const COT_TEAM_ROLE: &str = "Team Member";

/// CoT timestamp format: UTC, whole seconds.
const COT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Errors that can occur while rendering an event.
#[derive(Debug, Error)]
pub enum CotError {
    #[error("Failed to serialize event: {0}")]
    Serialize(String),
}

/// A complete CoT event, ready for XML serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "event")]
pub struct CotEvent {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@uid")]
    pub uid: String,
    #[serde(rename = "@type")]
    pub event_type: String,
    #[serde(rename = "@how")]
    pub how: String,
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "@start")]
    pub start: String,
    #[serde(rename = "@stale")]
    pub stale: String,
    pub point: CotPoint,
    pub detail: CotDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotPoint {
    #[serde(rename = "@lat")]
    pub lat: f64,
    #[serde(rename = "@lon")]
    pub lon: f64,
    #[serde(rename = "@hae")]
    pub hae: String,
    #[serde(rename = "@ce")]
    pub ce: String,
    #[serde(rename = "@le")]
    pub le: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotDetail {
    pub status: CotStatus,
    #[serde(rename = "__group")]
    pub group: CotGroup,
    pub remarks: CotRemarks,
    pub precisionlocation: CotPrecisionLocation,
    pub contact: CotContact,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotStatus {
    #[serde(rename = "@battery")]
    pub battery: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotGroup {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@role")]
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotRemarks {
    #[serde(rename = "$text")]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotPrecisionLocation {
    #[serde(rename = "@altsrc")]
    pub altsrc: String,
    #[serde(rename = "@geopointsrc")]
    pub geopointsrc: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CotContact {
    #[serde(rename = "@callsign")]
    pub callsign: String,
    #[serde(rename = "@phone")]
    pub phone: String,
}

impl CotEvent {
    /// Build the event for one position report.
    ///
    /// `now` is the cycle evaluation time; `stale_after` is the poll interval,
    /// so each event stays valid exactly until the next cycle is due.
    pub fn from_report(report: &PositionReport, now: DateTime<Utc>, stale_after: Duration) -> Self {
        let stale = now + ChronoDuration::seconds(stale_after.as_secs() as i64);

        Self {
            version: COT_VERSION.to_string(),
            uid: report.uid.clone(),
            event_type: COT_TYPE.to_string(),
            how: COT_HOW.to_string(),
            time: cot_time(now),
            start: cot_time(now),
            stale: cot_time(stale),
            point: CotPoint {
                lat: report.latitude,
                lon: report.longitude,
                hae: COT_HAE.to_string(),
                ce: COT_UNKNOWN_ERROR.to_string(),
                le: COT_UNKNOWN_ERROR.to_string(),
            },
            detail: CotDetail {
                status: CotStatus {
                    battery: report.battery.clone(),
                },
                group: CotGroup {
                    name: COT_TEAM_NAME.to_string(),
                    role: COT_TEAM_ROLE.to_string(),
                },
                remarks: CotRemarks {
                    text: format!("Circle: {}", report.circle_name),
                },
                precisionlocation: CotPrecisionLocation {
                    altsrc: "GPS".to_string(),
                    geopointsrc: "GPS".to_string(),
                },
                contact: CotContact {
                    callsign: report.callsign.clone(),
                    phone: report.phone.clone(),
                },
            },
        }
    }

    /// Render the event as CoT XML.
    pub fn to_xml(&self) -> Result<String, CotError> {
        quick_xml::se::to_string(self).map_err(|e| CotError::Serialize(e.to_string()))
    }
}

/// Format a timestamp the way CoT consumers expect.
fn cot_time(t: DateTime<Utc>) -> String {
    t.format(COT_TIME_FORMAT).to_string()
}
