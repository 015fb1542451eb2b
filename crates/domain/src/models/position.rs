//! Position report projection.
//!
//! A [`PositionReport`] is the per-cycle normalized view of one member with a
//! known location, carrying exactly what the event serializer needs. Reports
//! are rebuilt every cycle and never persisted.

use std::collections::HashSet;

use crate::models::circle::{Circle, Member, MemberLocation};

/// Normalized projection of one member's current position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    /// Source member identifier, reused as the event uid.
    pub uid: String,
    /// Display callsign: "First Last".
    pub callsign: String,
    /// Login phone with the leading country-code marker stripped.
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Source-supplied battery text, passed through verbatim.
    pub battery: String,
    /// Name of the circle the member was first seen in this cycle.
    pub circle_name: String,
}

impl PositionReport {
    /// Build a report for one member, or `None` if the member has no location.
    pub fn from_member(member: &Member, circle_name: &str) -> Option<Self> {
        let MemberLocation {
            latitude,
            longitude,
            ref battery,
        } = *member.location.as_ref()?;

        Some(Self {
            uid: member.id.clone(),
            callsign: format!("{} {}", member.first_name, member.last_name),
            phone: strip_country_marker(&member.login_phone),
            latitude,
            longitude,
            battery: battery.clone(),
            circle_name: circle_name.to_string(),
        })
    }

    /// Flatten circles into reports, in discovery order.
    ///
    /// The accumulator is keyed by member id: a member appearing in several
    /// circles produces one report, attributed to the circle they were first
    /// seen in. Members without a location are skipped.
    pub fn collect(circles: &[Circle]) -> Vec<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut reports = Vec::new();

        for circle in circles {
            for member in &circle.members {
                if member.location.is_none() || !seen.insert(member.id.as_str()) {
                    continue;
                }
                if let Some(report) = Self::from_member(member, &circle.name) {
                    reports.push(report);
                }
            }
        }

        reports
    }
}

/// The source API prefixes login phones with a country-code marker character.
fn strip_country_marker(phone: &str) -> String {
    let mut chars = phone.chars();
    chars.next();
    chars.as_str().to_string()
}
