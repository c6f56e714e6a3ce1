use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::attendance::AttendanceStatus;

/// An office location employees check in against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Office {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Geofence radius in meters
    pub radius: f64,
    /// Workday start, minutes from midnight
    pub start_minutes: u16,
    /// Workday end, minutes from midnight
    pub end_minutes: u16,
}

impl Office {
    /// Workday entry time as a time of day
    pub fn entry_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(
            u32::from(self.start_minutes) / 60,
            u32::from(self.start_minutes) % 60,
            0,
        )
        .unwrap_or(NaiveTime::MIN)
    }

    /// Punctuality of a check-in at the given time of day: on time
    /// strictly before the entry time, late from then on.
    pub fn status_for_check_in(&self, at: NaiveTime) -> AttendanceStatus {
        let at = at.with_nanosecond(0).unwrap_or(at);
        if at < self.entry_time() {
            AttendanceStatus::OnTime
        } else {
            AttendanceStatus::Late
        }
    }
}
