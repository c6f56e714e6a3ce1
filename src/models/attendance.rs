use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::office::Office;
use super::user::User;

/// Punctuality status of a single attendance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Missed,
}

/// Where the user was when the record was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationStatus {
    InOffice,
    OutOfOffice,
    Unknown,
}

/// One day's attendance record for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub user_id: String,
    pub user_name: String,
    pub office_id: String,
    pub office_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    #[serde(default = "LocationStatus::unknown")]
    pub location_status: LocationStatus,
}

impl LocationStatus {
    fn unknown() -> Self {
        Self::Unknown
    }
}

impl Attendance {
    /// Build a check-in record for a user at an office. Punctuality is
    /// decided against the office entry time at the moment of check-in.
    pub fn check_in(user: &User, office: &Office, at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.uid.clone(),
            user_name: user.name.clone(),
            office_id: office.id.clone(),
            office_name: office.name.clone(),
            date: at.date_naive(),
            check_in_time: Some(at),
            check_out_time: None,
            status: office.status_for_check_in(at.time()),
            location_status: LocationStatus::InOffice,
        }
    }

    /// Whether the record is an open check-in (no check-out yet)
    pub fn is_active(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_none()
    }

    pub fn is_on_time(&self) -> bool {
        self.status == AttendanceStatus::OnTime
    }

    pub fn is_late(&self) -> bool {
        self.status == AttendanceStatus::Late
    }

    pub fn is_missed(&self) -> bool {
        self.status == AttendanceStatus::Missed
    }

    /// Record identity: one record per user per day
    pub fn id(&self) -> String {
        format!("{}_{}", self.user_id, self.date)
    }
}
