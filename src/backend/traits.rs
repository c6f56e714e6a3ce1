use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Attendance, Office, User};

/// Data access for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Authenticate and return the account profile
    async fn login(&self, email: &str, password: &str) -> Result<User>;

    /// Create a new employee account; it starts unapproved
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        office_id: &str,
    ) -> Result<User>;

    /// Fetch the profile for a user id
    async fn get_profile(&self, uid: &str) -> Result<User>;

    /// List employee accounts, optionally restricted to one office
    async fn list_employees(&self, office_id: Option<&str>) -> Result<Vec<User>>;
}

/// Data access for office locations
#[async_trait]
pub trait OfficeStore: Send + Sync {
    /// All offices registered on the backend
    async fn list_offices(&self) -> Result<Vec<Office>>;

    /// Fetch one office by id
    async fn get_office(&self, office_id: &str) -> Result<Office>;
}

/// Data access for attendance records
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Persist a check-in record; returns the stored record
    async fn check_in(&self, record: &Attendance) -> Result<Attendance>;

    /// Stamp the check-out time on the user's open record for today;
    /// errors if there is nothing to check out of
    async fn check_out(&self, uid: &str) -> Result<Attendance>;

    /// The user's open record for a date (checked in, not checked out)
    async fn active_for_user(&self, uid: &str, date: NaiveDate) -> Result<Option<Attendance>>;

    /// Most recent attendance records for a user, newest first
    async fn recent_for_user(&self, uid: &str, limit: usize) -> Result<Vec<Attendance>>;
}
