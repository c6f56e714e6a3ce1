use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

use chrono::NaiveDate;

use super::traits::{AttendanceStore, OfficeStore, UserStore};
use crate::app::Config;
use crate::models::{Attendance, Office, User};
use crate::utils::AttendifyError;

/// HTTP client for the attendance backend (JSON over REST)
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.backend.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl UserStore for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Login request failed")?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AttendifyError::AuthError("Invalid email or password".into()).into());
        }

        let user = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<User>()
            .await
            .context("Malformed login response")?;

        Ok(user)
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        office_id: &str,
    ) -> Result<User> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "role": "employee",
                "officeId": office_id,
            }))
            .send()
            .await
            .context("Registration request failed")?;

        if response.status() == StatusCode::CONFLICT {
            return Err(
                AttendifyError::AuthError("An account with this email already exists".into())
                    .into(),
            );
        }

        let user = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<User>()
            .await
            .context("Malformed registration response")?;

        Ok(user)
    }

    async fn get_profile(&self, uid: &str) -> Result<User> {
        let response = self
            .client
            .get(self.url(&format!("/users/{uid}")))
            .send()
            .await
            .context("Profile request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AttendifyError::ApiError(format!("No such user: {uid}")).into());
        }

        let user = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<User>()
            .await
            .context("Malformed profile response")?;

        Ok(user)
    }

    async fn list_employees(&self, office_id: Option<&str>) -> Result<Vec<User>> {
        let mut request = self
            .client
            .get(self.url("/users"))
            .query(&[("role", "employee")]);

        if let Some(office_id) = office_id {
            request = request.query(&[("officeId", office_id)]);
        }

        let employees = request
            .send()
            .await
            .context("Employee list request failed")?
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Vec<User>>()
            .await
            .context("Malformed employee list response")?;

        Ok(employees)
    }
}

#[async_trait]
impl OfficeStore for HttpBackend {
    async fn list_offices(&self) -> Result<Vec<Office>> {
        let offices = self
            .client
            .get(self.url("/offices"))
            .send()
            .await
            .context("Office list request failed")?
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Vec<Office>>()
            .await
            .context("Malformed office list response")?;

        Ok(offices)
    }

    async fn get_office(&self, office_id: &str) -> Result<Office> {
        let response = self
            .client
            .get(self.url(&format!("/offices/{office_id}")))
            .send()
            .await
            .context("Office request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AttendifyError::ApiError(format!("No such office: {office_id}")).into());
        }

        let office = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Office>()
            .await
            .context("Malformed office response")?;

        Ok(office)
    }
}

#[async_trait]
impl AttendanceStore for HttpBackend {
    async fn check_in(&self, record: &Attendance) -> Result<Attendance> {
        let response = self
            .client
            .post(self.url(&format!("/users/{}/attendance", record.user_id)))
            .json(record)
            .send()
            .await
            .context("Check-in request failed")?;

        if response.status() == StatusCode::CONFLICT {
            return Err(AttendifyError::ApiError("Already checked in today".into()).into());
        }

        let stored = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Attendance>()
            .await
            .context("Malformed check-in response")?;

        Ok(stored)
    }

    async fn check_out(&self, uid: &str) -> Result<Attendance> {
        let response = self
            .client
            .post(self.url(&format!("/users/{uid}/attendance/check-out")))
            .send()
            .await
            .context("Check-out request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(
                AttendifyError::ApiError("No open check-in to check out of".into()).into(),
            );
        }

        let stored = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Attendance>()
            .await
            .context("Malformed check-out response")?;

        Ok(stored)
    }

    async fn active_for_user(&self, uid: &str, date: NaiveDate) -> Result<Option<Attendance>> {
        let response = self
            .client
            .get(self.url(&format!("/users/{uid}/attendance/active")))
            .query(&[("date", date.to_string())])
            .send()
            .await
            .context("Active attendance request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record = response
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Attendance>()
            .await
            .context("Malformed active attendance response")?;

        Ok(Some(record))
    }

    async fn recent_for_user(&self, uid: &str, limit: usize) -> Result<Vec<Attendance>> {
        let records = self
            .client
            .get(self.url(&format!("/users/{uid}/attendance")))
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .context("Attendance request failed")?
            .error_for_status()
            .map_err(AttendifyError::NetworkError)?
            .json::<Vec<Attendance>>()
            .await
            .context("Malformed attendance response")?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = Config::default();
        config.backend.base_url = "http://localhost:8080/".into();
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.url("/users"), "http://localhost:8080/users");
    }
}
