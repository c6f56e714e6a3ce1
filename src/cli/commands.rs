use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::{
    app::init_config,
    auth::{route_for, AuthFlow, NavigationTarget, Session},
    backend::{AttendanceStore, HttpBackend, OfficeStore, UserStore},
    models::Attendance,
    utils::AttendifyError,
};

use super::Commands;

/// Handle CLI subcommands once the launch sequence has completed
pub async fn handle_command(
    command: &Commands,
    backend: &HttpBackend,
    session: &mut Session,
) -> Result<()> {
    match command {
        Commands::Init => {
            println!("Initializing Attendify configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(())
        }
        Commands::Login { email, password } => login(backend, session, email, password).await,
        Commands::Register {
            name,
            email,
            password,
            office,
        } => register(backend, session, name, email, password, office).await,
        Commands::Logout => {
            session.clear();
            session.save()?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Status => show_status(backend, session).await,
        Commands::Employees { office } => list_employees(backend, office.as_deref()).await,
        Commands::Attendance { limit } => show_attendance(backend, session, *limit).await,
        Commands::CheckIn { office } => {
            let uid = require_sign_in(session)?;
            let record =
                perform_check_in(backend, backend, backend, uid, office.as_deref(), Utc::now())
                    .await?;
            let status = if record.is_on_time() {
                "on time".green()
            } else {
                "late".yellow()
            };
            println!("Checked in at {} ({})", record.office_name, status);
            Ok(())
        }
        Commands::CheckOut => {
            let uid = require_sign_in(session)?;
            let record = backend.check_out(uid).await?;
            println!("Checked out of {}.", record.office_name);
            Ok(())
        }
        Commands::Offices => list_offices(backend).await,
    }
}

/// Check in the signed-in user: resolve the office (explicit id or the
/// account's own), refuse a second open check-in for the day, then
/// persist the record with punctuality decided at this instant.
async fn perform_check_in(
    users: &dyn UserStore,
    offices: &dyn OfficeStore,
    attendance: &dyn AttendanceStore,
    uid: &str,
    office_override: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Attendance> {
    let user = users.get_profile(uid).await?;

    let office_id = match office_override {
        Some(id) => id.to_string(),
        None => user.office_id.clone().ok_or_else(|| {
            AttendifyError::ApiError("Account has no office; pass --office".into())
        })?,
    };
    let office = offices.get_office(&office_id).await?;

    if attendance.active_for_user(uid, now.date_naive()).await?.is_some() {
        return Err(AttendifyError::ApiError("Already checked in today".into()).into());
    }

    let record = Attendance::check_in(&user, &office, now);
    attendance.check_in(&record).await
}

fn require_sign_in(session: &Session) -> Result<&str> {
    session
        .uid
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Not signed in. Run `attendify login` first."))
}

async fn login(
    backend: &HttpBackend,
    session: &mut Session,
    email: &str,
    password: &str,
) -> Result<()> {
    let flow = AuthFlow::new(backend);
    let (user, target) = flow.sign_in(email, password).await?;

    session.set_user(&user);
    session.save()?;

    println!("Signed in as {}", user.name.green());
    print_target(target);
    Ok(())
}

async fn register(
    backend: &HttpBackend,
    session: &mut Session,
    name: &str,
    email: &str,
    password: &str,
    office: &str,
) -> Result<()> {
    let flow = AuthFlow::new(backend);
    let (user, target) = flow.register(name, email, password, office).await?;

    session.set_user(&user);
    session.save()?;

    println!("Registered {}", user.email.green());
    print_target(target);
    Ok(())
}

/// Show the signed-in account and its navigation target
async fn show_status(backend: &HttpBackend, session: &Session) -> Result<()> {
    println!("Attendify Status:");
    println!();

    match &session.uid {
        Some(uid) => {
            let user = backend.get_profile(uid).await?;
            println!("  [OK] Signed in: {} <{}>", user.name, user.email);
            println!("  Role: {}", user.role.as_str());
            print_target(route_for(&user));
        }
        None => {
            println!("  [WARNING] Not signed in");
            print_target(NavigationTarget::Auth);
        }
    }

    Ok(())
}

async fn list_employees(backend: &HttpBackend, office: Option<&str>) -> Result<()> {
    let employees = backend.list_employees(office).await?;

    if employees.is_empty() {
        println!("No employees found.");
        return Ok(());
    }

    println!("Employees ({}):", employees.len());
    for employee in &employees {
        let approval = if employee.approved {
            "approved".green()
        } else {
            "pending".yellow()
        };
        println!("  • {} <{}> [{}]", employee.name, employee.email, approval);
    }
    Ok(())
}

async fn list_offices(backend: &HttpBackend) -> Result<()> {
    let offices = backend.list_offices().await?;

    if offices.is_empty() {
        println!("No offices registered.");
        return Ok(());
    }

    println!("Offices ({}):", offices.len());
    for office in &offices {
        println!(
            "  • {} [{}] opens {}",
            office.name,
            office.id,
            office.entry_time().format("%H:%M")
        );
    }
    Ok(())
}

async fn show_attendance(backend: &HttpBackend, session: &Session, limit: usize) -> Result<()> {
    let uid = require_sign_in(session)?;

    let records = backend.recent_for_user(uid, limit).await?;

    if records.is_empty() {
        println!("No attendance records.");
        return Ok(());
    }

    println!("Recent attendance:");
    for record in &records {
        let status = if record.is_on_time() {
            "OnTime".green()
        } else if record.is_late() {
            "Late".yellow()
        } else {
            "Missed".red()
        };
        println!("  {} @ {}: {}", record.date, record.office_name, status);
    }
    Ok(())
}

fn print_target(target: NavigationTarget) {
    let description = match target {
        NavigationTarget::Auth => "sign in required",
        NavigationTarget::PendingApproval => "account pending approval",
        NavigationTarget::AdminDashboard => "admin dashboard",
        NavigationTarget::EmployeeDashboard => "employee dashboard",
    };
    println!("  Routes to: {description}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, Office, Role, User};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct FakeBackend {
        user: User,
        office: Office,
        active: Option<Attendance>,
        stored: Mutex<Vec<Attendance>>,
    }

    impl FakeBackend {
        fn new(user: User, office: Office) -> Self {
            Self {
                user,
                office,
                active: None,
                stored: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserStore for FakeBackend {
        async fn login(&self, _email: &str, _password: &str) -> Result<User> {
            Ok(self.user.clone())
        }

        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
            _office_id: &str,
        ) -> Result<User> {
            Ok(self.user.clone())
        }

        async fn get_profile(&self, _uid: &str) -> Result<User> {
            Ok(self.user.clone())
        }

        async fn list_employees(&self, _office_id: Option<&str>) -> Result<Vec<User>> {
            Ok(vec![self.user.clone()])
        }
    }

    #[async_trait]
    impl OfficeStore for FakeBackend {
        async fn list_offices(&self) -> Result<Vec<Office>> {
            Ok(vec![self.office.clone()])
        }

        async fn get_office(&self, office_id: &str) -> Result<Office> {
            if office_id == self.office.id {
                Ok(self.office.clone())
            } else {
                Err(AttendifyError::ApiError(format!("No such office: {office_id}")).into())
            }
        }
    }

    #[async_trait]
    impl AttendanceStore for FakeBackend {
        async fn check_in(&self, record: &Attendance) -> Result<Attendance> {
            self.stored.lock().unwrap().push(record.clone());
            Ok(record.clone())
        }

        async fn check_out(&self, _uid: &str) -> Result<Attendance> {
            self.active
                .clone()
                .ok_or_else(|| AttendifyError::ApiError("No open check-in".into()).into())
        }

        async fn active_for_user(
            &self,
            _uid: &str,
            _date: NaiveDate,
        ) -> Result<Option<Attendance>> {
            Ok(self.active.clone())
        }

        async fn recent_for_user(&self, _uid: &str, _limit: usize) -> Result<Vec<Attendance>> {
            Ok(self.stored.lock().unwrap().clone())
        }
    }

    fn employee() -> User {
        let mut user = User::new(
            "u1".into(),
            "Ada".into(),
            "ada@example.com".into(),
            Role::Employee,
            "office-1".into(),
        );
        user.approved = true;
        user
    }

    fn hq() -> Office {
        Office {
            id: "office-1".into(),
            name: "HQ".into(),
            address: None,
            latitude: 0.0,
            longitude: 0.0,
            radius: 100.0,
            start_minutes: 9 * 60,
            end_minutes: 17 * 60,
        }
    }

    #[tokio::test]
    async fn test_check_in_defaults_to_account_office() {
        let backend = FakeBackend::new(employee(), hq());
        let early = Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap();

        let record = perform_check_in(&backend, &backend, &backend, "u1", None, early)
            .await
            .unwrap();

        assert_eq!(record.office_id, "office-1");
        assert_eq!(record.status, AttendanceStatus::OnTime);
        assert_eq!(backend.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_check_in_after_entry_time_is_late() {
        let backend = FakeBackend::new(employee(), hq());
        let late = Utc.with_ymd_and_hms(2025, 6, 2, 9, 20, 0).unwrap();

        let record = perform_check_in(&backend, &backend, &backend, "u1", None, late)
            .await
            .unwrap();

        assert_eq!(record.status, AttendanceStatus::Late);
    }

    #[tokio::test]
    async fn test_check_in_refuses_second_open_record() {
        let mut backend = FakeBackend::new(employee(), hq());
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap();
        backend.active = Some(Attendance::check_in(&employee(), &hq(), now));

        let result = perform_check_in(&backend, &backend, &backend, "u1", None, now).await;

        assert!(result.is_err());
        assert!(backend.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_in_rejects_unknown_office_override() {
        let backend = FakeBackend::new(employee(), hq());
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap();

        let result =
            perform_check_in(&backend, &backend, &backend, "u1", Some("nowhere"), now).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_check_in_without_office_on_account_requires_flag() {
        let mut user = employee();
        user.office_id = None;
        let backend = FakeBackend::new(user, hq());
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap();

        let result = perform_check_in(&backend, &backend, &backend, "u1", None, now).await;
        assert!(result.is_err());

        let result =
            perform_check_in(&backend, &backend, &backend, "u1", Some("office-1"), now).await;
        assert!(result.is_ok());
    }
}
