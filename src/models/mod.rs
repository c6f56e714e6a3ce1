// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod attendance;
mod office;
mod user;

// Public re-exports - the ONLY way to access model functionality
pub use attendance::{Attendance, AttendanceStatus, LocationStatus};
pub use office::Office;
pub use user::{Role, User};
