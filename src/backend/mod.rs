// Gateway module for backend - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod http;
mod traits;

// Public re-exports - the ONLY way to access backend functionality
pub use http::HttpBackend;
pub use traits::{AttendanceStore, OfficeStore, UserStore};
