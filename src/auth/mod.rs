// Gateway module for auth - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod flow;
mod session;

// Public re-exports - the ONLY way to access auth functionality
pub use flow::{route_for, AuthFlow, NavigationTarget};
pub use session::Session;
