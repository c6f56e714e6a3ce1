// Gateway module for launch - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod gate;
mod permissions;

// Public re-exports - the ONLY way to access launch functionality
pub use gate::{GatePhase, LaunchGate, Router};
pub use permissions::{
    DeclaredPermissions, PermissionCategory, PermissionOutcome, PermissionResult,
    PermissionService, BACKGROUND_LOCATION_REQUEST, BASIC_LOCATION_REQUEST,
};
