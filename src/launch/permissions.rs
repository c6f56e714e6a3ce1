use serde::{Deserialize, Serialize};

/// Request code used when prompting for the basic location permissions.
pub const BASIC_LOCATION_REQUEST: u32 = 123;
/// Request code used when prompting for background location separately.
pub const BACKGROUND_LOCATION_REQUEST: u32 = 124;

/// The permission categories the launch flow cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionCategory {
    /// Foreground (fine + coarse) location access
    BasicLocation,
    /// Background location access, prompted separately
    BackgroundLocation,
}

/// Outcome of a permission round-trip for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    /// The category was never prompted for (already granted, or no
    /// rationale was shown)
    NotRequested,
}

/// Result of a single permission prompt, delivered back asynchronously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResult {
    pub request_code: u32,
    pub outcomes: Vec<(PermissionCategory, PermissionOutcome)>,
}

/// Seam over the host permission state.
///
/// The `request_*` methods return whether a prompt was actually shown;
/// a shown prompt resolves later through the launch gate's
/// `on_permission_result`.
#[cfg_attr(test, mockall::automock)]
pub trait PermissionService {
    /// Check if every permission the app needs is already granted
    fn has_all_required_permissions(&self) -> bool;

    /// Check if foreground location permissions are granted
    fn has_basic_location_permissions(&self) -> bool;

    /// Check if background location permission is granted
    fn has_background_location_permission(&self) -> bool;

    /// Prompt for foreground location; returns true if a prompt was shown
    fn request_basic_location_permission(&mut self) -> bool;

    /// Prompt for background location; returns true if a prompt was shown
    fn request_background_location_permission(&mut self) -> bool;
}

/// Permission state declared in configuration.
///
/// A desktop host has no platform permission broker, so local runs stand
/// the granted set up from config. Prompts are recorded and answered when
/// the runtime asks for the pending result.
#[derive(Debug, Clone, Default)]
pub struct DeclaredPermissions {
    basic_location: bool,
    background_location: bool,
    /// Whether a prompt, once shown, is answered with a grant
    prompt_grants: bool,
    pending_request: Option<u32>,
}

impl DeclaredPermissions {
    pub fn new(basic_location: bool, background_location: bool, prompt_grants: bool) -> Self {
        Self {
            basic_location,
            background_location,
            prompt_grants,
            pending_request: None,
        }
    }

    /// Answer the outstanding prompt, if any, producing the result the
    /// platform would have delivered.
    pub fn resolve_pending(&mut self) -> Option<PermissionResult> {
        let request_code = self.pending_request.take()?;
        let outcome = if self.prompt_grants {
            PermissionOutcome::Granted
        } else {
            PermissionOutcome::Denied
        };

        let outcomes = match request_code {
            BASIC_LOCATION_REQUEST => {
                if self.prompt_grants {
                    self.basic_location = true;
                }
                vec![(PermissionCategory::BasicLocation, outcome)]
            }
            _ => {
                if self.prompt_grants {
                    self.background_location = true;
                }
                vec![(PermissionCategory::BackgroundLocation, outcome)]
            }
        };

        Some(PermissionResult {
            request_code,
            outcomes,
        })
    }
}

impl PermissionService for DeclaredPermissions {
    fn has_all_required_permissions(&self) -> bool {
        self.basic_location && self.background_location
    }

    fn has_basic_location_permissions(&self) -> bool {
        self.basic_location
    }

    fn has_background_location_permission(&self) -> bool {
        self.background_location
    }

    fn request_basic_location_permission(&mut self) -> bool {
        if self.basic_location {
            return false;
        }
        self.pending_request = Some(BASIC_LOCATION_REQUEST);
        true
    }

    fn request_background_location_permission(&mut self) -> bool {
        if self.background_location {
            return false;
        }
        self.pending_request = Some(BACKGROUND_LOCATION_REQUEST);
        true
    }
}
