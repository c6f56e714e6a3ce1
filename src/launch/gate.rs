use tracing::debug;

use super::permissions::{PermissionResult, PermissionService};

/// Observable phase of the launch gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Waiting on the minimum-display timer and/or a permission prompt
    Pending,
    /// Both completion sources satisfied; about to hand off
    Ready,
    /// The forward navigation has fired; all further signals are ignored
    Proceeded,
    /// The launch screen was torn down before completion
    Closed,
}

/// Sink for the single forward-navigation event
#[cfg_attr(test, mockall::automock)]
pub trait Router {
    /// Leave the launch screen. Called at most once per gate.
    fn proceed(&mut self);
}

/// Coordinates the minimum splash-display timer with the asynchronous
/// permission round-trip, and fires `Router::proceed` exactly once when
/// both are satisfied.
///
/// Single-threaded by construction: the gate lives on the event-loop task
/// and both callbacks are delivered there, so two booleans and a shared
/// proceed-check suffice. Ordering between the timer and the permission
/// result is not guaranteed; either callback may arrive first.
pub struct LaunchGate<R: Router> {
    router: R,
    phase: GatePhase,
    timer_elapsed: bool,
    permission_flow_active: bool,
}

impl<R: Router> LaunchGate<R> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            phase: GatePhase::Pending,
            timer_elapsed: false,
            permission_flow_active: false,
        }
    }

    /// Query current permission state and issue a prompt if needed.
    ///
    /// If everything is already granted the permission dimension resolves
    /// immediately and only the timer gates progress. Otherwise basic
    /// location is prompted first; background location only once basic is
    /// in place. The flow counts as active only if a prompt was actually
    /// shown.
    pub fn begin(&mut self, permissions: &mut dyn PermissionService) {
        if self.phase != GatePhase::Pending {
            return;
        }

        if permissions.has_all_required_permissions() {
            debug!("all permissions granted, gating on timer only");
        } else if !permissions.has_basic_location_permissions() {
            self.permission_flow_active = permissions.request_basic_location_permission();
        } else if !permissions.has_background_location_permission() {
            self.permission_flow_active = permissions.request_background_location_permission();
        }
    }

    /// The minimum-display timer has elapsed.
    pub fn on_timer_elapsed(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.timer_elapsed = true;
        self.try_proceed();
    }

    /// A permission prompt has resolved. Denial resolves the flow just
    /// like a grant; the gate waits on the round-trip, not on consent.
    pub fn on_permission_result(&mut self, result: PermissionResult) {
        if self.is_terminal() {
            return;
        }
        debug!(request_code = result.request_code, "permission flow resolved");
        self.permission_flow_active = false;
        self.try_proceed();
    }

    /// Tear the launch screen down. Later timer or permission signals
    /// become no-ops and `proceed` never fires.
    pub fn close(&mut self) {
        if self.phase != GatePhase::Proceeded {
            self.phase = GatePhase::Closed;
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn has_proceeded(&self) -> bool {
        self.phase == GatePhase::Proceeded
    }

    fn is_terminal(&self) -> bool {
        matches!(self.phase, GatePhase::Proceeded | GatePhase::Closed)
    }

    fn try_proceed(&mut self) {
        if self.timer_elapsed && !self.permission_flow_active {
            self.phase = GatePhase::Ready;
            self.router.proceed();
            self.phase = GatePhase::Proceeded;
        }
    }
}
