//! Frame clock and toast timer
//!
//! The host (requestAnimationFrame, or a plain loop natively) delivers frame
//! callbacks; the clock decides whether each one may run a tick. At most one
//! frame request is outstanding, and stopping the clock revokes it, so a
//! callback that was already queued when the game ended does nothing.

/// Handle for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

/// Issues and validates frame requests
#[derive(Debug, Default)]
pub struct FrameClock {
    next_ticket: u64,
    pending: Option<FrameTicket>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any outstanding request
    pub fn request(&mut self) -> FrameTicket {
        let ticket = FrameTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        ticket
    }

    /// Consume a frame callback. False if the ticket was revoked or replaced.
    pub fn accept(&mut self, ticket: FrameTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            self.frames += 1;
            true
        } else {
            log::trace!("Dropping stale frame {:?}", ticket);
            false
        }
    }

    /// Revoke the outstanding request
    pub fn stop(&mut self) {
        self.pending = None;
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames accepted since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Single-slot auto-clear timer for milestone toasts
///
/// Arming replaces whatever was armed before, so only the newest toast's
/// clear can ever fire.
#[derive(Debug, Default)]
pub struct ToastTimer {
    armed: Option<(u64, f64)>,
}

impl ToastTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `toast_id` to clear at `deadline` (seconds)
    pub fn arm(&mut self, toast_id: u64, deadline: f64) {
        self.armed = Some((toast_id, deadline));
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Deadline of the armed clear, if any
    pub fn deadline(&self) -> Option<f64> {
        self.armed.map(|(_, deadline)| deadline)
    }

    /// Fire if due: returns the toast id to clear and disarms
    pub fn poll(&mut self, now: f64) -> Option<u64> {
        match self.armed {
            Some((id, deadline)) if now >= deadline => {
                self.armed = None;
                Some(id)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accepted_once() {
        let mut clock = FrameClock::new();
        let ticket = clock.request();
        assert!(clock.is_running());
        assert!(clock.accept(ticket));
        assert!(!clock.accept(ticket));
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_stop_revokes_pending() {
        let mut clock = FrameClock::new();
        let ticket = clock.request();
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.accept(ticket));
        assert_eq!(clock.frames(), 0);
    }

    #[test]
    fn test_new_request_replaces_old() {
        let mut clock = FrameClock::new();
        let old = clock.request();
        let new = clock.request();
        assert!(!clock.accept(old));
        assert!(clock.accept(new));
    }

    #[test]
    fn test_toast_timer_fires_at_deadline() {
        let mut timer = ToastTimer::new();
        timer.arm(1, 2.5);
        assert_eq!(timer.poll(2.4), None);
        assert_eq!(timer.poll(2.5), Some(1));
        assert_eq!(timer.poll(10.0), None);
    }

    #[test]
    fn test_toast_timer_rearm_replaces() {
        let mut timer = ToastTimer::new();
        timer.arm(1, 2.5);
        timer.arm(2, 4.0);
        assert_eq!(timer.poll(3.0), None);
        assert_eq!(timer.poll(4.0), Some(2));
    }

    #[test]
    fn test_toast_timer_cancel() {
        let mut timer = ToastTimer::new();
        timer.arm(1, 1.0);
        timer.cancel();
        assert_eq!(timer.deadline(), None);
        assert_eq!(timer.poll(5.0), None);
    }
}
