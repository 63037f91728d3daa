//! Idle debounce for the cursor marker.
//!
//! A plain deadline: every movement pushes it `delay_ms` into the future.
//! The browser driver pairs this with a `gloo` timeout that is replaced on
//! each move, then asks [`IdleTimer::is_due`] when it fires. A timeout that
//! fires early is re-armed for [`IdleTimer::remaining_ms`].

/// Debounce deadline in milliseconds of host time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleTimer {
    delay_ms: f64,
    deadline_ms: Option<f64>,
}

impl IdleTimer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: f64::from(delay_ms),
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Restart the quiet window at `now_ms`.
    pub fn rearm(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.delay_ms);
    }

    /// True once `now_ms` reaches the deadline. Disarms the timer so the
    /// transition is reported only once per quiet period.
    pub fn is_due(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            },
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Time left before the deadline, or `None` when disarmed.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.deadline_ms.map(|deadline| (deadline - now_ms).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_never_due() {
        let mut timer = IdleTimer::new(2500);
        assert!(!timer.is_due(1_000_000.0));
    }

    #[test]
    fn test_due_after_delay() {
        let mut timer = IdleTimer::new(2500);
        timer.rearm(0.0);
        assert!(!timer.is_due(2499.0));
        assert!(timer.is_due(2500.0));
        // reported once
        assert!(!timer.is_due(5000.0));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_pushes_deadline() {
        let mut timer = IdleTimer::new(2500);
        timer.rearm(0.0);
        timer.rearm(2000.0);
        assert!(!timer.is_due(3000.0));
        assert!(timer.is_due(4500.0));
    }

    #[test]
    fn test_remaining() {
        let mut timer = IdleTimer::new(2500);
        assert_eq!(timer.remaining_ms(0.0), None);
        timer.rearm(1000.0);
        assert_eq!(timer.remaining_ms(3000.0), Some(500.0));
        assert_eq!(timer.remaining_ms(9000.0), Some(0.0));
    }
}
