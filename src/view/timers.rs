use std::time::{Duration, Instant};

/// Quiet period after the last search keystroke before the list call
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// A single restartable deadline
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Debounce {
            delay,
            deadline: None,
        }
    }

    /// (Re)start the timer from `now`, dropping any earlier deadline
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once, on the first call at or after the deadline
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub expires_at: Instant,
}

/// Holds at most one transient notification
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    current: Option<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(NOTIFICATION_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Notifier { ttl, current: None }
    }

    /// Show `message`, replacing whatever is visible and restarting the timer
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Drop the notification once it has expired
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|n| n.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn debounce_restarts_on_schedule() {
        let t0 = Instant::now();
        let mut d = Debounce::new(SEARCH_DEBOUNCE);
        d.schedule(t0);
        d.schedule(t0 + 100 * MS);
        assert!(!d.fire(t0 + 300 * MS));
        assert!(!d.fire(t0 + 399 * MS));
        assert!(d.fire(t0 + 400 * MS));
        assert!(!d.fire(t0 + 500 * MS));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancelled_debounce_never_fires() {
        let t0 = Instant::now();
        let mut d = Debounce::new(SEARCH_DEBOUNCE);
        d.schedule(t0);
        d.cancel();
        assert!(!d.fire(t0 + 10 * SEARCH_DEBOUNCE));
    }

    #[test]
    fn notification_expires_and_resets() {
        let t0 = Instant::now();
        let mut n = Notifier::default();
        n.show("one", t0);
        n.tick(t0 + 2000 * MS);
        assert_eq!(n.message(), Some("one"));

        n.show("two", t0 + 2000 * MS);
        n.tick(t0 + 3000 * MS);
        assert_eq!(n.message(), Some("two"));
        n.tick(t0 + 4999 * MS);
        assert_eq!(n.message(), Some("two"));
        n.tick(t0 + 5000 * MS);
        assert_eq!(n.message(), None);
    }
}
