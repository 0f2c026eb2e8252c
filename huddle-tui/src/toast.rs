use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
}

/// Transient notifications, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.push_at(message, level, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, level: ToastLevel, created_at: Instant) {
        let message = message.into();
        log::debug!("toast [{:?}] {}", level, message);
        self.toasts.push(Toast {
            message,
            level,
            created_at,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Error);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Info);
    }

    /// Drop toasts older than [`TOAST_LIFETIME`]
    pub fn clear_expired(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < TOAST_LIFETIME);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_after_lifetime() {
        let start = Instant::now();
        let mut queue = ToastQueue::default();
        queue.push_at("first", ToastLevel::Info, start);
        queue.push_at("second", ToastLevel::Error, start + Duration::from_secs(2));

        queue.clear_expired(start + Duration::from_millis(2_999));
        assert_eq!(queue.toasts().len(), 2);

        queue.clear_expired(start + Duration::from_secs(3));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.latest().unwrap().message, "second");
        assert_eq!(queue.latest().unwrap().level, ToastLevel::Error);

        queue.clear_expired(start + Duration::from_secs(10));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_helpers_set_levels() {
        let mut queue = ToastQueue::default();
        queue.info("a");
        queue.success("b");
        queue.warning("c");
        queue.error("d");

        let levels: Vec<_> = queue.toasts().iter().map(|t| t.level).collect();
        assert_eq!(
            levels,
            vec![ToastLevel::Info, ToastLevel::Success, ToastLevel::Warning, ToastLevel::Error]
        );
        assert_eq!(queue.latest().unwrap().message, "d");
    }
}
