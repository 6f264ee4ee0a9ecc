//! Back/forward history of displayed names, fed from fragment changes.

#[derive(Debug, Default)]
pub struct NavHistory {
    back: Vec<String>,
    forward: Vec<String>,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly displayed name. Sub-element nicknames (containing `_`)
    /// and repeats of the latest record are skipped.
    pub fn record(&mut self, displayed: &str) -> bool {
        if displayed.is_empty() || displayed.contains('_') {
            return false;
        }
        if self.back.last().is_some_and(|last| last == displayed) {
            return false;
        }
        self.back.push(displayed.to_string());
        true
    }

    /// Step back: the current entry moves to the forward stack and the
    /// previous one is returned for display.
    pub fn go_back(&mut self) -> Option<String> {
        if !self.can_go_back() {
            return None;
        }
        let current = self.back.pop()?;
        self.forward.push(current);
        let target = self.back.last().cloned();
        log::debug!("[history] back -> {target:?}");
        target
    }

    pub fn go_forward(&mut self) -> Option<String> {
        let target = self.forward.pop()?;
        log::debug!("[history] forward -> {target}");
        Some(target)
    }

    pub fn can_go_back(&self) -> bool {
        self.back.len() > 1
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.back.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_nicknames_and_repeats() {
        let mut h = NavHistory::new();
        assert!(h.record("New York"));
        assert!(!h.record("New York"));
        assert!(!h.record("li01_01_base"));
        assert!(!h.can_go_back());
        assert_eq!(h.current(), Some("New York"));
    }

    #[test]
    fn back_then_forward() {
        let mut h = NavHistory::new();
        h.record("New York");
        h.record("Texas");
        h.record("Colorado");

        assert_eq!(h.go_back().as_deref(), Some("Texas"));
        // displaying Texas re-records it, which the dedupe ignores
        assert!(!h.record("Texas"));
        assert!(h.can_go_forward());

        assert_eq!(h.go_back().as_deref(), Some("New York"));
        assert!(!h.can_go_back());
        assert_eq!(h.go_back(), None);

        assert_eq!(h.go_forward().as_deref(), Some("Texas"));
        h.record("Texas");
        assert_eq!(h.go_forward().as_deref(), Some("Colorado"));
        h.record("Colorado");
        assert!(!h.can_go_forward());
        assert_eq!(h.current(), Some("Colorado"));
    }
}
