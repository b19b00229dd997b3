//! Debounced auto-save bookkeeping for editor documents.
//!
//! The manager never writes anything itself. The editor marks it dirty on
//! every recorded edit (undo and redo included) and asks it whether a save
//! is due; the caller performs the write and reports the result back.

use std::time::Duration;
use web_time::Instant;

use crate::error::DocumentError;

/// Tracks unsaved edits and decides when a save is due.
///
/// Two timers gate a save:
/// 1. **Debounce delay**: quiet time required after the latest edit, so a
///    burst of clicks produces one save.
/// 2. **Minimum interval**: time required since the previous save attempt,
///    successful or not.
#[derive(Debug)]
pub struct AutoSaveManager {
    save_interval: Duration,
    debounce_delay: Duration,
    /// Time of the last save attempt
    last_save: Option<Instant>,
    /// Time of the latest unsaved edit
    last_change: Option<Instant>,
    enabled: bool,
    /// Edits since the last successful save
    pending_changes: usize,
    /// Consecutive failed saves
    failures: usize,
}

impl AutoSaveManager {
    /// Default minimum interval between saves.
    pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(30);

    /// Default quiet time after the latest edit.
    pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self {
            save_interval: Self::DEFAULT_SAVE_INTERVAL,
            debounce_delay: Self::DEFAULT_DEBOUNCE_DELAY,
            last_save: None,
            last_change: None,
            enabled: true,
            pending_changes: 0,
            failures: 0,
        }
    }

    /// A manager that tracks edits but never asks for a save.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn with_save_interval(mut self, interval: Duration) -> Self {
        self.save_interval = interval;
        self
    }

    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Note an edit that needs saving.
    pub fn mark_dirty(&mut self) {
        self.pending_changes += 1;
        self.last_change = Some(Instant::now());
        log::trace!("Auto-save: {} unsaved edits", self.pending_changes);
    }

    pub fn is_dirty(&self) -> bool {
        self.pending_changes > 0
    }

    /// Edits since the last successful save.
    pub fn pending_changes(&self) -> usize {
        self.pending_changes
    }

    /// Consecutive failed save attempts.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Check whether a save is due now.
    pub fn should_save(&self) -> bool {
        if !self.enabled || !self.is_dirty() {
            return false;
        }
        let Some(last_change) = self.last_change else {
            return false;
        };
        if last_change.elapsed() < self.debounce_delay {
            return false;
        }
        self.last_save
            .is_none_or(|last_save| last_save.elapsed() >= self.save_interval)
    }

    /// Record a successful save.
    pub fn mark_saved(&mut self) {
        self.last_save = Some(Instant::now());
        self.last_change = None;
        self.pending_changes = 0;
        self.failures = 0;
        log::trace!("Auto-save: saved");
    }

    /// Record a failed save. Edits stay pending and the next attempt waits
    /// a full interval.
    pub fn mark_save_failed(&mut self) {
        self.last_save = Some(Instant::now());
        self.failures += 1;
        log::trace!("Auto-save: attempt failed ({} in a row)", self.failures);
    }

    /// Record the result of a save the caller performed.
    pub fn report(&mut self, result: &Result<(), DocumentError>) {
        match result {
            Ok(()) => self.mark_saved(),
            Err(e) => {
                log::warn!("Auto-save failed: {}", e);
                self.mark_save_failed();
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Forget all edits and timings, e.g. after loading a document.
    pub fn reset(&mut self) {
        self.last_save = None;
        self.last_change = None;
        self.pending_changes = 0;
        self.failures = 0;
    }
}

impl Default for AutoSaveManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn immediate() -> AutoSaveManager {
        AutoSaveManager::new()
            .with_debounce_delay(Duration::ZERO)
            .with_save_interval(Duration::ZERO)
    }

    #[test]
    fn test_initial_state() {
        let manager = AutoSaveManager::new();
        assert!(!manager.is_dirty());
        assert!(!manager.should_save());
        assert!(manager.is_enabled());
    }

    #[test]
    fn test_counts_edits_until_saved() {
        let mut manager = immediate();
        manager.mark_dirty();
        manager.mark_dirty();
        assert_eq!(manager.pending_changes(), 2);
        assert!(manager.should_save());

        manager.report(&Ok(()));
        assert!(!manager.is_dirty());
        assert!(!manager.should_save());
    }

    #[test]
    fn test_failed_save_keeps_edits() {
        let mut manager = immediate();
        manager.mark_dirty();
        manager.report(&Err(DocumentError::Storage("quota".to_string())));
        assert!(manager.is_dirty());
        assert_eq!(manager.failures(), 1);
        assert!(manager.should_save());
    }

    #[test]
    fn test_disabled() {
        let mut manager = AutoSaveManager::disabled();
        manager.mark_dirty();
        assert!(manager.is_dirty());
        assert!(!manager.should_save());
    }

    #[test]
    fn test_debounce_prevents_immediate_save() {
        let mut manager = AutoSaveManager::new()
            .with_debounce_delay(Duration::from_secs(10))
            .with_save_interval(Duration::ZERO);
        manager.mark_dirty();
        assert!(!manager.should_save());
    }

    #[test]
    fn test_interval_gates_following_saves() {
        let mut manager = AutoSaveManager::new()
            .with_debounce_delay(Duration::ZERO)
            .with_save_interval(Duration::from_secs(60));
        manager.mark_dirty();
        assert!(manager.should_save());
        manager.mark_saved();
        manager.mark_dirty();
        assert!(!manager.should_save());
    }
}
