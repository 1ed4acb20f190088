//! Multi-Step Wizard Controller
//!
//! Splits a fixed field set across sequential steps with a progress
//! indicator. Steps are `1..=total`; navigation clamps at both ends and no
//! validation gate sits between steps. Respondents may fill in any order,
//! and validation happens once at final submission.

/// Step navigation state for a multi-step collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wizard {
    current: u32,
    total: u32,
}

impl Wizard {
    /// Create a wizard with the given number of steps (at least one).
    pub fn new(total: u32) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    /// Submission is only attempted from the last step.
    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Advance one step; no-op on the last step.
    pub fn next(&mut self) {
        if self.current < self.total {
            self.current += 1;
        }
    }

    /// Go back one step; no-op on the first step. Backward motion stays
    /// possible even after the last step was reached.
    pub fn previous(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Completed fraction, for the progress bar only.
    pub fn progress(&self) -> f32 {
        self.current as f32 / self.total as f32
    }

    /// Progress rounded to whole percent.
    pub fn progress_percent(&self) -> u32 {
        (self.progress() * 100.0).round() as u32
    }

    /// Reset to the first step (after a successful submission).
    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_step() {
        let wizard = Wizard::new(7);
        assert_eq!(wizard.current(), 1);
        assert!(wizard.is_first());
        assert!(!wizard.is_last());
    }

    #[test]
    fn test_next_clamps_at_last() {
        let mut wizard = Wizard::new(2);
        wizard.next();
        assert!(wizard.is_last());
        wizard.next();
        assert_eq!(wizard.current(), 2);
    }

    #[test]
    fn test_previous_clamps_at_first() {
        let mut wizard = Wizard::new(3);
        wizard.previous();
        assert_eq!(wizard.current(), 1);
    }

    #[test]
    fn test_backward_from_last_step() {
        let mut wizard = Wizard::new(2);
        wizard.next();
        wizard.previous();
        assert_eq!(wizard.current(), 1);
    }

    #[test]
    fn test_progress() {
        let mut wizard = Wizard::new(4);
        assert_eq!(wizard.progress_percent(), 25);
        wizard.next();
        assert!((wizard.progress() - 0.5).abs() < f32::EPSILON);
        wizard.next();
        wizard.next();
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[test]
    fn test_reset() {
        let mut wizard = Wizard::new(4);
        wizard.next();
        wizard.next();
        wizard.reset();
        assert!(wizard.is_first());
    }
}
