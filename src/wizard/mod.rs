//! Multi-step profile forms and the profile edit flow.

pub mod edit;
pub mod investor;
pub mod schema;
pub mod startup;

pub use edit::ProfileEditor;
pub use investor::InvestorWizard;
pub use schema::{coerce, Fallback, FieldKind, FieldSpec, FormSection};
pub use startup::StartupWizard;

/// Current position in a wizard, 1-based and clamped to `1..=total`.
///
/// Moving between steps never validates anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    current: u8,
    total: u8,
}

impl Steps {
    pub fn new(total: u8) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn next(&mut self) -> u8 {
        self.current = (self.current + 1).min(self.total);
        self.current
    }

    pub fn previous(&mut self) -> u8 {
        self.current = self.current.saturating_sub(1).max(1);
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }
}
