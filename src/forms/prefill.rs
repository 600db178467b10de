//! Copies the record being edited into the form, once per mount.

use folio_domain::{find_by_id, PortfolioItem};
use tracing::debug;

use crate::forms::mode::EditTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefillState {
    #[default]
    Unfilled,
    /// Terminal for the lifetime of the form.
    Filled,
}

/// Whether a prefill attempt should be made at all.
pub fn should_prefill(
    target: Option<&EditTarget>,
    records: &[PortfolioItem],
    state: PrefillState,
) -> bool {
    target.is_some() && !records.is_empty() && state == PrefillState::Unfilled
}

#[derive(Debug, Default)]
pub struct PrefillCoordinator {
    state: PrefillState,
}

impl PrefillCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PrefillState {
        self.state
    }

    /// Returns the record to copy and moves to [`PrefillState::Filled`], or
    /// `None` when nothing should happen. A target with no matching record
    /// leaves the coordinator unfilled so a later list can still match.
    pub fn advance<'a>(
        &mut self,
        target: Option<&EditTarget>,
        records: &'a [PortfolioItem],
    ) -> Option<&'a PortfolioItem> {
        if !should_prefill(target, records, self.state) {
            return None;
        }
        let target = target?;
        match find_by_id(records, target.as_str()) {
            Some(record) => {
                debug!(id = %target, "prefilling form from existing record");
                self.state = PrefillState::Filled;
                Some(record)
            }
            None => {
                debug!(id = %target, records = records.len(), "no record matches edit target");
                None
            }
        }
    }
}
