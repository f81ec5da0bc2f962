use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use tracing::{info, warn};

use crate::ids::IdKind;
use crate::level::Level;

use super::interval::IntervalSet;
use super::plan::RemapPlan;
use super::{RemapError, RemapReport};

/// Dense `1..=N` renumbering of the used, non-ignored values, in ascending
/// order of the old value, plus the ignored values that stay where they are.
fn compaction_map(used: BTreeSet<u32>, ignored: &IntervalSet) -> (HashMap<u32, u32>, Vec<u32>) {
    let (kept, moving): (Vec<u32>, Vec<u32>) =
        used.into_iter().partition(|value| ignored.contains(*value));
    (moving.into_iter().zip(1u32..).collect(), kept)
}

impl Level {
    /// Renumbers every used `kind` ID to a dense sequence starting at 1,
    /// preserving order. Values covered by `ignored_ranges` (half-open) keep
    /// their value and take no slot in the sequence.
    pub fn compactly_reallocate_ids(
        &mut self,
        kind: IdKind,
        ignored_ranges: &[Range<u32>],
    ) -> Result<RemapReport, RemapError> {
        let ignored = IntervalSet::normalize(ignored_ranges.iter().cloned());
        self.compactly_reallocate_ids_excluding(kind, &ignored)
    }

    pub fn compactly_reallocate_ids_excluding(
        &mut self,
        kind: IdKind,
        ignored: &IntervalSet,
    ) -> Result<RemapReport, RemapError> {
        let (mapping, kept) = compaction_map(self.used_ids(kind), ignored);
        if mapping.is_empty() {
            return Ok(RemapReport::empty(kind));
        }

        let assigned = mapping.len() as u32;
        if let Some(kept) = kept.into_iter().find(|value| *value <= assigned) {
            let error = RemapError::IgnoredIdCollision { kind, value: kept };
            warn!(kind = %kind, assigned, error = %error, "id_compaction_rejected");
            return Err(error);
        }

        let plan = RemapPlan::snapshot(self, kind, |old| mapping.get(&old).copied());
        if let Err(error) = plan.validate(self) {
            warn!(kind = %kind, assigned, error = %error, "id_compaction_rejected");
            return Err(error);
        }
        let report = plan.apply(self)?;
        info!(
            kind = %kind,
            assigned,
            ignored_spans = ignored.spans().len(),
            rewritten_values = report.rewritten_values,
            rewritten_pointers = report.rewritten_pointers,
            relocated_channels = report.relocated_channels,
            "id_compaction_applied"
        );
        Ok(report)
    }
}
