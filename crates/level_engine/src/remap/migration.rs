use tracing::{info, warn};

use crate::ids::IdKind;
use crate::level::Level;

use super::plan::RemapPlan;
use super::range::SourceTargetRange;
use super::{RemapError, RemapReport};

impl Level {
    /// Moves every `kind` ID found in a step's source span to the matching
    /// offset of its target span. Steps are tried in order and the first match
    /// wins; every value is translated at most once per call.
    pub fn perform_migration(
        &mut self,
        kind: IdKind,
        steps: &[SourceTargetRange],
    ) -> Result<RemapReport, RemapError> {
        if steps.is_empty() {
            return Ok(RemapReport::empty(kind));
        }
        let plan = RemapPlan::snapshot(self, kind, |old| {
            steps.iter().find_map(|step| step.translate(old))
        });
        if plan.is_empty() {
            return Ok(RemapReport::empty(kind));
        }
        if let Err(error) = plan.validate(self) {
            warn!(kind = %kind, steps = steps.len(), error = %error, "id_migration_rejected");
            return Err(error);
        }
        let report = plan.apply(self)?;
        info!(
            kind = %kind,
            steps = steps.len(),
            rewritten_values = report.rewritten_values,
            rewritten_pointers = report.rewritten_pointers,
            relocated_channels = report.relocated_channels,
            "id_migration_applied"
        );
        Ok(report)
    }

    pub fn perform_group_id_migration(
        &mut self,
        steps: &[SourceTargetRange],
    ) -> Result<RemapReport, RemapError> {
        self.perform_migration(IdKind::Group, steps)
    }

    pub fn perform_color_id_migration(
        &mut self,
        steps: &[SourceTargetRange],
    ) -> Result<RemapReport, RemapError> {
        self.perform_migration(IdKind::Color, steps)
    }

    pub fn perform_item_id_migration(
        &mut self,
        steps: &[SourceTargetRange],
    ) -> Result<RemapReport, RemapError> {
        self.perform_migration(IdKind::Item, steps)
    }

    pub fn perform_block_id_migration(
        &mut self,
        steps: &[SourceTargetRange],
    ) -> Result<RemapReport, RemapError> {
        self.perform_migration(IdKind::Block, steps)
    }
}
