//! Tier diffing for the edit flow.

use std::collections::{HashSet, VecDeque};

use crate::draft::TierDraft;
use crate::errors::ValidationError;
use crate::models::{SupportTier, TierId, TierRequest, MAX_TIERS};
use crate::validation;

/// One tier mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierChange {
    Create(TierRequest),
    Update { id: TierId, request: TierRequest },
    Delete(TierId),
}

/// The tier mutations that turn the loaded tiers into the edited ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierPlan {
    pub creates: Vec<TierRequest>,
    pub updates: Vec<(TierId, TierRequest)>,
    pub deletes: Vec<TierId>,
}

impl TierPlan {
    /// Diff `edited` against the `original` snapshot.
    ///
    /// Tiers without a known id are created, unsupported tiers that remain are
    /// updated, and original tiers missing from `edited` are deleted. A tier in
    /// `supported` (or flagged `has_support`) is never touched.
    pub fn diff(
        original: &[SupportTier],
        edited: &[TierDraft],
        supported: &HashSet<TierId>,
    ) -> Result<Self, ValidationError> {
        let original_ids: HashSet<TierId> = original.iter().map(|t| t.support_tier_id).collect();
        let mut plan = TierPlan::default();
        let mut kept = HashSet::new();

        for tier in edited {
            let known_id = tier.id.filter(|id| original_ids.contains(id));
            if let Some(id) = known_id {
                kept.insert(id);
                if tier.has_support || supported.contains(&id) {
                    continue;
                }
                plan.updates.push((id, validation::validate_tier(tier)?));
            } else if !tier.has_support {
                plan.creates.push(validation::validate_tier(tier)?);
            }
        }

        for tier in original {
            let id = tier.support_tier_id;
            if kept.contains(&id) {
                continue;
            }
            if supported.contains(&id) {
                tracing::warn!("Keeping supported tier {} that was removed locally", id);
                continue;
            }
            plan.deletes.push(id);
        }

        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }

    /// Order the changes against the `original` snapshot so the server-side
    /// tier count stays within `1..=MAX_TIERS` after every request, and no
    /// tier is given a title another tier still holds.
    ///
    /// Deletes go first, starting with those whose title is reused, while more
    /// than one tier would remain. Updates follow. Creates then fill in while
    /// there is room, alternating with any deletes the lower bound held back.
    pub fn ordered(&self, original: &[SupportTier]) -> Vec<TierChange> {
        let title_of = |id: TierId| {
            original
                .iter()
                .find(|t| t.support_tier_id == id)
                .map(|t| t.title.to_lowercase())
        };
        let incoming: HashSet<String> = self
            .updates
            .iter()
            .map(|(_, request)| &request.title)
            .chain(self.creates.iter().map(|request| &request.title))
            .map(|title| title.to_lowercase())
            .collect();

        let mut deletes = self.deletes.clone();
        deletes.sort_by_key(|id| !title_of(*id).is_some_and(|t| incoming.contains(&t)));
        let mut deletes: VecDeque<TierId> = deletes.into();
        let mut creates: VecDeque<TierRequest> = self.creates.iter().cloned().collect();
        let mut count = original.len();
        let mut changes = Vec::new();

        while count > 1 {
            let Some(id) = deletes.pop_front() else {
                break;
            };
            changes.push(TierChange::Delete(id));
            count -= 1;
        }

        changes.extend(self.updates.iter().map(|(id, request)| TierChange::Update {
            id: *id,
            request: request.clone(),
        }));

        loop {
            if count > 1 {
                if let Some(id) = deletes.pop_front() {
                    changes.push(TierChange::Delete(id));
                    count -= 1;
                    continue;
                }
            }
            if count < MAX_TIERS && !creates.is_empty() {
                // Titles of tiers still waiting to be deleted
                let held: HashSet<String> = deletes.iter().filter_map(|id| title_of(*id)).collect();
                let pick = creates
                    .iter()
                    .position(|r| !held.contains(&r.title.to_lowercase()))
                    .unwrap_or(0);
                if let Some(request) = creates.remove(pick) {
                    changes.push(TierChange::Create(request));
                    count += 1;
                    continue;
                }
            }
            break;
        }

        // Only reachable when the edited list itself breaks the bounds.
        changes.extend(deletes.into_iter().map(TierChange::Delete));
        changes.extend(creates.into_iter().map(TierChange::Create));
        changes
    }
}
