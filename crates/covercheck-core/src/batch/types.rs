//! Batch input and output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::verdict::{ProbeVerdict, RejectReason};

/// One cover to check. `id` is opaque and only correlates input with output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem<K> {
    #[serde(alias = "_id")]
    pub id: K,
    #[serde(alias = "coverUrl")]
    pub url: String,
}

impl<K> CandidateItem<K> {
    pub fn new(id: K, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome<K> {
    pub item: CandidateItem<K>,
    #[serde(flatten)]
    pub verdict: ProbeVerdict,
}

/// One outcome per input item, in input order. Filtering is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchResult<K> {
    outcomes: Vec<ProbeOutcome<K>>,
}

impl<K> BatchResult<K> {
    pub(crate) fn from_outcomes(outcomes: Vec<ProbeOutcome<K>>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[ProbeOutcome<K>] {
        &self.outcomes
    }

    pub fn verdicts(&self) -> Vec<ProbeVerdict> {
        self.outcomes.iter().map(|o| o.verdict).collect()
    }

    /// Items with a `Valid` verdict, in input order.
    pub fn valid_items(&self) -> impl Iterator<Item = &CandidateItem<K>> {
        self.outcomes
            .iter()
            .filter(|o| o.verdict.is_valid())
            .map(|o| &o.item)
    }

    /// Rejected items and why, in input order.
    pub fn rejections(&self) -> impl Iterator<Item = (&CandidateItem<K>, RejectReason)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.verdict.reason().map(|r| (&o.item, r)))
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.outcomes.len(),
            ..BatchSummary::default()
        };
        for o in &self.outcomes {
            match o.verdict {
                ProbeVerdict::Valid => summary.valid += 1,
                ProbeVerdict::Invalid(r) => *summary.by_reason.entry(r).or_insert(0) += 1,
            }
        }
        summary
    }
}

/// Counts for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub by_reason: BTreeMap<RejectReason, usize>,
}

impl BatchSummary {
    pub fn rejected(&self) -> usize {
        self.by_reason.values().sum()
    }
}
