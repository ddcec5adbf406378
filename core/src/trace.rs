//! Resolution trace — visibility into which precedence tier decided.
//!
//! Purely observational: the traced and untraced paths return identical
//! matches. Consumed by the CLI `explain` command and by tests asserting
//! the hard-block order.

use std::fmt;

use crate::entity::LocationKind;

/// One consulted precedence tier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TierStep {
    /// The tier that was consulted.
    pub kind: LocationKind,
    /// Whether an exact name/alias hit occurred in this tier.
    pub hit: bool,
    /// How many same-kind entities claimed the key (1 for healthy data;
    /// >1 means the lexicographic slug tie-break fired).
    pub tie_count: usize,
}

/// Full trace of one resolution.
///
/// Tiers below the first hit are never consulted (hard-block), so `steps`
/// stops at the winning tier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolutionTrace {
    /// The raw input as submitted.
    pub raw: String,
    /// The normalized form actually matched against.
    pub normalized: String,
    /// Tiers consulted, in precedence order.
    pub steps: Vec<TierStep>,
    /// Slug of the matched entity, if any.
    pub matched_slug: Option<String>,
}

impl ResolutionTrace {
    /// The tier that produced the match, if any.
    #[must_use]
    pub fn matched_tier(&self) -> Option<LocationKind> {
        self.steps.iter().find(|s| s.hit).map(|s| s.kind)
    }
}

impl fmt::Display for ResolutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "raw:        {:?}", self.raw)?;
        writeln!(f, "normalized: {:?}", self.normalized)?;
        for step in &self.steps {
            write!(f, "  {:<8} ", step.kind)?;
            if step.hit {
                write!(f, "HIT")?;
                if step.tie_count > 1 {
                    write!(f, " ({} claimants, tie-break applied)", step.tie_count)?;
                }
            } else {
                write!(f, "miss")?;
            }
            writeln!(f)?;
        }
        match &self.matched_slug {
            Some(slug) => writeln!(f, "matched: {slug}"),
            None => writeln!(f, "matched: (none — free-text fallback)"),
        }
    }
}
