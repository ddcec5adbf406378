//! Matcher — tiered exact matching with province hard-block.
//!
//! The central design decision of the engine: tiers are consulted in the
//! fixed order province → city → suburb, and a hit in one tier returns
//! immediately without consulting lower tiers. A province alias therefore
//! always beats a textually similar city or suburb name.
//!
//! Matching is exact-equality over normalized strings only. Fuzzy/typo
//! tolerance belongs to the external autosuggest data source; this matcher
//! is the deterministic fallback used on explicit submission.

use tracing::warn;

use crate::entity::{LocationEntity, LocationKind};
use crate::registry::RegistrySnapshot;
use crate::trace::{ResolutionTrace, TierStep};

/// Match normalized input against the registry snapshot.
///
/// Input must already be in [`normalize`](crate::normalize) form. Empty
/// input never matches — it is not a wildcard.
///
/// # Tie-break (data-defect recovery)
///
/// Same-kind name/alias disjointness is a registry invariant; when it is
/// nonetheless violated, the claimant with the lexicographically smallest
/// slug wins, deterministically, and a warning is emitted. Ambiguity is a
/// data-quality bug, never a runtime error.
///
/// # Example
///
/// ```
/// use loqr::{match_location, LocationEntity, LocationKind, RegistrySnapshot};
///
/// let snap = RegistrySnapshot::build(vec![
///     LocationEntity::new("p1", LocationKind::Province, "KwaZulu-Natal").with_aliases(["KZN"]),
///     LocationEntity::new("c1", LocationKind::City, "Durban").with_parent("kwazulu-natal"),
/// ]);
///
/// assert_eq!(match_location("kzn", &snap).unwrap().slug, "kwazulu-natal");
/// assert_eq!(match_location("durban", &snap).unwrap().kind, LocationKind::City);
/// assert!(match_location("", &snap).is_none());
/// ```
#[must_use]
pub fn match_location<'a>(
    normalized: &str,
    snapshot: &'a RegistrySnapshot,
) -> Option<&'a LocationEntity> {
    if normalized.is_empty() {
        return None;
    }

    // Hard-block: first tier with a hit wins outright.
    for kind in LocationKind::PRECEDENCE {
        if let Some((entity, ties)) = snapshot.lookup_ties(kind, normalized) {
            if ties > 1 {
                warn!(
                    key = %normalized,
                    kind = %kind,
                    winner = %entity.slug,
                    ties,
                    "ambiguous registry key resolved by slug tie-break"
                );
            }
            return Some(entity);
        }
    }

    None
}

/// [`match_location`] with a [`ResolutionTrace`] of the tiers consulted.
///
/// Same result as the untraced path for every input.
#[must_use]
pub fn match_location_traced<'a>(
    raw: &str,
    normalized: &str,
    snapshot: &'a RegistrySnapshot,
) -> (Option<&'a LocationEntity>, ResolutionTrace) {
    let mut steps = Vec::new();
    let mut matched = None;

    if !normalized.is_empty() {
        for kind in LocationKind::PRECEDENCE {
            match snapshot.lookup_ties(kind, normalized) {
                Some((entity, ties)) => {
                    steps.push(TierStep {
                        kind,
                        hit: true,
                        tie_count: ties,
                    });
                    matched = Some(entity);
                    break;
                }
                None => steps.push(TierStep {
                    kind,
                    hit: false,
                    tie_count: 0,
                }),
            }
        }
    }

    let trace = ResolutionTrace {
        raw: raw.to_string(),
        normalized: normalized.to_string(),
        steps,
        matched_slug: matched.map(|e: &LocationEntity| e.slug.clone()),
    };
    (matched, trace)
}
