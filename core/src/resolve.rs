//! The single public entry point every entry adapter converges on.
//!
//! Typed text + Enter, an autosuggest selection, and direct URL navigation
//! must all call [`resolve_and_route`] (or its variants) — never a private
//! re-derivation inside a UI event handler. That shared funnel is what
//! makes the dual-entry parity requirement hold by construction.

use crate::matcher::{match_location, match_location_traced};
use crate::normalize::normalize;
use crate::registry::RegistrySnapshot;
use crate::route::{classify, ListingType, RouteDecision};
use crate::trace::ResolutionTrace;

/// Resolve a raw query and decide the destination, for sale listings.
///
/// Equivalent to [`resolve_and_route_with`] with [`ListingType::Sale`].
/// Never fails: any string, including empty, yields a decision — worst
/// case the free-text SRP fallback.
///
/// # Example
///
/// ```
/// use loqr::{resolve_and_route, LocationEntity, LocationKind, RegistrySnapshot, RenderMode};
///
/// let snap = RegistrySnapshot::build(vec![
///     LocationEntity::new("p1", LocationKind::Province, "Western Cape"),
///     LocationEntity::new("c1", LocationKind::City, "Cape Town").with_parent("western-cape"),
/// ]);
///
/// let d = resolve_and_route("Western Cape", &snap);
/// assert_eq!(d.mode, RenderMode::Seo);
/// assert_eq!(d.target.render(), "/property-for-sale/western-cape");
/// ```
#[must_use]
pub fn resolve_and_route(raw: &str, snapshot: &RegistrySnapshot) -> RouteDecision {
    resolve_and_route_with(raw, snapshot, ListingType::Sale)
}

/// Resolve a raw query under an explicit listing-type toggle.
///
/// The full pipeline: normalize → match (province hard-block first) →
/// classify. Pure: the result is fully determined by
/// `(raw, snapshot, listing)`.
#[must_use]
pub fn resolve_and_route_with(
    raw: &str,
    snapshot: &RegistrySnapshot,
    listing: ListingType,
) -> RouteDecision {
    let normalized = normalize(raw);
    let matched = match_location(&normalized, snapshot);
    classify(matched, raw, listing)
}

/// [`resolve_and_route_with`] plus the resolution trace.
#[must_use]
pub fn resolve_with_trace(
    raw: &str,
    snapshot: &RegistrySnapshot,
    listing: ListingType,
) -> (RouteDecision, ResolutionTrace) {
    let normalized = normalize(raw);
    let (matched, trace) = match_location_traced(raw, &normalized, snapshot);
    (classify(matched, raw, listing), trace)
}
