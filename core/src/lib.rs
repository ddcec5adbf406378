//! loqr — location query resolution and dual-entry routing engine.
//!
//! Takes a free-text or UI-selected location query and decides (a) which
//! geographic entity it denotes (province, city, or suburb) and (b) which
//! of two mutually exclusive rendering modes the destination page must use:
//! a static SEO discovery page or a dynamic, filterable search results page
//! (SRP). The decision is identical regardless of entry path — typed text +
//! Enter, autosuggest click, or direct URL.
//!
//! # Pipeline
//!
//! ```text
//! raw text → normalize → match (province hard-block first) → classify
//!          → RouteDecision { mode, target } → page selection (external)
//!          → guardrail validation of the page's composition
//! ```
//!
//! # Key Design Decisions
//!
//! 1. **Province hard-block**: the matcher consults tiers in the fixed
//!    order province → city → suburb and returns on the first hit. A
//!    province alias always beats a textually similar city/suburb name.
//!
//! 2. **One entry point**: every entry adapter calls
//!    [`resolve_and_route`]. Duplicating match logic inside UI handlers is
//!    how parity bugs get introduced, so there is nothing else to call.
//!
//! 3. **Explicit snapshot, pure functions**: the registry is passed in as
//!    an immutable [`RegistrySnapshot`] argument, never reached for as
//!    ambient global state. Resolution is fully determined by
//!    `(input, snapshot, listing)`.
//!
//! 4. **Route shapes live in one file**: every path/query the product
//!    emits comes from [`classify`] and its siblings in the route module,
//!    so the SEO/SRP guardrail has a single source of truth to check.
//!
//! # Example
//!
//! ```
//! use loqr::prelude::*;
//!
//! let snapshot = RegistrySnapshot::build(vec![
//!     LocationEntity::new("p1", LocationKind::Province, "KwaZulu-Natal")
//!         .with_aliases(["KZN"]),
//!     LocationEntity::new("c1", LocationKind::City, "Durban")
//!         .with_parent("kwazulu-natal"),
//! ]);
//!
//! // Province (by alias) → static SEO page, bare canonical path.
//! let d = resolve_and_route("KZN", &snapshot);
//! assert_eq!(d.mode, RenderMode::Seo);
//! assert_eq!(d.target.render(), "/property-for-sale/kwazulu-natal");
//!
//! // City → filterable SRP with a query parameter.
//! let d = resolve_and_route("durban", &snapshot);
//! assert_eq!(d.mode, RenderMode::Srp);
//! assert_eq!(d.target.render(), "/property-for-sale?city=durban");
//!
//! // Unknown text → SRP free-text fallback, never an error.
//! let d = resolve_and_route("nonexistent-place-xyz", &snapshot);
//! assert_eq!(d.target.render(), "/property-for-sale?location=nonexistent-place-xyz");
//! ```
//!
//! # Features
//!
//! - `serde` — derives on the public types.
//! - `registry-io` — load registry snapshots from JSON (implies `serde`).

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod entity;
mod guardrail;
mod matcher;
mod normalize;
mod registry;
mod resolve;
mod route;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use entity::{slugify, LocationEntity, LocationKind};
pub use guardrail::{validate_composition, GuardrailViolation, PageComposition, PageRegion};
pub use matcher::{match_location, match_location_traced};
pub use normalize::normalize;
pub use registry::{RegistryError, RegistrySnapshot};
pub use resolve::{resolve_and_route, resolve_and_route_with, resolve_with_trace};
pub use route::{
    classify, internal_link_for, seo_child_path, ListingType, RenderMode, RouteDecision,
    RouteTarget,
};
pub use trace::{ResolutionTrace, TierStep};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use loqr::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        classify,
        internal_link_for,
        match_location,
        normalize,
        resolve_and_route,
        resolve_and_route_with,
        resolve_with_trace,
        seo_child_path,
        slugify,
        validate_composition,
        GuardrailViolation,
        ListingType,
        LocationEntity,
        LocationKind,
        PageComposition,
        PageRegion,
        RegistryError,
        RegistrySnapshot,
        RenderMode,
        ResolutionTrace,
        RouteDecision,
        RouteTarget,
        TierStep,
    };
}
