//! Route classifier — one matched entity (or none) in, one routing decision out.
//!
//! Every path/query shape the product emits is constructed here and nowhere
//! else, so the SEO/SRP guardrail is checkable against a single source of
//! truth instead of being re-derived per page.
//!
//! The decision table (total over four cases):
//!
//! | matched              | mode  | target                               |
//! |----------------------|-------|--------------------------------------|
//! | province             | `seo` | `{base}/{province_slug}`             |
//! | city                 | `srp` | `{base}?city={city_slug}`            |
//! | suburb               | `srp` | `{base}?suburb={suburb_slug}`        |
//! | none (free text)     | `srp` | `{base}?location={raw_input}`        |

use std::fmt;

use crate::entity::{LocationEntity, LocationKind};

/// Which of the two mutually exclusive page families the destination uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderMode {
    /// Static SEO discovery page: fixed composition, no user-adjustable
    /// filtering, reachable by a bare canonical path.
    Seo,
    /// Search results page: filters, sort, pagination; results vary with
    /// query parameters.
    Srp,
}

impl RenderMode {
    /// Stable lowercase tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seo => "seo",
            Self::Srp => "srp",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sale vs. rent listing context.
///
/// Owned by an external toggle; the classifier only swaps the base path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ListingType {
    /// Properties for sale — base path `/property-for-sale`.
    #[default]
    Sale,
    /// Properties to rent — base path `/property-to-rent`.
    Rent,
}

impl ListingType {
    /// The base path for this listing context.
    #[must_use]
    pub fn base_path(self) -> &'static str {
        match self {
            Self::Sale => "/property-for-sale",
            Self::Rent => "/property-to-rent",
        }
    }
}

/// A destination: path plus ordered query parameters.
///
/// [`render`](Self::render) produces the bit-exact URL string; query values
/// are form-urlencoded, keys appear in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteTarget {
    path: String,
    query: Vec<(String, String)>,
}

impl RouteTarget {
    /// A bare path with no query parameters.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append one query parameter (builder style).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// The path component, without query string.
    #[must_use]
    pub fn path_only(&self) -> &str {
        &self.path
    }

    /// The query parameters, in emission order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Value of the first query parameter with the given key, if present.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the full URL string.
    ///
    /// `path("/p")` renders `/p`; with params, `/p?k=v&k2=v2` with values
    /// form-urlencoded. A parameter with an empty value renders as `k=`.
    #[must_use]
    pub fn render(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.query {
            ser.append_pair(k, v);
        }
        format!("{}?{}", self.path, ser.finish())
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// The routing decision for one submitted query.
///
/// Computed fresh per query, never cached beyond one navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteDecision {
    /// The resolved entity, or `None` for the free-text fallback.
    pub matched: Option<LocationEntity>,
    /// Which page family the destination must use.
    pub mode: RenderMode,
    /// Where to navigate.
    pub target: RouteTarget,
}

/// Map a matched entity (or no match) to a routing decision.
///
/// Total over all four cases, side-effect-free, and never inspects
/// session/auth state:
///
/// - province → `seo`, bare canonical path, **zero** query parameters;
/// - city → `srp` with `city={slug}`;
/// - suburb → `srp` with `suburb={slug}`;
/// - no match → `srp` with `location={raw_input}` (the external catalog
///   service interprets the parameter).
///
/// # Example
///
/// ```
/// use loqr::{classify, ListingType, LocationEntity, LocationKind, RenderMode};
///
/// let durban = LocationEntity::new("c1", LocationKind::City, "Durban")
///     .with_parent("kwazulu-natal");
/// let decision = classify(Some(&durban), "durban", ListingType::Sale);
/// assert_eq!(decision.mode, RenderMode::Srp);
/// assert_eq!(decision.target.render(), "/property-for-sale?city=durban");
///
/// let fallback = classify(None, "nonexistent-place-xyz", ListingType::Sale);
/// assert_eq!(
///     fallback.target.render(),
///     "/property-for-sale?location=nonexistent-place-xyz"
/// );
/// ```
#[must_use]
pub fn classify(
    matched: Option<&LocationEntity>,
    raw_input: &str,
    listing: ListingType,
) -> RouteDecision {
    let base = listing.base_path();

    match matched {
        Some(entity) => {
            let (mode, target) = match entity.kind {
                LocationKind::Province => (
                    RenderMode::Seo,
                    RouteTarget::path(format!("{base}/{}", entity.slug)),
                ),
                LocationKind::City => (
                    RenderMode::Srp,
                    RouteTarget::path(base).with_query("city", &entity.slug),
                ),
                LocationKind::Suburb => (
                    RenderMode::Srp,
                    RouteTarget::path(base).with_query("suburb", &entity.slug),
                ),
            };
            RouteDecision {
                matched: Some(entity.clone()),
                mode,
                target,
            }
        }
        None => RouteDecision {
            matched: None,
            mode: RenderMode::Srp,
            target: RouteTarget::path(base).with_query("location", raw_input),
        },
    }
}

/// The nested province/city SEO path: `{base}/{province_slug}/{city_slug}`.
///
/// Direct-entry only — reachable via URL or breadcrumb. Internal navigation
/// must never emit it; use [`internal_link_for`] instead.
#[must_use]
pub fn seo_child_path(province_slug: &str, city_slug: &str, listing: ListingType) -> RouteTarget {
    RouteTarget::path(format!(
        "{}/{province_slug}/{city_slug}",
        listing.base_path()
    ))
}

/// The link form for internally generated navigation to an entity.
///
/// Internal links always prefer the SRP query form for non-province tiers;
/// the SEO path form is reserved for province destinations and for
/// external/direct entry. A "see all localities" panel on a province page
/// linking to a city therefore gets `{base}?city={slug}`, never
/// `{base}/{province}/{city}`.
#[must_use]
pub fn internal_link_for(entity: &LocationEntity, listing: ListingType) -> RouteTarget {
    classify(Some(entity), &entity.name, listing).target
}
