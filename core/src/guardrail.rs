//! Guardrail contract — which UI regions each render mode may compose.
//!
//! Pages are statically composed, so there is no single renderer to gate at
//! runtime. The contract is instead a design invariant enforced by
//! construction and protected here as a machine-checkable validator that
//! page-level tests run against their declared composition.
//!
//! The rules:
//!
//! - An `seo` page must not render any user-adjustable result surface:
//!   no filters, no sort, no pagination, no result counts, no filtered
//!   grid, no "load more". Fixed editorial modules are fine as long as
//!   they bring no pagination affordance of their own.
//! - An `srp` page must render filters, sort, pagination, and a result
//!   count; its results are expected to vary with query parameters.

use crate::route::RenderMode;

/// A composable UI region a landing page may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PageRegion {
    /// User-adjustable filters control surface.
    FiltersPanel,
    /// Sort-order control.
    SortControl,
    /// Page navigation for the result set.
    Pagination,
    /// "Showing X of Y" affordance.
    ResultCount,
    /// Listings grid whose contents follow user-adjustable filters.
    FilteredResultsGrid,
    /// Fixed editorial module (e.g., a "top localities" panel).
    EditorialPanel,
    /// A "load more" affordance — pagination in disguise.
    LoadMore,
}

impl PageRegion {
    /// Regions an SEO page must never render.
    pub const SEO_FORBIDDEN: [PageRegion; 6] = [
        Self::FiltersPanel,
        Self::SortControl,
        Self::Pagination,
        Self::ResultCount,
        Self::FilteredResultsGrid,
        Self::LoadMore,
    ];

    /// Regions an SRP must render.
    pub const SRP_REQUIRED: [PageRegion; 4] = [
        Self::FiltersPanel,
        Self::SortControl,
        Self::Pagination,
        Self::ResultCount,
    ];
}

/// A landing page's declared mode and composed regions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageComposition {
    /// The render mode this page implements.
    pub mode: RenderMode,
    /// Every region the page composes.
    pub regions: Vec<PageRegion>,
}

impl PageComposition {
    /// Declare a page's composition.
    pub fn new(mode: RenderMode, regions: impl IntoIterator<Item = PageRegion>) -> Self {
        Self {
            mode,
            regions: regions.into_iter().collect(),
        }
    }

    /// Whether the page composes the given region.
    #[must_use]
    pub fn has(&self, region: PageRegion) -> bool {
        self.regions.contains(&region)
    }
}

/// A breach of the mode/composition contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardrailViolation {
    /// The page composes a region its mode forbids.
    #[error("{mode} page must not render {region:?}")]
    ForbiddenRegion {
        /// The page's declared mode.
        mode: RenderMode,
        /// The offending region.
        region: PageRegion,
    },

    /// The page omits a region its mode requires.
    #[error("{mode} page must render {region:?}")]
    MissingRegion {
        /// The page's declared mode.
        mode: RenderMode,
        /// The absent region.
        region: PageRegion,
    },
}

/// Check a declared composition against its mode's contract.
///
/// Returns every violation, not just the first, so a page test failure
/// reports the full defect list in one run.
///
/// # Errors
///
/// The collected [`GuardrailViolation`]s, if any.
///
/// # Example
///
/// ```
/// use loqr::{validate_composition, PageComposition, PageRegion, RenderMode};
///
/// let seo = PageComposition::new(RenderMode::Seo, [PageRegion::EditorialPanel]);
/// assert!(validate_composition(&seo).is_ok());
///
/// let leaky = PageComposition::new(
///     RenderMode::Seo,
///     [PageRegion::EditorialPanel, PageRegion::FiltersPanel],
/// );
/// assert!(validate_composition(&leaky).is_err());
/// ```
pub fn validate_composition(page: &PageComposition) -> Result<(), Vec<GuardrailViolation>> {
    let mut violations = Vec::new();

    match page.mode {
        RenderMode::Seo => {
            for region in PageRegion::SEO_FORBIDDEN {
                if page.has(region) {
                    violations.push(GuardrailViolation::ForbiddenRegion {
                        mode: page.mode,
                        region,
                    });
                }
            }
        }
        RenderMode::Srp => {
            for region in PageRegion::SRP_REQUIRED {
                if !page.has(region) {
                    violations.push(GuardrailViolation::MissingRegion {
                        mode: page.mode,
                        region,
                    });
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
