//! `LocationEntity` — the geographic entities the engine classifies against.
//!
//! Entities are owned by an external registry service; this crate only reads
//! them. The three kinds form a strict containment hierarchy
//! (province ⊃ city ⊃ suburb) which doubles as the match precedence order:
//! a province match hard-blocks everything below it.

use std::fmt;

use crate::normalize::normalize;

/// The kind of a geographic entity.
///
/// Declaration order IS precedence order: [`LocationKind::Province`] is
/// consulted first by the matcher and wins over any city/suburb with a
/// textually similar name (the hard-block rule).
///
/// # Example
///
/// ```
/// use loqr::LocationKind;
///
/// assert!(LocationKind::Province < LocationKind::City);
/// assert_eq!(LocationKind::Suburb.as_str(), "suburb");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocationKind {
    /// Top of the hierarchy; resolves to a static SEO discovery page.
    Province,
    /// Child of a province; resolves to a filterable SRP.
    City,
    /// Child of a city; resolves to a filterable SRP.
    Suburb,
}

impl LocationKind {
    /// All kinds in match precedence order (highest first).
    pub const PRECEDENCE: [LocationKind; 3] = [Self::Province, Self::City, Self::Suburb];

    /// Stable lowercase name, matching the wire/fixture representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::City => "city",
            Self::Suburb => "suburb",
        }
    }

    /// The kind a parent of this kind must have, if any.
    ///
    /// Provinces are roots and have no parent.
    #[must_use]
    pub fn parent_kind(self) -> Option<LocationKind> {
        match self {
            Self::Province => None,
            Self::City => Some(Self::Province),
            Self::Suburb => Some(Self::City),
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single geographic entity from the location registry.
///
/// Read-only from this crate's perspective. `slug` is derived from `name`
/// once (see [`slugify`]) and never mutated afterwards — URLs built from it
/// must stay stable.
///
/// # Example
///
/// ```
/// use loqr::{LocationEntity, LocationKind};
///
/// let kzn = LocationEntity::new("p-kzn", LocationKind::Province, "KwaZulu-Natal")
///     .with_aliases(["KZN", "Natal"]);
/// assert_eq!(kzn.slug, "kwazulu-natal");
/// assert!(kzn.answers_to("kzn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationEntity {
    /// Opaque identifier, unique across the registry.
    pub id: String,

    /// Province, city, or suburb.
    pub kind: LocationKind,

    /// Canonical display name (e.g., `"KwaZulu-Natal"`).
    pub name: String,

    /// URL-safe canonical identifier, unique within `(kind, parent_slug)`.
    ///
    /// An empty slug in loaded data means "derive from name"; the registry
    /// snapshot fills it via [`slugify`] at build time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: String,

    /// Slug of the containing entity: province slug for cities, city slug
    /// for suburbs, `None` for provinces.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_slug: Option<String>,

    /// Case-insensitive alternate strings resolving to this entity
    /// (e.g., `"KZN"`). Must be disjoint from every other same-kind
    /// entity's name/aliases.
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
}

impl LocationEntity {
    /// Create an entity with its slug derived from `name`.
    pub fn new(id: impl Into<String>, kind: LocationKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            id: id.into(),
            kind,
            name,
            slug,
            parent_slug: None,
            aliases: Vec::new(),
        }
    }

    /// Set the parent slug (builder style).
    #[must_use]
    pub fn with_parent(mut self, parent_slug: impl Into<String>) -> Self {
        self.parent_slug = Some(parent_slug.into());
        self
    }

    /// Add aliases (builder style).
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Whether `normalized` equals this entity's normalized name or any
    /// normalized alias.
    ///
    /// `normalized` is expected to already be in [`normalize`] form; the
    /// entity's own strings are normalized here so callers never compare
    /// raw against canonical.
    #[must_use]
    pub fn answers_to(&self, normalized: &str) -> bool {
        if normalized.is_empty() {
            return false;
        }
        normalize(&self.name) == normalized
            || self.aliases.iter().any(|a| normalize(a) == normalized)
    }

    /// All strings this entity answers to, in normalized form.
    ///
    /// Used by the registry snapshot to build its lookup keys.
    pub fn match_keys(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(normalize(&self.name)).chain(self.aliases.iter().map(|a| normalize(a)))
    }
}

/// Derive a URL slug from a display name.
///
/// Deterministic: lowercase, latin diacritics folded to ASCII, every run of
/// other non-alphanumeric characters collapsed to a single hyphen, leading
/// and trailing hyphens trimmed. The same name always yields the same slug,
/// which is what keeps published URLs stable.
///
/// # Example
///
/// ```
/// use loqr::slugify;
///
/// assert_eq!(slugify("KwaZulu-Natal"), "kwazulu-natal");
/// assert_eq!(slugify("  Sea Point  "), "sea-point");
/// assert_eq!(slugify("Curaçao"), "curacao");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    let mut push = |c: char, out: &mut String, pending_hyphen: &mut bool| {
        if *pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        *pending_hyphen = false;
        out.push(c);
    };

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            push(ch.to_ascii_lowercase(), &mut out, &mut pending_hyphen);
        } else if let Some(folded) = fold_diacritic(ch) {
            for c in folded.chars() {
                push(c, &mut out, &mut pending_hyphen);
            }
        } else {
            // Separator: whitespace, punctuation, or an unfolded non-ASCII
            // character. Runs collapse to one hyphen.
            pending_hyphen = true;
        }
    }

    out
}

/// Fold common latin diacritics to their ASCII base letter(s).
///
/// Covers the Latin-1 Supplement letters seen in place names; not a full
/// Unicode decomposition. Returns `None` for anything unhandled, which
/// [`slugify`] then treats as a separator.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ç' | 'Ç' => "c",
        'ñ' | 'Ñ' => "n",
        'ý' | 'ÿ' | 'Ý' => "y",
        'æ' | 'Æ' => "ae",
        'ø' | 'Ø' => "o",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}
