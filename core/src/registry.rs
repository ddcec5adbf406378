//! Registry snapshot — a validated, immutable view of the location dataset.
//!
//! The canonical dataset is owned by an external registry service; this
//! crate reads a snapshot of it once and never mutates it. Each resolution
//! call sees one consistent snapshot, so a refresh elsewhere can never
//! expose a half-updated alias set mid-query.
//!
//! # Two build modes
//!
//! - [`RegistrySnapshot::build`] — lenient, for serving paths. Structurally
//!   invalid entities are **excluded** from matching and logged; duplicate
//!   keys are kept, logged, and resolved at lookup time by the lexicographic
//!   slug tie-break. Never fails.
//! - [`RegistrySnapshot::build_strict`] — for load-time validation (CLI
//!   `check`, data-owner pipelines). Returns the first structural defect as
//!   a [`RegistryError`].

use std::collections::HashMap;

use tracing::warn;

use crate::entity::{slugify, LocationEntity, LocationKind};

/// Structural defects in registry data.
///
/// These never surface from per-query resolution — malformed *input* is
/// always resolvable (worst case the free-text fallback). They are raised
/// only by [`RegistrySnapshot::build_strict`] at load time.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A city/suburb arrived without a `parent_slug` at all.
    #[error("{kind} \"{slug}\" has no parent_slug ({kind} requires a {expected} parent)")]
    NoParent {
        /// Kind of the defective entity.
        kind: LocationKind,
        /// Slug of the defective entity.
        slug: String,
        /// The parent kind that is required.
        expected: LocationKind,
    },

    /// A province arrived carrying a `parent_slug`; provinces are roots.
    #[error("province \"{slug}\" carries parent_slug \"{parent}\" but provinces have no parent")]
    UnexpectedParent {
        /// Slug of the defective province.
        slug: String,
        /// The stray parent slug.
        parent: String,
    },

    /// A city/suburb references a parent slug that does not resolve.
    #[error("{kind} \"{slug}\" references {expected} \"{parent}\" which does not exist")]
    MissingParent {
        /// Kind of the defective entity.
        kind: LocationKind,
        /// Slug of the defective entity.
        slug: String,
        /// The unresolvable parent slug.
        parent: String,
        /// The parent kind that was searched.
        expected: LocationKind,
    },

    /// The referenced parent exists, but as the wrong kind
    /// (e.g., a suburb whose `parent_slug` names a province).
    #[error("{kind} \"{slug}\" references \"{parent}\" which is a {found}, not a {expected}")]
    ParentKindMismatch {
        /// Kind of the defective entity.
        kind: LocationKind,
        /// Slug of the defective entity.
        slug: String,
        /// The parent slug in question.
        parent: String,
        /// The kind the parent actually has.
        found: LocationKind,
        /// The parent kind that is required.
        expected: LocationKind,
    },

    /// Two same-kind entities share a slug.
    #[error("duplicate {kind} slug \"{slug}\"")]
    DuplicateSlug {
        /// Kind of the colliding entities.
        kind: LocationKind,
        /// The shared slug.
        slug: String,
    },

    /// Two same-kind entities answer to the same name/alias key.
    ///
    /// Classification would be ambiguous; lenient builds recover via the
    /// lexicographic slug tie-break instead of failing.
    #[error("ambiguous {kind} key \"{key}\" claimed by {slugs:?}")]
    DuplicateKey {
        /// Kind of the colliding entities.
        kind: LocationKind,
        /// The shared normalized name/alias.
        key: String,
        /// Slugs of all claimants, lexicographically sorted.
        slugs: Vec<String>,
    },

    /// Registry file did not parse (`registry-io` feature).
    #[cfg(feature = "registry-io")]
    #[error("registry parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

fn kind_idx(kind: LocationKind) -> usize {
    match kind {
        LocationKind::Province => 0,
        LocationKind::City => 1,
        LocationKind::Suburb => 2,
    }
}

/// An immutable, match-ready view of the location registry.
///
/// Pass this (not ambient global state) into the matcher: resolution stays a
/// pure function of `(input, snapshot)`.
///
/// # Example
///
/// ```
/// use loqr::{LocationEntity, LocationKind, RegistrySnapshot};
///
/// let snapshot = RegistrySnapshot::build(vec![
///     LocationEntity::new("p1", LocationKind::Province, "Gauteng").with_aliases(["GP"]),
///     LocationEntity::new("c1", LocationKind::City, "Johannesburg").with_parent("gauteng"),
/// ]);
///
/// let gp = snapshot.lookup(LocationKind::Province, "gp").unwrap();
/// assert_eq!(gp.slug, "gauteng");
/// ```
#[derive(Debug)]
pub struct RegistrySnapshot {
    /// Retained entities, slugs filled, invalid ones already excluded.
    entities: Vec<LocationEntity>,
    /// Per-kind: normalized name/alias key → entity indices, sorted by slug.
    by_key: [HashMap<String, Vec<usize>>; 3],
    /// Per-kind: slug → entity index.
    by_slug: [HashMap<String, usize>; 3],
}

impl RegistrySnapshot {
    /// Build a snapshot leniently.
    ///
    /// Entities whose parent chain does not resolve up to a province are
    /// excluded from matching entirely (never a crash) and logged. Duplicate
    /// slugs/keys are logged; lookups resolve ties deterministically to the
    /// lexicographically smallest slug.
    #[must_use]
    pub fn build(entities: Vec<LocationEntity>) -> Self {
        match Self::build_inner(entities, false) {
            Ok(snapshot) => snapshot,
            // Lenient mode downgrades every defect to a warning.
            Err(_) => unreachable!("lenient build does not produce errors"),
        }
    }

    /// Build a snapshot, failing on the first structural defect.
    ///
    /// Intended for registry load time, not the per-query path.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found, in deterministic order
    /// (parent-chain defects before duplicates, provinces before suburbs).
    pub fn build_strict(entities: Vec<LocationEntity>) -> Result<Self, RegistryError> {
        Self::build_inner(entities, true)
    }

    fn build_inner(entities: Vec<LocationEntity>, strict: bool) -> Result<Self, RegistryError> {
        // Stage 1: fill derived slugs. Loaded data may omit the slug field;
        // derivation is deterministic so this cannot drift between builds.
        let mut entities: Vec<LocationEntity> = entities
            .into_iter()
            .map(|mut e| {
                if e.slug.is_empty() {
                    e.slug = slugify(&e.name);
                }
                e
            })
            .collect();

        // Kind of every declared slug, for mismatch diagnostics.
        let mut slug_kinds: HashMap<String, LocationKind> = HashMap::new();
        for e in &entities {
            slug_kinds.entry(e.slug.clone()).or_insert(e.kind);
        }

        // Stage 2: parent-chain validation in precedence order, so a suburb
        // is checked against *retained* cities only. A city excluded here
        // takes its suburbs down with it.
        let mut retained: Vec<LocationEntity> = Vec::with_capacity(entities.len());
        for kind in LocationKind::PRECEDENCE {
            let expected = kind.parent_kind();
            let parent_slugs: Vec<String> = match expected {
                Some(pk) => retained
                    .iter()
                    .filter(|p| p.kind == pk)
                    .map(|p| p.slug.clone())
                    .collect(),
                None => Vec::new(),
            };

            for e in entities.iter().filter(|e| e.kind == kind) {
                let Some(expected) = expected else {
                    // Provinces are roots; a stray parent_slug is a data
                    // defect, but the province itself is still matchable.
                    if let Some(parent) = &e.parent_slug {
                        let err = RegistryError::UnexpectedParent {
                            slug: e.slug.clone(),
                            parent: parent.clone(),
                        };
                        if strict {
                            return Err(err);
                        }
                        warn!(entity = %e.slug, %err, "ignoring stray parent_slug on province");
                    }
                    retained.push(e.clone());
                    continue;
                };

                match &e.parent_slug {
                    Some(parent) if parent_slugs.iter().any(|p| p == parent) => {
                        retained.push(e.clone());
                    }
                    None => {
                        let err = RegistryError::NoParent {
                            kind,
                            slug: e.slug.clone(),
                            expected,
                        };
                        if strict {
                            return Err(err);
                        }
                        warn!(entity = %e.slug, %err, "excluding entity from matching");
                    }
                    Some(parent) => {
                        let err = match slug_kinds.get(parent) {
                            Some(&found) if found != expected => {
                                RegistryError::ParentKindMismatch {
                                    kind,
                                    slug: e.slug.clone(),
                                    parent: parent.clone(),
                                    found,
                                    expected,
                                }
                            }
                            _ => RegistryError::MissingParent {
                                kind,
                                slug: e.slug.clone(),
                                parent: parent.clone(),
                                expected,
                            },
                        };
                        if strict {
                            return Err(err);
                        }
                        warn!(entity = %e.slug, %err, "excluding entity from matching");
                    }
                }
            }
        }
        entities = retained;

        // Stage 3: per-kind indexes.
        let mut by_key: [HashMap<String, Vec<usize>>; 3] = Default::default();
        let mut by_slug: [HashMap<String, usize>; 3] = Default::default();

        for (i, e) in entities.iter().enumerate() {
            let k = kind_idx(e.kind);

            if by_slug[k].contains_key(&e.slug) {
                let err = RegistryError::DuplicateSlug {
                    kind: e.kind,
                    slug: e.slug.clone(),
                };
                if strict {
                    return Err(err);
                }
                warn!(%err, "duplicate slug retained; slug lookups keep the first");
            } else {
                by_slug[k].insert(e.slug.clone(), i);
            }

            for key in e.match_keys() {
                if key.is_empty() {
                    continue;
                }
                by_key[k].entry(key).or_default().push(i);
            }
        }

        // Sort each key's claimants by slug so ambiguous lookups are
        // deterministic: lexicographically smallest slug wins.
        for keys in &mut by_key {
            for (key, indices) in keys.iter_mut() {
                indices.sort_by(|&a, &b| entities[a].slug.cmp(&entities[b].slug));
                indices.dedup();
                if indices.len() > 1 {
                    let slugs: Vec<String> =
                        indices.iter().map(|&i| entities[i].slug.clone()).collect();
                    let err = RegistryError::DuplicateKey {
                        kind: entities[indices[0]].kind,
                        key: key.clone(),
                        slugs,
                    };
                    if strict {
                        return Err(err);
                    }
                    warn!(%err, "ambiguous registry key; lexicographic slug tie-break applies");
                }
            }
        }

        Ok(Self {
            entities,
            by_key,
            by_slug,
        })
    }

    /// Look up an entity of the given kind by normalized name/alias key.
    ///
    /// On a (data-defect) tie, returns the claimant with the
    /// lexicographically smallest slug — always the same one.
    #[must_use]
    pub fn lookup(&self, kind: LocationKind, normalized_key: &str) -> Option<&LocationEntity> {
        self.lookup_ties(kind, normalized_key).map(|(e, _)| e)
    }

    /// Like [`lookup`](Self::lookup), also reporting how many same-kind
    /// entities claimed the key (1 for healthy data).
    #[must_use]
    pub fn lookup_ties(
        &self,
        kind: LocationKind,
        normalized_key: &str,
    ) -> Option<(&LocationEntity, usize)> {
        if normalized_key.is_empty() {
            return None;
        }
        let indices = self.by_key[kind_idx(kind)].get(normalized_key)?;
        indices.first().map(|&i| (&self.entities[i], indices.len()))
    }

    /// Look up an entity by kind and slug.
    #[must_use]
    pub fn get(&self, kind: LocationKind, slug: &str) -> Option<&LocationEntity> {
        self.by_slug[kind_idx(kind)]
            .get(slug)
            .map(|&i| &self.entities[i])
    }

    /// All retained provinces.
    pub fn provinces(&self) -> impl Iterator<Item = &LocationEntity> {
        self.of_kind(LocationKind::Province)
    }

    /// Retained cities of one province.
    pub fn cities_of<'a>(
        &'a self,
        province_slug: &'a str,
    ) -> impl Iterator<Item = &'a LocationEntity> {
        self.of_kind(LocationKind::City)
            .filter(move |e| e.parent_slug.as_deref() == Some(province_slug))
    }

    /// Retained suburbs of one city.
    pub fn suburbs_of<'a>(
        &'a self,
        city_slug: &'a str,
    ) -> impl Iterator<Item = &'a LocationEntity> {
        self.of_kind(LocationKind::Suburb)
            .filter(move |e| e.parent_slug.as_deref() == Some(city_slug))
    }

    fn of_kind(&self, kind: LocationKind) -> impl Iterator<Item = &LocationEntity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// Number of retained entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` if no entities were retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All retained entities, in input order.
    pub fn iter(&self) -> impl Iterator<Item = &LocationEntity> {
        self.entities.iter()
    }
}

#[cfg(feature = "registry-io")]
impl RegistrySnapshot {
    /// Parse a JSON array of entities and build leniently.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] if the JSON is malformed. Structural
    /// defects in well-formed JSON are handled leniently (exclude + warn).
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let entities: Vec<LocationEntity> = serde_json::from_str(json)?;
        Ok(Self::build(entities))
    }

    /// Parse a JSON array of entities and build strictly.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed JSON, or the first
    /// structural defect found.
    pub fn from_json_str_strict(json: &str) -> Result<Self, RegistryError> {
        let entities: Vec<LocationEntity> = serde_json::from_str(json)?;
        Self::build_strict(entities)
    }
}
