//! Property tests for the resolution pipeline.
//!
//! The properties here are the engine's contract, not examples: parity
//! across entry formatting, total coverage of arbitrary input, and the
//! structural shape of every decision.

use loqr::prelude::*;
use loqr_test::{sample_entities, sample_registry};
use proptest::prelude::*;

/// An arbitrary entity index into the sample registry.
fn arb_entity() -> impl Strategy<Value = LocationEntity> {
    let entities = sample_entities();
    let len = entities.len();
    (0..len).prop_map(move |i| entities[i].clone())
}

/// Case-flip and pad a string the way users mistype entry fields.
fn arb_formatting_of(s: String) -> impl Strategy<Value = String> {
    let flips = proptest::collection::vec(any::<bool>(), s.chars().count());
    (flips, 0usize..4, 0usize..4).prop_map(move |(flips, lead, trail)| {
        let body: String = s
            .chars()
            .zip(flips)
            .map(|(c, up)| {
                if up {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect();
        format!("{}{}{}", " ".repeat(lead), body, " ".repeat(trail))
    })
}

/// An arbitrary subset of the composable page regions.
fn arb_regions() -> impl Strategy<Value = Vec<PageRegion>> {
    let all = vec![
        PageRegion::FiltersPanel,
        PageRegion::SortControl,
        PageRegion::Pagination,
        PageRegion::ResultCount,
        PageRegion::FilteredResultsGrid,
        PageRegion::EditorialPanel,
        PageRegion::LoadMore,
    ];
    let len = all.len();
    proptest::sample::subsequence(all, 0..=len)
}

proptest! {
    /// Any string at all resolves to a decision; the pipeline never panics
    /// and never yields anything outside the two modes.
    #[test]
    fn resolution_is_total(input in any::<String>()) {
        let snap = sample_registry();
        let d = resolve_and_route(&input, &snap);
        prop_assert!(matches!(d.mode, RenderMode::Seo | RenderMode::Srp));
    }

    /// Normalization is idempotent: a second pass changes nothing.
    #[test]
    fn normalize_idempotent(input in any::<String>()) {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Normalized output stays inside the declared alphabet.
    #[test]
    fn normalize_alphabet(input in any::<String>()) {
        let out = normalize(&input);
        prop_assert!(out.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | ' ' | ',' | '-')));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
    }

    /// Entry-path parity: however the user formats a known entity's name
    /// (case, padding), the decision target is byte-identical to the one an
    /// autosuggest selection of that entity would produce.
    #[test]
    fn entry_formatting_parity(
        (entity, formatted) in arb_entity()
            .prop_flat_map(|e| {
                let name = e.name.clone();
                (Just(e), arb_formatting_of(name))
            })
    ) {
        let snap = sample_registry();
        let typed = resolve_and_route(&formatted, &snap);
        let selected = resolve_and_route(&entity.name, &snap);
        prop_assert_eq!(typed.target.render(), selected.target.render());
    }

    /// Alias parity: every alias yields the same target as the canonical name.
    #[test]
    fn alias_parity(entity in arb_entity(), idx in any::<prop::sample::Index>()) {
        prop_assume!(!entity.aliases.is_empty());
        let alias = idx.get(&entity.aliases).clone();

        let snap = sample_registry();
        let by_alias = resolve_and_route(&alias, &snap);
        let by_name = resolve_and_route(&entity.name, &snap);
        prop_assert_eq!(by_alias.target.render(), by_name.target.render());
    }

    /// A SEO decision is always a matched province with a bare path:
    /// no query parameters, ever.
    #[test]
    fn seo_decisions_are_bare_province_paths(input in any::<String>()) {
        let snap = sample_registry();
        let d = resolve_and_route(&input, &snap);
        if d.mode == RenderMode::Seo {
            let matched = d.matched.as_ref().expect("seo implies a match");
            prop_assert_eq!(matched.kind, LocationKind::Province);
            prop_assert!(d.target.query_params().is_empty());
            prop_assert_eq!(
                d.target.render(),
                format!("/property-for-sale/{}", matched.slug)
            );
        }
    }

    /// An unmatched decision always carries the raw input in `location`.
    #[test]
    fn fallback_echoes_raw_input(input in any::<String>()) {
        let snap = sample_registry();
        let d = resolve_and_route(&input, &snap);
        if d.matched.is_none() {
            prop_assert_eq!(d.mode, RenderMode::Srp);
            prop_assert_eq!(d.target.query_param("location"), Some(input.as_str()));
        }
    }

    /// An SEO composition that passes validation composes no SRP-only
    /// region, whatever subset of regions it declares; an SRP composition
    /// that passes carries every required control.
    #[test]
    fn valid_compositions_respect_mode_surfaces(regions in arb_regions()) {
        let seo = PageComposition::new(RenderMode::Seo, regions.clone());
        if validate_composition(&seo).is_ok() {
            for region in PageRegion::SEO_FORBIDDEN {
                prop_assert!(!seo.has(region));
            }
        }

        let srp = PageComposition::new(RenderMode::Srp, regions);
        if validate_composition(&srp).is_ok() {
            for region in PageRegion::SRP_REQUIRED {
                prop_assert!(srp.has(region));
            }
        }
    }

    /// Resolution is deterministic in the snapshot: two builds of the same
    /// data give identical decisions.
    #[test]
    fn snapshot_build_is_deterministic(input in any::<String>()) {
        let a = RegistrySnapshot::build(sample_entities());
        let b = RegistrySnapshot::build(sample_entities());
        prop_assert_eq!(
            resolve_and_route(&input, &a),
            resolve_and_route(&input, &b)
        );
    }
}
