use std::collections::BTreeMap;

use boundary::BoundaryFeature;

use crate::alias::AliasTable;
use crate::country::CountryIdentity;

/// Reformats a raw tag into display form: trimmed, separator hyphens turned
/// into spaces, each word title-cased. "united-states-of-america" becomes
/// "United States Of America"; two spellings of the same name converge.
pub fn format_name(raw: &str) -> String {
    raw.trim()
        .replace('-', " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.extend(chars.flat_map(|c| c.to_lowercase()));
    out
}

#[derive(Debug, Clone)]
struct FeatureEntry {
    canonical_name: String,
    iso_a2: Option<String>,
}

/// Resolves free-text country tags to canonical identities.
///
/// All matching state is owned here and rebuilt from whatever boundary set is
/// currently loaded; callers pass the resolver around instead of relying on
/// ambient globals. Resolution never fails: the worst case is a best-effort
/// identity carrying only the cleaned input string, so unmatched countries
/// still surface as labeled buckets instead of disappearing.
#[derive(Debug, Default)]
pub struct CountryIdentityResolver {
    aliases: AliasTable,
    entries: Vec<FeatureEntry>,
    // Lowercased admin name (raw and aliased) -> entry index.
    by_name: BTreeMap<String, usize>,
    // Lowercased 2- and 3-letter ISO codes -> entry index.
    by_iso: BTreeMap<String, usize>,
}

impl CountryIdentityResolver {
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    pub fn with_builtin_aliases() -> Self {
        Self::new(AliasTable::builtin())
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn has_boundary_data(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Reindexes the loaded boundary set. Earlier features win on name or ISO
    /// collisions, matching first-match resolution order.
    pub fn rebuild(&mut self, features: &[BoundaryFeature]) {
        self.entries.clear();
        self.by_name.clear();
        self.by_iso.clear();

        for feature in features {
            let canonical_name = self
                .aliases
                .canonical(&feature.admin_name)
                .unwrap_or(&feature.admin_name)
                .to_string();

            let idx = self.entries.len();
            self.entries.push(FeatureEntry {
                canonical_name: canonical_name.clone(),
                iso_a2: feature.iso_a2.clone(),
            });

            self.by_name
                .entry(feature.admin_name.to_lowercase())
                .or_insert(idx);
            self.by_name.entry(canonical_name.to_lowercase()).or_insert(idx);

            for iso in [&feature.iso_a2, &feature.iso_a3].into_iter().flatten() {
                self.by_iso.entry(iso.to_lowercase()).or_insert(idx);
            }
        }
    }

    /// Resolves a raw tag to a canonical identity. Never fails; see the type
    /// docs for the fallback policy.
    pub fn resolve(&self, raw_name: &str) -> CountryIdentity {
        let formatted = format_name(raw_name);
        if formatted.is_empty() {
            return CountryIdentity::unmatched("");
        }

        // Alias resolution takes priority over feature matching: aliases
        // correct exactly the cases where the dataset's naming is not what
        // feeds and users write.
        let working = match self.aliases.canonical(&formatted) {
            Some(canonical) => canonical.to_string(),
            None => formatted.clone(),
        };

        if let Some(&idx) = self.by_name.get(&working.to_lowercase()) {
            let entry = &self.entries[idx];
            return CountryIdentity::new(working, entry.iso_a2.as_deref());
        }

        if let Some(&idx) = self.by_iso.get(&formatted.to_lowercase()) {
            let entry = &self.entries[idx];
            return CountryIdentity::new(entry.canonical_name.clone(), entry.iso_a2.as_deref());
        }

        tracing::debug!(
            raw = raw_name,
            working = working.as_str(),
            "no boundary match for geography tag, using best-effort identity"
        );
        CountryIdentity::unmatched(working)
    }

    /// Alias targets that no loaded feature answers to. Intended for a
    /// build/CI drift check against the live dataset; empty until boundary
    /// data is loaded.
    pub fn unmatched_alias_targets(&self) -> Vec<String> {
        if !self.has_boundary_data() {
            return Vec::new();
        }
        self.aliases
            .targets()
            .filter(|target| !self.by_name.contains_key(&target.to_lowercase()))
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryIdentityResolver, format_name};
    use boundary::BoundaryFeature;
    use foundation::geo::{GeoBounds, LatLng};

    fn feature(admin: &str, iso_a2: Option<&str>, iso_a3: Option<&str>) -> BoundaryFeature {
        let bbox = GeoBounds::of_point(LatLng::new(0.0, 0.0));
        BoundaryFeature {
            admin_name: admin.to_string(),
            iso_a2: iso_a2.map(String::from),
            iso_a3: iso_a3.map(String::from),
            geometry: serde_json::Value::Null,
            centroid: bbox.center(),
            bbox,
        }
    }

    fn loaded_resolver() -> CountryIdentityResolver {
        let mut resolver = CountryIdentityResolver::with_builtin_aliases();
        resolver.rebuild(&[
            feature("United States of America", Some("US"), Some("USA")),
            feature("France", Some("FR"), Some("FRA")),
            feature("Norway", None, Some("NOR")),
        ]);
        resolver
    }

    #[test]
    fn formatting_title_cases_and_splits_kebab() {
        assert_eq!(format_name("  united-states-of-america "), "United States Of America");
        assert_eq!(format_name("SOUTH korea"), "South Korea");
        assert_eq!(format_name(""), "");
    }

    #[test]
    fn aliases_converge_on_one_canonical_name() {
        let resolver = loaded_resolver();
        let a = resolver.resolve("USA");
        let b = resolver.resolve("United States of America");
        assert_eq!(a.canonical_name(), "United States");
        assert_eq!(a, b);
    }

    #[test]
    fn admin_match_adopts_iso_codes() {
        let resolver = loaded_resolver();
        let id = resolver.resolve("france");
        assert_eq!(id.canonical_name(), "France");
        assert_eq!(id.iso_code(), Some("FR"));
        assert!(!id.flag_glyph().is_empty());
    }

    #[test]
    fn aliased_admin_name_still_reaches_its_feature() {
        // The dataset says "United States of America"; the alias target is
        // "United States". The working name must still pick up the ISO code.
        let resolver = loaded_resolver();
        let id = resolver.resolve("usa");
        assert_eq!(id.iso_code(), Some("US"));
    }

    #[test]
    fn iso_reverse_lookup_adopts_canonical_name() {
        let resolver = loaded_resolver();
        assert_eq!(resolver.resolve("FR").canonical_name(), "France");
        assert_eq!(resolver.resolve("fra").canonical_name(), "France");
        // Reverse lookup through an aliased admin name lands on the alias target.
        assert_eq!(resolver.resolve("US").canonical_name(), "United States");
    }

    #[test]
    fn empty_input_is_an_empty_identity() {
        let resolver = loaded_resolver();
        let id = resolver.resolve("   ");
        assert_eq!(id.canonical_name(), "");
        assert_eq!(id.iso_code(), None);
        assert_eq!(id.flag_glyph(), "");
    }

    #[test]
    fn unmatched_names_fall_back_to_cleaned_input() {
        let resolver = loaded_resolver();
        let id = resolver.resolve("atlantis");
        assert_eq!(id.canonical_name(), "Atlantis");
        assert_eq!(id.iso_code(), None);
    }

    #[test]
    fn resolution_works_without_boundary_data() {
        let resolver = CountryIdentityResolver::with_builtin_aliases();
        let id = resolver.resolve("Russian Federation");
        assert_eq!(id.canonical_name(), "Russia");
        assert_eq!(id.iso_code(), None);
    }

    #[test]
    fn feature_without_iso_a2_resolves_without_flag() {
        let resolver = loaded_resolver();
        let id = resolver.resolve("Norway");
        assert_eq!(id.canonical_name(), "Norway");
        assert_eq!(id.iso_code(), None);
        assert_eq!(id.flag_glyph(), "");
    }

    #[test]
    fn drift_check_reports_targets_missing_from_dataset() {
        let resolver = loaded_resolver();
        let unmatched = resolver.unmatched_alias_targets();
        assert!(unmatched.contains(&"Russia".to_string()));
        assert!(!unmatched.contains(&"United States".to_string()));

        let empty = CountryIdentityResolver::with_builtin_aliases();
        assert!(empty.unmatched_alias_targets().is_empty());
    }
}
