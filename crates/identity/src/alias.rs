use std::collections::BTreeMap;

/// Name variants mapped to the canonical display name used for aggregation.
///
/// Aliases exist to correct three kinds of drift: common shorthand ("USA",
/// "UK"), localized spellings ("Estados Unidos"), and places where the
/// boundary dataset's own naming differs from common usage ("Democratic
/// Republic of the Congo" vs "DR Congo"). Lookup is case-insensitive; the
/// table is explicit state owned by whoever resolves names, not a global.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    // Keyed by the lowercased alias.
    targets: BTreeMap<String, String>,
}

// Hand-maintained; drift against the live boundary dataset is reported by
// `CountryIdentityResolver::unmatched_alias_targets`.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("united states of america", "United States"),
    ("usa", "United States"),
    ("estados unidos", "United States"),
    ("estado unidos", "United States"),
    ("américa", "United States"),
    ("uk", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("britain", "United Kingdom"),
    ("reino unido", "United Kingdom"),
    ("russian federation", "Russia"),
    ("people's republic of china", "China"),
    ("mainland china", "China"),
    ("prc", "China"),
    ("republic of korea", "South Korea"),
    ("rok", "South Korea"),
    ("dprk", "North Korea"),
    ("democratic people's republic of korea", "North Korea"),
    ("republic of china", "Taiwan"),
    ("roc", "Taiwan"),
    ("chinese taipei", "Taiwan"),
    ("taipei", "Taiwan"),
    ("islamic republic of iran", "Iran"),
    ("türkiye", "Turkey"),
    ("republic of türkiye", "Turkey"),
    ("republic of turkiye", "Turkey"),
    ("republic of turkey", "Turkey"),
    ("uae", "United Arab Emirates"),
    ("ksa", "Saudi Arabia"),
    ("kingdom of saudi arabia", "Saudi Arabia"),
    ("republic of india", "India"),
    ("republic of south africa", "South Africa"),
    ("rsa", "South Africa"),
    ("the netherlands", "Netherlands"),
    ("holland", "Netherlands"),
    ("democratic republic of the congo", "DR Congo"),
    ("republic of the congo", "Congo"),
    ("united republic of tanzania", "Tanzania"),
    ("czech republic", "Czechia"),
    ("burma", "Myanmar"),
    ("swaziland", "Eswatini"),
    ("macedonia", "North Macedonia"),
];

impl AliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (alias, canonical) in BUILTIN_ALIASES {
            table.insert(alias, canonical);
        }
        table
    }

    pub fn insert(&mut self, alias: &str, canonical: &str) {
        self.targets
            .insert(alias.trim().to_lowercase(), canonical.to_string());
    }

    /// Looks up the canonical name for a variant, case-insensitively.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.targets
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Distinct canonical targets, for dataset drift validation.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let mut seen: Vec<&str> = self.targets.values().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.into_iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::AliasTable;

    #[test]
    fn lookup_is_case_insensitive() {
        let table = AliasTable::builtin();
        assert_eq!(table.canonical("USA"), Some("United States"));
        assert_eq!(table.canonical("Usa"), Some("United States"));
        assert_eq!(table.canonical("  uk "), Some("United Kingdom"));
    }

    #[test]
    fn unknown_names_miss() {
        let table = AliasTable::builtin();
        assert_eq!(table.canonical("Atlantis"), None);
        assert_eq!(table.canonical(""), None);
    }

    #[test]
    fn dataset_naming_corrections_are_present() {
        let table = AliasTable::builtin();
        assert_eq!(
            table.canonical("Democratic Republic of the Congo"),
            Some("DR Congo")
        );
        assert_eq!(table.canonical("Russian Federation"), Some("Russia"));
    }

    #[test]
    fn insert_extends_the_table() {
        let mut table = AliasTable::empty();
        table.insert("Deutschland", "Germany");
        assert_eq!(table.canonical("deutschland"), Some("Germany"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn targets_are_deduplicated() {
        let table = AliasTable::builtin();
        let targets: Vec<&str> = table.targets().collect();
        let us_count = targets.iter().filter(|t| **t == "United States").count();
        assert_eq!(us_count, 1);
    }
}
