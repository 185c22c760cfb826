use crate::flag::flag_glyph;

/// The single, deduplicated representation of a country used for aggregation
/// and display.
///
/// Invariant: a kept ISO code always derives a non-empty flag glyph. Codes
/// that cannot be rendered are dropped at construction instead of leaking a
/// flagless "coded" identity.
#[derive(Debug, Clone)]
pub struct CountryIdentity {
    canonical_name: String,
    iso_code: Option<String>,
    flag_glyph: String,
}

impl CountryIdentity {
    pub fn new(canonical_name: impl Into<String>, iso_code: Option<&str>) -> Self {
        let (iso_code, flag) = match iso_code {
            Some(code) => {
                let flag = flag_glyph(code);
                if flag.is_empty() {
                    (None, String::new())
                } else {
                    (Some(code.trim().to_ascii_uppercase()), flag)
                }
            }
            None => (None, String::new()),
        };

        Self {
            canonical_name: canonical_name.into(),
            iso_code,
            flag_glyph: flag,
        }
    }

    /// Best-effort identity carrying only a cleaned input string.
    pub fn unmatched(canonical_name: impl Into<String>) -> Self {
        Self::new(canonical_name, None)
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn iso_code(&self) -> Option<&str> {
        self.iso_code.as_deref()
    }

    pub fn flag_glyph(&self) -> &str {
        &self.flag_glyph
    }

    /// Aggregation key: the ISO code when known, else the canonical name.
    pub fn bucket_key(&self) -> String {
        match &self.iso_code {
            Some(code) => code.clone(),
            None => self.canonical_name.clone(),
        }
    }
}

// Two identities are the same country iff their canonical names match
// case-insensitively; ISO code and flag are derived decoration.
impl PartialEq for CountryIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name
            .eq_ignore_ascii_case(&other.canonical_name)
    }
}

impl Eq for CountryIdentity {}

impl std::hash::Hash for CountryIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical_name.to_ascii_lowercase().hash(state);
    }
}

impl std::fmt::Display for CountryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.flag_glyph.is_empty() {
            f.write_str(&self.canonical_name)
        } else {
            write!(f, "{} {}", self.flag_glyph, self.canonical_name)
        }
    }
}
