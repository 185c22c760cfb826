/// Offset from an ASCII capital letter to its Unicode regional indicator
/// symbol ('A' + 127397 = 🇦). Two indicators side by side render as a flag.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Derives the flag emoji for a 2-letter ISO code.
///
/// Pure and deterministic; absent or malformed codes yield an empty string.
pub fn flag_glyph(iso_code: &str) -> String {
    let code = iso_code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return String::new();
    }
    code.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter_map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}
