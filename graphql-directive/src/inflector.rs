use convert_case::{Case, Casing};

/// String transforms used to derive a type name from a field name.
pub trait Inflector: Send + Sync {
    fn to_type_case(&self, s: &str) -> String;
    fn to_singular(&self, s: &str) -> String;
}

/// English-only inflector: PascalCase type names and rule-based singulars.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInflector;

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("women", "woman"),
    ("men", "man"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
];

const UNCOUNTABLE: &[&str] = &["news", "series", "species", "information", "equipment"];

const SIBILANT_PLURALS: &[&str] = &["sses", "shes", "ches", "xes", "zzes"];

const SINGULAR_S_ENDINGS: &[&str] = &["ss", "us", "is"];

impl Inflector for DefaultInflector {
    fn to_type_case(&self, s: &str) -> String {
        s.to_case(Case::Pascal)
    }

    fn to_singular(&self, s: &str) -> String {
        singularize(s)
    }
}

fn singularize(word: &str) -> String {
    // ASCII lowering keeps byte offsets aligned with `word`.
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }

    for (plural, singular) in IRREGULAR {
        if !lower.ends_with(plural) {
            continue;
        }
        let stem_len = word.len() - plural.len();
        // Whole word or a camelCase segment only, so `omen` stays `omen`.
        if stem_len == 0 || word[stem_len..].starts_with(|c: char| c.is_ascii_uppercase()) {
            return replace_suffix(word, stem_len, singular);
        }
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }

    if SIBILANT_PLURALS.iter().any(|p| lower.ends_with(p)) {
        return word[..word.len() - 2].to_string();
    }

    if SINGULAR_S_ENDINGS.iter().any(|e| lower.ends_with(e)) {
        return word.to_string();
    }

    if lower.len() > 1 && lower.ends_with('s') {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Swaps the trailing irregular segment, keeping a leading capital on it
/// (`userChildren` -> `userChild`).
fn replace_suffix(word: &str, stem_len: usize, singular: &str) -> String {
    let capitalized = word[stem_len..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase());

    let mut out = String::with_capacity(stem_len + singular.len());
    out.push_str(&word[..stem_len]);
    if capitalized {
        let mut chars = singular.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(singular);
    }
    out
}
