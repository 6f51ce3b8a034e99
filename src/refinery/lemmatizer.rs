// * Noun Lemmatizer
// * Reduces plural noun forms to their dictionary base form using an exception
// * table followed by ordered suffix rules. Tokens are expected lowercased.

use std::collections::{HashMap, HashSet};

// * Irregular plurals and forms the suffix rules would get wrong
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("media", "medium"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("hypotheses", "hypothesis"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("wolves", "wolf"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("calories", "calorie"),
    ("rookies", "rookie"),
    ("brownies", "brownie"),
    ("smoothies", "smoothie"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("headaches", "headache"),
];

// * Words ending in "s" that are already base forms
const INVARIANT_FORMS: &[&str] = &[
    "news", "series", "species", "physics", "mathematics", "economics", "ethics", "politics",
    "analytics", "always", "perhaps", "whereas", "various", "previous", "atlas", "canvas",
    "bias", "alias", "gas", "lens", "yes", "chaos", "data", "people",
];

// * Endings that look plural but mark singular nouns or adjectives
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ous"];

// * Sibilant endings that take "es" in the plural
const SIBILANT_ENDINGS: &[&str] = &["sses", "xes", "zes", "ches", "shes"];

// * Shortest token the suffix rules are applied to
const MIN_RULE_LENGTH: usize = 4;

/// Dictionary-free noun lemmatizer
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
            invariant: INVARIANT_FORMS.iter().copied().collect(),
        }
    }

    /// Returns the base form of a lowercased token
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(base) = self.irregular.get(token) {
            return (*base).to_string();
        }
        if self.invariant.contains(token) || token.chars().count() < MIN_RULE_LENGTH {
            return token.to_string();
        }

        // * -ies -> -y (strategies -> strategy); short words like "lies" fall through
        if let Some(stem) = token.strip_suffix("ies") {
            if stem.chars().count() > 1 {
                return format!("{stem}y");
            }
        }

        // * Sibilant plurals drop "es" (searches -> search, classes -> class)
        if SIBILANT_ENDINGS.iter().any(|ending| token.ends_with(ending)) {
            return token[..token.len() - 2].to_string();
        }

        if SINGULAR_ENDINGS.iter().any(|ending| token.ends_with(ending)) {
            return token.to_string();
        }

        match token.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => token.to_string(),
        }
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("pages"), "page");
        assert_eq!(lemmatizer.lemmatize("practices"), "practice");
        assert_eq!(lemmatizer.lemmatize("links"), "link");
        assert_eq!(lemmatizer.lemmatize("strategies"), "strategy");
        assert_eq!(lemmatizer.lemmatize("searches"), "search");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("classes"), "class");
    }

    #[test]
    fn test_irregular_forms() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("criteria"), "criterion");
        assert_eq!(lemmatizer.lemmatize("caches"), "cache");
    }

    #[test]
    fn test_singular_forms_untouched() {
        let lemmatizer = Lemmatizer::new();
        for word in ["business", "status", "analysis", "famous", "news", "linking", "seo", "soup"] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_short_tokens() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("its"), "its");
        assert_eq!(lemmatizer.lemmatize("bus"), "bus");
        assert_eq!(lemmatizer.lemmatize("lies"), "lie");
    }
}
