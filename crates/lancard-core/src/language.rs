use std::collections::HashMap;
use std::sync::Arc;

/// Text normalization interface for language implementations
pub trait Normalizer: Send + Sync {
    /// Language code the normalizer is registered under ("cz", "en", ...)
    fn language_code(&self) -> &str;

    /// Display name used in help output
    fn name(&self) -> &str;

    /// Convert a word into the form it is stored and compared in
    fn convert(&self, word: &str) -> String;

    /// Whether a real plugin backs this language
    fn present(&self) -> bool {
        true
    }

    /// Input hints for the help screen
    fn help_text(&self) -> String {
        String::new()
    }
}

pub type SharedNormalizer = Arc<dyn Normalizer>;

/// Identity normalizer for languages without a plugin
#[derive(Debug, Clone)]
pub struct Passthrough {
    code: String,
}

impl Passthrough {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl Normalizer for Passthrough {
    fn language_code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        "Passthrough"
    }

    fn convert(&self, word: &str) -> String {
        word.to_string()
    }

    fn present(&self) -> bool {
        false
    }
}

/// Ordered list of literal substring replacements.
///
/// Each pattern is replaced globally in declaration order, so later patterns
/// see the output of earlier ones.
#[derive(Debug, Clone, Copy)]
pub struct Replacements {
    patterns: &'static [(&'static str, &'static str)],
}

impl Replacements {
    pub const fn new(patterns: &'static [(&'static str, &'static str)]) -> Self {
        Self { patterns }
    }

    pub fn apply(&self, word: &str) -> String {
        self.patterns
            .iter()
            .fold(word.to_string(), |acc, (pattern, replacement)| {
                acc.replace(pattern, replacement)
            })
    }

    /// One `- pattern = replacement` line per entry
    pub fn describe(&self) -> String {
        self.patterns
            .iter()
            .map(|(pattern, replacement)| format!("- {pattern} = {replacement}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Static mapping from language code to normalizer
#[derive(Default, Clone)]
pub struct LanguageRegistry {
    plugins: HashMap<String, SharedNormalizer>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a normalizer under its own language code, replacing any previous one
    pub fn register(&mut self, normalizer: impl Normalizer + 'static) -> &mut Self {
        let code = normalizer.language_code().to_string();
        tracing::debug!("Registering normalizer for language: {}", code);
        self.plugins.insert(code, Arc::new(normalizer));
        self
    }

    /// Look up by exact code; unknown codes fall back to passthrough
    pub fn resolve(&self, code: &str) -> SharedNormalizer {
        match self.plugins.get(code) {
            Some(plugin) => Arc::clone(plugin),
            None => {
                tracing::debug!("No normalizer registered for '{}', using passthrough", code);
                Arc::new(Passthrough::new(code))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubled;

    impl Normalizer for Doubled {
        fn language_code(&self) -> &str {
            "xx"
        }

        fn name(&self) -> &str {
            "Doubled"
        }

        fn convert(&self, word: &str) -> String {
            Replacements::new(&[("bb", "BB")]).apply(word)
        }
    }

    #[test]
    fn replacements_are_global() {
        assert_eq!(Doubled.convert("abbccbb"), "aBBccBB");
    }

    #[test]
    fn replacements_apply_in_declared_order() {
        let chained = Replacements::new(&[("ab", "c"), ("cc", "d")]);
        assert_eq!(chained.apply("abc"), "d");

        let reversed = Replacements::new(&[("cc", "d"), ("ab", "c")]);
        assert_eq!(reversed.apply("abc"), "cc");
    }

    #[test]
    fn replacements_describe() {
        let r = Replacements::new(&[("`a", "á"), ("~s", "š")]);
        assert_eq!(r.describe(), "- `a = á\n- ~s = š");
    }

    #[test]
    fn passthrough_is_not_present() {
        let p = Passthrough::new("en");
        assert!(!p.present());
        assert_eq!(p.convert("Hello "), "Hello ");
        assert_eq!(p.language_code(), "en");
    }

    #[test]
    fn plugins_are_present_by_default() {
        assert!(Doubled.present());
    }

    #[test]
    fn resolve_registered_and_unknown() {
        let mut registry = LanguageRegistry::new();
        registry.register(Doubled);

        let found = registry.resolve("xx");
        assert!(found.present());
        assert_eq!(found.name(), "Doubled");

        let missing = registry.resolve("XX");
        assert!(!missing.present());
        assert_eq!(missing.language_code(), "XX");
        assert_eq!(missing.convert("abbccbb"), "abbccbb");
    }
}
