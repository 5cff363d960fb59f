pub mod normalizer;

pub use normalizer::{CzechNormalizer, PATTERNS};

use lancard_core::LanguageRegistry;

/// Add the Czech normalizer to a registry
pub fn register(registry: &mut LanguageRegistry) {
    registry.register(CzechNormalizer::new());
}
