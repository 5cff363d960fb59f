pub mod dictionary;
pub mod drill;
pub mod error;
pub mod language;
pub mod store;

pub use dictionary::{DictionaryFile, FORMAT_VERSION, LanguagePair, create};
pub use drill::{Direction, Drill, DrillOrder};
pub use error::{DrillError, StoreError, StoreResult};
pub use language::{LanguageRegistry, Normalizer, Passthrough, Replacements, SharedNormalizer};
pub use store::Store;
