use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dictionary::{DictionaryFile, LanguagePair};
use crate::error::{StoreError, StoreResult};
use crate::language::{LanguageRegistry, Normalizer, SharedNormalizer};

/// Open dictionary session.
///
/// Keeps the word index and its inverse in memory. Changes are written back by
/// [`Store::save`] or [`Store::close`]; a store dropped without being closed
/// saves itself.
pub struct Store {
    path: PathBuf,
    languages: LanguagePair,
    direct_index: BTreeMap<String, String>,
    reverse_index: BTreeMap<String, String>,
    original_plugin: SharedNormalizer,
    meaning_plugin: SharedNormalizer,
    closed: bool,
}

impl Store {
    /// Load a dictionary file and resolve normalizers for both languages
    pub fn open(path: impl AsRef<Path>, registry: &LanguageRegistry) -> StoreResult<Self> {
        let path = path.as_ref();
        let document = DictionaryFile::read_from(path)?;
        Ok(Self::from_document(path.to_path_buf(), document, registry))
    }

    fn from_document(path: PathBuf, document: DictionaryFile, registry: &LanguageRegistry) -> Self {
        let DictionaryFile {
            languages, index, ..
        } = document;

        // Two words sharing a meaning leave the later one in the inverse index
        let reverse_index = index
            .iter()
            .map(|(word, meaning)| (meaning.clone(), word.clone()))
            .collect();

        let original_plugin = registry.resolve(languages.original());
        let meaning_plugin = registry.resolve(languages.meaning());

        Self {
            path,
            languages,
            direct_index: index,
            reverse_index,
            original_plugin,
            meaning_plugin,
            closed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    /// Word to meaning, sorted by word
    pub fn direct_index(&self) -> &BTreeMap<String, String> {
        &self.direct_index
    }

    /// Meaning to word
    pub fn reverse_index(&self) -> &BTreeMap<String, String> {
        &self.reverse_index
    }

    pub fn original_plugin(&self) -> &dyn Normalizer {
        self.original_plugin.as_ref()
    }

    pub fn meaning_plugin(&self) -> &dyn Normalizer {
        self.meaning_plugin.as_ref()
    }

    pub fn len(&self) -> usize {
        self.direct_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct_index.is_empty()
    }

    /// Normalize and insert a word with its meaning.
    ///
    /// Without `may_overwrite`, an existing normalized word is left untouched
    /// and [`StoreError::AlreadyExists`] is returned.
    pub fn add(&mut self, word: &str, meaning: &str, may_overwrite: bool) -> StoreResult<()> {
        let word = self.original_plugin.convert(word);
        let meaning = self.meaning_plugin.convert(meaning);

        if !may_overwrite && self.direct_index.contains_key(&word) {
            return Err(StoreError::AlreadyExists(word));
        }

        tracing::debug!("Adding '{}' = '{}'", word, meaning);
        if let Some(previous) = self.direct_index.insert(word.clone(), meaning.clone()) {
            if previous != meaning && self.reverse_index.get(&previous) == Some(&word) {
                self.release_meaning(&previous);
            }
        }
        self.reverse_index.insert(meaning, word);
        Ok(())
    }

    /// Hand a meaning whose word moved on to another word that still has it,
    /// picking the one a reload would pick, or forget it
    fn release_meaning(&mut self, meaning: &str) {
        let owner = self
            .direct_index
            .iter()
            .rev()
            .find(|(_, m)| m.as_str() == meaning)
            .map(|(w, _)| w.clone());

        match owner {
            Some(owner) => {
                self.reverse_index.insert(meaning.to_string(), owner);
            }
            None => {
                self.reverse_index.remove(meaning);
            }
        }
    }

    /// Write the current index back to the dictionary file
    pub fn save(&self) -> StoreResult<()> {
        let document = DictionaryFile {
            languages: self.languages.clone(),
            index: self.direct_index.clone(),
            version: crate::dictionary::FORMAT_VERSION,
        };
        document.write_to(&self.path)
    }

    /// Save and release the store
    pub fn close(mut self) -> StoreResult<()> {
        self.closed = true;
        self.save()
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.save() {
            tracing::error!("Failed to save dictionary on drop: {}", e);
        }
    }
}
