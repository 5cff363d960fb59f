use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use lancard_core::{LanguagePair, LanguageRegistry, create};

use crate::console::Console;

const CREATE_PROMPT: &str = "Input pair of languages (e.g. ru,cz) or empty string to quit";

/// Registry with every bundled language plugin
pub fn registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    lancard_lang_czech::register(&mut registry);
    registry
}

/// Parse `original,meaning` language codes
pub fn parse_languages(input: &str) -> Result<LanguagePair, String> {
    let codes: Vec<&str> = input.split(',').map(str::trim).collect();
    match codes.as_slice() {
        [original, meaning] if !original.is_empty() && !meaning.is_empty() => {
            Ok(LanguagePair::new(*original, *meaning))
        }
        _ => Err(format!(
            "expected two comma-separated language codes, got '{}'",
            input.trim()
        )),
    }
}

/// Make sure the dictionary file exists, offering to create it.
///
/// Returns `false` when the user declines, in which case nothing is written.
pub fn ensure_dictionary<R: BufRead, W: Write>(
    path: &Path,
    console: &mut Console<R, W>,
) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(true);
    }

    console.say("Data file does not exist, create?")?;
    loop {
        let Some(line) = console.read_line(CREATE_PROMPT)? else {
            console.say("")?;
            return Ok(false);
        };
        if line.trim().is_empty() {
            return Ok(false);
        }

        match parse_languages(&line) {
            Ok(languages) => {
                create(path, languages)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                return Ok(true);
            }
            Err(e) => console.say(format_args!("ERROR: {e}"))?,
        }
    }
}
