
use std::io::Cursor;

use lancard_config::drill::DrillConfig;
use lancard_core::{LanguagePair, Store, create};
use tempfile::{TempDir, tempdir};

use crate::commands::Session;
use crate::console::Console;
use crate::setup;

/// Fresh cz -> en dictionary in a temporary directory
fn new_store() -> (TempDir, Store) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words");
    create(&path, LanguagePair::new("cz", "en")).unwrap();
    let store = Store::open(&path, &setup::registry()).unwrap();
    (dir, store)
}

fn seeded() -> DrillConfig {
    DrillConfig {
        seed: Some(3),
        ..DrillConfig::default()
    }
}

/// Feed a script to a session and return everything it printed
fn run_script(store: &mut Store, script: &str) -> String {
    run_bytes(store, script.as_bytes())
}

/// Same as [`run_script`] for input that need not be valid UTF-8
fn run_bytes(store: &mut Store, script: &[u8]) -> String {
    let mut console = Console::new(Cursor::new(script), Vec::new());
    Session::new(store, &mut console, &seeded()).run().unwrap();
    String::from_utf8(console.into_output()).unwrap()
}
