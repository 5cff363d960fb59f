use std::io::{self, BufRead, Write};

use lancard_config::drill::DrillConfig;
use lancard_core::{Direction, Drill, DrillOrder, Normalizer, Store};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::console::Console;
use crate::repl::{Flow, matching_command, tokenize};

const HELP: &str = "
Welcome to Lancard, tool for learning words.

Commands:
> add word1=meaning1 word2=\"quoted meaning2\"
  Adds words with their meaning to the dictionary.
  Will never overwrite anything.
> add! word1=meaning1 word2=\"quoted meaning2\"
  The same as `add`, but will silently overwrite words.
> list
  List all words
> help
  Display this help
> quit
  Exit the program
> direct
  Start direct training mode (translate from foreign language)
> reverse
  Start reverse training mode (translate to foreign language)

When in training mode, commands are the following (note the slash):
> /quit
  Exit the training mode
> /skip
  Go to next word

Languages:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    Add { overwrite: bool },
    List,
    Train,
}

const COMMANDS: &[(&str, Command)] = &[
    ("quit", Command::Quit),
    ("?", Command::Help),
    ("help", Command::Help),
    ("add", Command::Add { overwrite: false }),
    ("add!", Command::Add { overwrite: true }),
    ("list", Command::List),
    ("direct", Command::Train),
    ("reverse", Command::Train),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrillCommand {
    Quit,
    Skip,
    Answer,
}

const DRILL_COMMANDS: &[(&str, DrillCommand)] =
    &[("/quit", DrillCommand::Quit), ("/skip", DrillCommand::Skip)];

/// Interactive session over one open store
pub struct Session<'s, R, W> {
    store: &'s mut Store,
    console: &'s mut Console<R, W>,
    order: DrillOrder,
    rng: StdRng,
}

impl<'s, R: BufRead, W: Write> Session<'s, R, W> {
    pub fn new(store: &'s mut Store, console: &'s mut Console<R, W>, config: &DrillConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            console,
            order: config.order,
            rng,
        }
    }

    /// Read and dispatch commands until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        self.report_missing_plugins()?;

        loop {
            let Some(line) = self.console.read_line("")? else {
                self.console.say("")?;
                return Ok(());
            };

            let tokens = match tokenize(line.trim()) {
                Ok(tokens) => tokens,
                Err(e) => {
                    self.console.say(format_args!("ERROR: {e}"))?;
                    continue;
                }
            };
            let Some((command, arguments)) = tokens.split_first() else {
                continue;
            };

            let flow = match matching_command(command, COMMANDS, None) {
                Ok((name, command)) => self.dispatch(name, command, arguments)?,
                Err(e) => {
                    self.console.say(e)?;
                    self.console.say("Type ? for help")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                tracing::debug!("Session finished");
                return Ok(());
            }
        }
    }

    fn report_missing_plugins(&mut self) -> io::Result<()> {
        let languages = self.store.languages().clone();
        let sides = [
            (languages.original(), self.store.original_plugin().present()),
            (languages.meaning(), self.store.meaning_plugin().present()),
        ];
        for (code, present) in sides {
            if !present {
                tracing::warn!("No plugin for language: {}", code);
                self.console.say(format_args!("No plugin for language: {code}"))?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, name: &str, command: Command, arguments: &[String]) -> io::Result<Flow> {
        tracing::debug!("Dispatching '{}' with {} arguments", name, arguments.len());
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.help()?,
            Command::Add { overwrite } => self.add(arguments, overwrite)?,
            Command::List => self.list()?,
            Command::Train => return self.train(name),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, arguments: &[String], may_overwrite: bool) -> io::Result<()> {
        let entries: Vec<&str> = arguments
            .iter()
            .map(|arg| arg.trim())
            .filter(|arg| !arg.is_empty())
            .collect();
        if entries.is_empty() {
            return self.console.say("ERROR: `add`: At least one argument required");
        }

        for entry in entries {
            let pair = entry
                .split_once('=')
                .map(|(word, meaning)| (word.trim(), meaning.trim()))
                .filter(|(word, meaning)| !word.is_empty() && !meaning.is_empty());

            let Some((word, meaning)) = pair else {
                let word = entry.split('=').next().unwrap_or(entry).trim();
                self.console
                    .say(format_args!("ERROR: meaning required for word: {word}"))?;
                continue;
            };

            if let Err(e) = self.store.add(word, meaning, may_overwrite) {
                self.console.say(e)?;
            }
        }
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        for (word, meaning) in self.store.direct_index() {
            self.console.say(format_args!("{word}\t{meaning}"))?;
        }
        Ok(())
    }

    fn help(&mut self) -> io::Result<()> {
        let languages = [self.store.original_plugin(), self.store.meaning_plugin()]
            .iter()
            .map(|plugin| describe_plugin(*plugin))
            .collect::<Vec<_>>()
            .join("\n\n");
        self.console.say(format_args!("{HELP}\n{languages}\n"))
    }

    fn train(&mut self, name: &str) -> io::Result<Flow> {
        let direction: Direction = match name.parse() {
            Ok(direction) => direction,
            Err(e) => {
                self.console.say(format_args!("ERROR: {e}"))?;
                return Ok(Flow::Continue);
            }
        };

        let mut drill = match Drill::with_order(&*self.store, direction, self.order, &mut self.rng)
        {
            Ok(drill) => drill,
            Err(e) => {
                self.console.say(format_args!("ERROR: {e}"))?;
                return Ok(Flow::Continue);
            }
        };

        run_drill(&mut drill, self.console)
    }
}

fn describe_plugin(plugin: &dyn Normalizer) -> String {
    format!("{}: {}", plugin.name(), plugin.help_text())
}

/// Drill sub-loop. Returns [`Flow::Quit`] only when input ends.
fn run_drill<'a, G, R, W>(drill: &mut Drill<'a, G>, console: &mut Console<R, W>) -> io::Result<Flow>
where
    G: Rng,
    R: BufRead,
    W: Write,
{
    let mut prompt = announce_next(drill, console)?;

    loop {
        let Some(line) = console.read_line(prompt)? else {
            console.say("")?;
            return Ok(Flow::Quit);
        };

        let tokens = match tokenize(line.trim()) {
            Ok(tokens) => tokens,
            Err(e) => {
                console.say(format_args!("ERROR: {e}"))?;
                continue;
            }
        };
        let Some(command) = tokens.first() else {
            continue;
        };

        match matching_command(command, DRILL_COMMANDS, Some(DrillCommand::Answer)) {
            Ok((_, DrillCommand::Quit)) => {
                tracing::debug!("Leaving {} drill after {} laps", drill.direction(), drill.laps());
                return Ok(Flow::Continue);
            }
            Ok((_, DrillCommand::Skip)) => prompt = announce_next(drill, console)?,
            Ok((_, DrillCommand::Answer)) => {
                if drill.check(&tokens.join(" ")) {
                    prompt = announce_next(drill, console)?;
                } else {
                    console.say("Wrong, try again")?;
                }
            }
            Err(e) => {
                console.say(e)?;
                console.say("Type ? for help")?;
            }
        }
    }
}

fn announce_next<'a, G, R, W>(drill: &mut Drill<'a, G>, console: &mut Console<R, W>) -> io::Result<&'a str>
where
    G: Rng,
    R: BufRead,
    W: Write,
{
    let challenge = drill.next_challenge();
    console.say(format_args!("Next word: {challenge}"))?;
    Ok(challenge)
}
