//! Line tokenization and command lookup shared by the main loop and drills.

use std::mem;

/// Outcome of handling one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// End the whole session
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unterminated quote in input")]
    UnterminatedQuote,

    #[error("Trailing backslash in input")]
    TrailingEscape,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("No such command: {0}")]
    NoSuchCommand(String),

    #[error("Ambiguous command {command}, candidates are {candidates}")]
    Ambiguous { command: String, candidates: String },
}

/// Split a line into words the way a POSIX shell would.
///
/// Whitespace separates words, single quotes are literal, double quotes allow
/// `\"` and `\\`, and a backslash outside quotes escapes the next character.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if started {
                    tokens.push(mem::take(&mut current));
                    started = false;
                }
            }
            '\'' => {
                started = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            '"' => {
                started = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(ParseError::UnterminatedQuote),
                        },
                        Some(c) => current.push(c),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            '\\' => {
                started = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => return Err(ParseError::TrailingEscape),
                }
            }
            c => {
                started = true;
                current.push(c);
            }
        }
    }

    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Resolve a typed command against a table by exact name or unique prefix.
///
/// When nothing matches and a `default` handler exists, it receives the line.
pub fn matching_command<'a, T: Copy>(
    command: &'a str,
    table: &'a [(&'a str, T)],
    default: Option<T>,
) -> Result<(&'a str, T), MatchError> {
    let candidates: Vec<(&str, T)> = table
        .iter()
        .copied()
        .filter(|(name, _)| name.starts_with(command))
        .collect();

    if let Some(exact) = candidates.iter().find(|(name, _)| *name == command) {
        return Ok(*exact);
    }

    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => default
            .map(|handler| (command, handler))
            .ok_or_else(|| MatchError::NoSuchCommand(command.to_string())),
        many => Err(MatchError::Ambiguous {
            command: command.to_string(),
            candidates: many
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain() {
        assert_eq!(tokenize("  add a=b  c=d ").unwrap(), vec!["add", "a=b", "c=d"]);
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"add word2="quoted meaning2" 'it''s'"#).unwrap(),
            vec!["add", "word2=quoted meaning2", "its"]
        );
        assert_eq!(tokenize(r#""" x"#).unwrap(), vec!["", "x"]);
        assert_eq!(tokenize(r#""say \"hi\" \n""#).unwrap(), vec![r#"say "hi" \n"#]);
        assert_eq!(tokenize(r"a\ b").unwrap(), vec!["a b"]);
    }

    #[test]
    fn test_tokenize_backtick_digraphs_survive() {
        assert_eq!(tokenize("add hl`ava=head").unwrap(), vec!["add", "hl`ava=head"]);
    }

    #[test]
    fn test_tokenize_errors() {
        assert_eq!(tokenize("add x=\"oops"), Err(ParseError::UnterminatedQuote));
        assert_eq!(tokenize("'open"), Err(ParseError::UnterminatedQuote));
        assert_eq!(tokenize("trailing\\"), Err(ParseError::TrailingEscape));
    }

    const TABLE: &[(&str, u8)] = &[("add", 1), ("add!", 2), ("list", 3), ("help", 4), ("?", 4)];

    #[test]
    fn test_match_exact_and_prefix() {
        assert_eq!(matching_command("add", TABLE, None), Ok(("add", 1)));
        assert_eq!(matching_command("add!", TABLE, None), Ok(("add!", 2)));
        assert_eq!(matching_command("l", TABLE, None), Ok(("list", 3)));
        assert_eq!(matching_command("?", TABLE, None), Ok(("?", 4)));
    }

    #[test]
    fn test_match_ambiguous() {
        assert_eq!(
            matching_command("a", TABLE, None),
            Err(MatchError::Ambiguous {
                command: "a".into(),
                candidates: "add, add!".into()
            })
        );
    }

    #[test]
    fn test_match_missing_and_default() {
        assert_eq!(
            matching_command("zzz", TABLE, None),
            Err(MatchError::NoSuchCommand("zzz".into()))
        );
        assert_eq!(matching_command("zzz", TABLE, Some(0)), Ok(("zzz", 0)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MatchError::NoSuchCommand("x".into()).to_string(),
            "No such command: x"
        );
        assert_eq!(
            MatchError::Ambiguous {
                command: "a".into(),
                candidates: "add, add!".into()
            }
            .to_string(),
            "Ambiguous command a, candidates are add, add!"
        );
    }
}
