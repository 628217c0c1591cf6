//! Command line parser using nom

use std::fmt;

use nom::{
    bytes::complete::take_till1,
    character::complete::{space0, space1},
    combinator::{all_consuming, rest},
    sequence::{delimited, pair, preceded},
    IResult,
};

/// A parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert or update a value
    Set {
        /// Cache key
        key: String,
        /// Value, internal spaces preserved
        value: String,
    },
    /// Look up a value
    Get {
        /// Cache key
        key: String,
    },
    /// Remove a value
    Del {
        /// Cache key
        key: String,
    },
    /// Drop every entry
    Clear,
    /// Report the entry count
    Len,
}

/// Reasons a script line is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Verb is not one of SET, GET, DEL, CLEAR, LEN
    UnknownCommand(String),

    /// Verb is known but its arguments are malformed
    WrongArguments(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(verb) => write!(f, "unknown command '{}'", verb),
            ParseError::WrongArguments(verb) => {
                write!(f, "wrong number of arguments for '{}' command", verb)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one script line
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (args, verb) =
        verb(line).map_err(|_| ParseError::UnknownCommand(line.to_string()))?;

    let command = match verb.to_ascii_uppercase().as_str() {
        "SET" => {
            let (_, (key, value)) =
                key_and_value(args).map_err(|_| ParseError::WrongArguments("set"))?;
            Command::Set {
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        "GET" => {
            let (_, key) = single_key(args).map_err(|_| ParseError::WrongArguments("get"))?;
            Command::Get {
                key: key.to_string(),
            }
        }
        "DEL" => {
            let (_, key) = single_key(args).map_err(|_| ParseError::WrongArguments("del"))?;
            Command::Del {
                key: key.to_string(),
            }
        }
        "CLEAR" => {
            no_args(args).map_err(|_| ParseError::WrongArguments("clear"))?;
            Command::Clear
        }
        "LEN" => {
            no_args(args).map_err(|_| ParseError::WrongArguments("len"))?;
            Command::Len
        }
        _ => return Err(ParseError::UnknownCommand(verb.to_string())),
    };

    Ok(Some(command))
}

fn verb(input: &str) -> IResult<&str, &str> {
    token(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn single_key(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(space1, token, space0))(input)
}

fn key_and_value(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(pair(preceded(space1, token), preceded(space1, rest)))(input)
}

fn no_args(input: &str) -> IResult<&str, &str> {
    all_consuming(space0)(input)
}
