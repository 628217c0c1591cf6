//! Executes parsed commands against an LRU cache

use std::fmt;
use std::io::{self, BufRead, Write};

use lrucache::{CacheConfig, LruCache};
use tracing::{debug, warn};

use crate::command::{parse_command, Command};

/// Reply written for each executed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Result of SET: whether the key already existed
    Existed(bool),
    /// Result of GET/DEL
    Value(Option<String>),
    /// Result of CLEAR
    Ok,
    /// Result of LEN
    Count(usize),
    /// Line could not be parsed
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Existed(existed) => write!(f, "{}", existed),
            Reply::Value(Some(value)) => write!(f, "{}", value),
            Reply::Value(None) => write!(f, "(nil)"),
            Reply::Ok => write!(f, "OK"),
            Reply::Count(n) => write!(f, "{}", n),
            Reply::Error(msg) => write!(f, "ERR {}", msg),
        }
    }
}

/// Counters for one replay run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands executed
    pub commands: usize,
    /// Lines rejected by the parser
    pub errors: usize,
}

/// Owns the cache a script is replayed against
pub struct Replayer {
    cache: LruCache<String, String>,
}

impl Replayer {
    /// Create a replayer over a fresh cache
    pub fn new(config: &CacheConfig) -> lrucache::Result<Self> {
        Ok(Self {
            cache: LruCache::with_config(config)?,
        })
    }

    /// Run one command
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Set { key, value } => Reply::Existed(self.cache.set(key, value)),
            Command::Get { key } => Reply::Value(self.cache.get(key.as_str()).cloned()),
            Command::Del { key } => Reply::Value(self.cache.remove(key.as_str())),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
            Command::Len => Reply::Count(self.cache.len()),
        }
    }

    /// Parse and run one line; `None` for blank lines and comments
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        match parse_command(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(e) => Some(Reply::Error(e.to_string())),
        }
    }

    /// Replay every line of `input`, writing one reply per command to `out`
    pub fn replay<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
    ) -> io::Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (lineno, raw) in input.split(b'\n').enumerate() {
            let mut raw = raw?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }

            let reply = match String::from_utf8(raw) {
                Ok(line) => match self.handle_line(&line) {
                    Some(reply) => reply,
                    None => continue,
                },
                Err(_) => Reply::Error("invalid UTF-8".to_string()),
            };

            if let Reply::Error(msg) = &reply {
                warn!("line {}: {}", lineno + 1, msg);
                summary.errors += 1;
            } else {
                debug!("line {}: {}", lineno + 1, reply);
                summary.commands += 1;
            }

            writeln!(out, "{}", reply)?;
        }

        out.flush()?;
        Ok(summary)
    }

    /// Current number of cached entries
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replayer(capacity: usize) -> Replayer {
        Replayer::new(&CacheConfig::new(capacity)).unwrap()
    }

    #[test]
    fn test_execute_set_get() {
        let mut r = replayer(2);

        let reply = r.execute(Command::Set {
            key: "a".to_string(),
            value: "1".to_string(),
        });
        assert_eq!(reply, Reply::Existed(false));

        let reply = r.execute(Command::Get { key: "a".to_string() });
        assert_eq!(reply, Reply::Value(Some("1".to_string())));
    }

    #[test]
    fn test_handle_line_eviction() {
        let mut r = replayer(2);

        r.handle_line("SET A 1");
        r.handle_line("SET B 2");
        r.handle_line("SET C 3");

        assert_eq!(r.handle_line("GET A"), Some(Reply::Value(None)));
        assert_eq!(r.handle_line("LEN"), Some(Reply::Count(2)));
    }

    #[test]
    fn test_handle_line_del_and_clear() {
        let mut r = replayer(4);

        r.handle_line("SET a x");
        assert_eq!(
            r.handle_line("DEL a"),
            Some(Reply::Value(Some("x".to_string())))
        );
        assert_eq!(r.handle_line("DEL a"), Some(Reply::Value(None)));

        r.handle_line("SET b y");
        assert_eq!(r.handle_line("CLEAR"), Some(Reply::Ok));
        assert!(r.is_empty());
    }

    #[test]
    fn test_handle_line_skips_comments() {
        let mut r = replayer(1);
        assert_eq!(r.handle_line("# nothing"), None);
        assert_eq!(r.handle_line(""), None);
    }

    #[test]
    fn test_reply_display() {
        assert_eq!(Reply::Existed(true).to_string(), "true");
        assert_eq!(Reply::Value(None).to_string(), "(nil)");
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(Reply::Count(3).to_string(), "3");
        assert_eq!(Reply::Error("bad".to_string()).to_string(), "ERR bad");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(Replayer::new(&CacheConfig::new(0)).is_err());
    }
}
