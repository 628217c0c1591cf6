//! # lru-replay
//!
//! Drives an [`lrucache::LruCache`] from a line-oriented command script.
//!
//! ```text
//! SET <key> <value...>   -> true | false   (key existed)
//! GET <key>              -> value | (nil)
//! DEL <key>              -> value | (nil)
//! CLEAR                  -> OK
//! LEN                    -> entry count
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Malformed lines get
//! an `ERR` reply and replay continues.

pub mod command;
pub mod replay;

pub use command::{parse_command, Command, ParseError};
pub use replay::{ReplaySummary, Replayer, Reply};
