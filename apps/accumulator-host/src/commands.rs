//! Line protocol spoken by the host on stdin/stdout.
//!
//! ```text
//! open <caller-id>             -> session <handle>
//! read <handle> [max_len]      -> <line> | eof
//! seek <handle> <position>     -> ok
//! write <handle> <payload...>  -> wrote <bytes>
//! close <handle>               -> closed
//! ```
//!
//! Failures reply `error <CODE> <message>`. Blank lines and `#` comments get no reply.

use std::str::FromStr;

use accumulator_sdk::{AccumulatorEndpointV1, CallerId, SessionHandle};
use thiserror::Error;

/// Read size used when the command gives none.
pub const DEFAULT_READ_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open {
        caller: CallerId,
    },
    Read {
        session: SessionHandle,
        max_len: usize,
    },
    Seek {
        session: SessionHandle,
        position: u64,
    },
    /// `payload` already carries the trailing newline a shell `echo` would add.
    Write {
        session: SessionHandle,
        payload: Vec<u8>,
    },
    Close {
        session: SessionHandle,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownVerb(String),

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("invalid <{name}> '{value}'")]
    InvalidArgument { name: &'static str, value: String },

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

fn parse_arg<T: FromStr>(name: &'static str, raw: Option<&str>) -> Result<T, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument(name))?;
    raw.parse().map_err(|_| CommandError::InvalidArgument {
        name,
        value: raw.to_owned(),
    })
}

fn no_more(rest: Option<&str>) -> Result<(), CommandError> {
    match rest {
        Some(extra) => Err(CommandError::TrailingInput(extra.to_owned())),
        None => Ok(()),
    }
}

impl Command {
    /// Parses one input line. Returns `Ok(None)` for blank lines and comments.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the verb or its arguments are malformed.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

        // `write` keeps its payload verbatim, so it is split by hand.
        if verb == "write" {
            let (handle, payload) = rest.split_once(' ').unwrap_or((rest, ""));
            let handle = (!handle.is_empty()).then_some(handle);
            let session = SessionHandle::new(parse_arg("handle", handle)?);
            let mut payload = payload.as_bytes().to_vec();
            payload.push(b'\n');
            return Ok(Some(Self::Write { session, payload }));
        }

        let mut args = rest.split_whitespace();
        let command = match verb {
            "open" => Self::Open {
                caller: CallerId::new(parse_arg("caller-id", args.next())?),
            },
            "read" => Self::Read {
                session: SessionHandle::new(parse_arg("handle", args.next())?),
                max_len: match args.next() {
                    Some(raw) => parse_arg("max_len", Some(raw))?,
                    None => DEFAULT_READ_LEN,
                },
            },
            "seek" => Self::Seek {
                session: SessionHandle::new(parse_arg("handle", args.next())?),
                position: parse_arg("position", args.next())?,
            },
            "close" => Self::Close {
                session: SessionHandle::new(parse_arg("handle", args.next())?),
            },
            other => return Err(CommandError::UnknownVerb(other.to_owned())),
        };
        no_more(args.next())?;
        Ok(Some(command))
    }

    /// Runs the command against `endpoint` and renders the reply line.
    #[must_use]
    pub fn execute(self, endpoint: &dyn AccumulatorEndpointV1) -> String {
        let reply = match self {
            Self::Open { caller } => endpoint.open(caller).map(|s| format!("session {s}\n")),
            Self::Read { session, max_len } => endpoint.read(session, max_len).map(|bytes| {
                if bytes.is_empty() {
                    "eof\n".to_owned()
                } else {
                    String::from_utf8_lossy(&bytes).into_owned()
                }
            }),
            Self::Seek { session, position } => {
                endpoint.seek(session, position).map(|()| "ok\n".to_owned())
            }
            Self::Write { session, payload } => endpoint
                .write(session, &payload)
                .map(|n| format!("wrote {n}\n")),
            Self::Close { session } => endpoint.close(session).map(|()| "closed\n".to_owned()),
        };
        reply.unwrap_or_else(|e| format!("error {} {e}\n", e.code()))
    }
}

/// Parses and executes one line; `None` means the line needs no reply.
#[must_use]
pub fn dispatch(endpoint: &dyn AccumulatorEndpointV1, line: &str) -> Option<String> {
    match Command::parse(line) {
        Ok(Some(command)) => Some(command.execute(endpoint)),
        Ok(None) => None,
        Err(e) => Some(format!("error EINVAL {e}\n")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use accumulator::Service;
    use accumulator::domain::policy::{AllowAll, OwnerOnly};

    use super::*;

    fn run(svc: &Service, script: &str) -> String {
        script.lines().filter_map(|l| dispatch(svc, l)).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("open 1000").unwrap(),
            Some(Command::Open {
                caller: CallerId::new(1000)
            })
        );
        assert_eq!(
            Command::parse("read 3").unwrap(),
            Some(Command::Read {
                session: SessionHandle::new(3),
                max_len: DEFAULT_READ_LEN
            })
        );
        assert_eq!(
            Command::parse("read 3 2").unwrap(),
            Some(Command::Read {
                session: SessionHandle::new(3),
                max_len: 2
            })
        );
        assert_eq!(
            Command::parse("seek 3 0\r\n").unwrap(),
            Some(Command::Seek {
                session: SessionHandle::new(3),
                position: 0
            })
        );
        assert_eq!(
            Command::parse("close 3").unwrap(),
            Some(Command::Close {
                session: SessionHandle::new(3)
            })
        );
    }

    #[test]
    fn test_parse_write_keeps_payload_verbatim() {
        assert_eq!(
            Command::parse("write 1 -10").unwrap(),
            Some(Command::Write {
                session: SessionHandle::new(1),
                payload: b"-10\n".to_vec()
            })
        );
        assert_eq!(
            Command::parse("write 1 not a number").unwrap(),
            Some(Command::Write {
                session: SessionHandle::new(1),
                payload: b"not a number\n".to_vec()
            })
        );
        assert_eq!(
            Command::parse("write 1").unwrap(),
            Some(Command::Write {
                session: SessionHandle::new(1),
                payload: b"\n".to_vec()
            })
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# set up").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("frobnicate 1"),
            Err(CommandError::UnknownVerb("frobnicate".to_owned()))
        );
        assert_eq!(
            Command::parse("open"),
            Err(CommandError::MissingArgument("caller-id"))
        );
        assert_eq!(
            Command::parse("write"),
            Err(CommandError::MissingArgument("handle"))
        );
        assert_eq!(
            Command::parse("read x"),
            Err(CommandError::InvalidArgument {
                name: "handle",
                value: "x".to_owned()
            })
        );
        assert_eq!(
            Command::parse("close 1 2"),
            Err(CommandError::TrailingInput("2".to_owned()))
        );
    }

    #[test]
    fn test_script_scenario() {
        let svc = Service::new(Arc::new(AllowAll));
        let out = run(
            &svc,
            "open 1000\nwrite 1 42\nwrite 1 -10\nread 1\nread 1\nseek 1 0\nread 1\nclose 1\n",
        );
        assert_eq!(
            out,
            "session 1\nwrote 3\nwrote 4\n32\neof\nok\n32\nclosed\n"
        );
    }

    #[test]
    fn test_script_errors() {
        let svc = Service::new(Arc::new(OwnerOnly::root()));
        let out = run(
            &svc,
            "open 1000\nopen 0\nwrite 1 abc\nwrite 1 9223372036854775807\nwrite 1 1\nclose 7\nbogus\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("error EPERM "));
        assert_eq!(lines[1], "session 1");
        assert!(lines[2].starts_with("error EINVAL "));
        assert_eq!(lines[3], "wrote 20");
        assert!(lines[4].starts_with("error EOVERFLOW "));
        assert!(lines[5].starts_with("error EBADF "));
        assert_eq!(lines[6], "error EINVAL unknown command 'bogus'");
    }

    #[test]
    fn test_script_short_read_is_all_or_nothing() {
        let svc = Service::new(Arc::new(AllowAll));
        let out = run(
            &svc,
            "open 0\nwrite 1 9223372036854775807\nread 1 4\nread 1 19\nread 1 20\nread 1\n",
        );
        assert_eq!(
            out,
            "session 1\nwrote 20\neof\neof\n9223372036854775807\neof\n"
        );
    }
}
