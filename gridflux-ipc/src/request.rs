use std::fmt;

/// A decoded client command, per `spec.md` §4.G.
///
/// `query windows`/`query workspaces`/`query count` additionally accept the
/// single-letter aliases `W`/`D`/`T` recognized by `ipc_command.c`'s
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    QueryWindows { workspace: Option<i32> },
    QueryWorkspaces,
    QueryCount { workspace: Option<i32> },
    QueryApps,
    Move { handle: u64, workspace: i32 },
    Lock { workspace: i32 },
    Unlock { workspace: i32 },
    ToggleBorders,
    RuleAdd { class: String, workspace: i32 },
    RuleRemove { class: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRequestError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown query: {0}")]
    UnknownQuery(String),
    #[error("usage: move <window_id> <workspace_id>")]
    MoveUsage,
    #[error("usage: lock <workspace_id>")]
    LockUsage,
    #[error("usage: unlock <workspace_id>")]
    UnlockUsage,
    #[error("usage: rule add <class> <workspace_id>")]
    RuleAddUsage,
    #[error("usage: rule remove <class>")]
    RuleRemoveUsage,
    #[error("empty command")]
    Empty,
}

impl Request {
    /// Parses a request line. Leading/trailing whitespace is ignored; no
    /// trailing newline is required (`spec.md` §6.2).
    pub fn parse(line: &str) -> Result<Self, ParseRequestError> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseRequestError::Empty)?;
        let rest: Vec<&str> = words.collect();

        match command {
            "query" => parse_query(&rest),
            "move" => parse_move(&rest),
            "lock" => parse_lock(&rest),
            "unlock" => parse_unlock(&rest),
            "toggle-borders" => Ok(Request::ToggleBorders),
            "rule" => parse_rule(&rest),
            other => Err(ParseRequestError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_workspace_id(s: &str) -> Option<i32> {
    s.parse().ok()
}

fn parse_query(rest: &[&str]) -> Result<Request, ParseRequestError> {
    let Some(&sub) = rest.first() else {
        return Err(ParseRequestError::UnknownQuery(String::new()));
    };
    let args = &rest[1..];
    match sub {
        "windows" | "W" => Ok(Request::QueryWindows {
            workspace: args.first().and_then(|s| parse_workspace_id(s)),
        }),
        "workspaces" | "D" => Ok(Request::QueryWorkspaces),
        "count" | "T" => Ok(Request::QueryCount {
            workspace: args.first().and_then(|s| parse_workspace_id(s)),
        }),
        "apps" => Ok(Request::QueryApps),
        other => Err(ParseRequestError::UnknownQuery(other.to_string())),
    }
}

fn parse_move(rest: &[&str]) -> Result<Request, ParseRequestError> {
    let [handle, workspace] = rest else {
        return Err(ParseRequestError::MoveUsage);
    };
    let handle = parse_handle(handle).ok_or(ParseRequestError::MoveUsage)?;
    let workspace: i32 = workspace.parse().map_err(|_| ParseRequestError::MoveUsage)?;
    Ok(Request::Move { handle, workspace })
}

/// Parses a native window handle, accepting `0x`-prefixed hex (as printed
/// by the CLI's own `query windows` output) or plain decimal.
fn parse_handle(s: &str) -> Option<u64> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

fn parse_lock(rest: &[&str]) -> Result<Request, ParseRequestError> {
    let [workspace] = rest else {
        return Err(ParseRequestError::LockUsage);
    };
    let workspace: i32 = workspace.parse().map_err(|_| ParseRequestError::LockUsage)?;
    Ok(Request::Lock { workspace })
}

fn parse_unlock(rest: &[&str]) -> Result<Request, ParseRequestError> {
    let [workspace] = rest else {
        return Err(ParseRequestError::UnlockUsage);
    };
    let workspace: i32 = workspace
        .parse()
        .map_err(|_| ParseRequestError::UnlockUsage)?;
    Ok(Request::Unlock { workspace })
}

fn parse_rule(rest: &[&str]) -> Result<Request, ParseRequestError> {
    match rest {
        ["add", class, workspace] => {
            let workspace: i32 = workspace
                .parse()
                .map_err(|_| ParseRequestError::RuleAddUsage)?;
            Ok(Request::RuleAdd {
                class: (*class).to_string(),
                workspace,
            })
        }
        ["remove", class] => Ok(Request::RuleRemove {
            class: (*class).to_string(),
        }),
        _ => Err(ParseRequestError::RuleAddUsage),
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::QueryWindows { workspace: Some(w) } => write!(f, "query windows {w}"),
            Request::QueryWindows { workspace: None } => write!(f, "query windows"),
            Request::QueryWorkspaces => write!(f, "query workspaces"),
            Request::QueryCount { workspace: Some(w) } => write!(f, "query count {w}"),
            Request::QueryCount { workspace: None } => write!(f, "query count"),
            Request::QueryApps => write!(f, "query apps"),
            Request::Move { handle, workspace } => write!(f, "move 0x{handle:x} {workspace}"),
            Request::Lock { workspace } => write!(f, "lock {workspace}"),
            Request::Unlock { workspace } => write!(f, "unlock {workspace}"),
            Request::ToggleBorders => write!(f, "toggle-borders"),
            Request::RuleAdd { class, workspace } => write!(f, "rule add {class} {workspace}"),
            Request::RuleRemove { class } => write!(f, "rule remove {class}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_parse() {
        let requests = [
            Request::QueryWindows { workspace: Some(2) },
            Request::QueryWindows { workspace: None },
            Request::QueryWorkspaces,
            Request::QueryCount { workspace: None },
            Request::QueryApps,
            Request::Move {
                handle: 0xdead_beef,
                workspace: 3,
            },
            Request::Lock { workspace: 1 },
            Request::Unlock { workspace: 1 },
            Request::ToggleBorders,
            Request::RuleAdd {
                class: "firefox".into(),
                workspace: 3,
            },
            Request::RuleRemove {
                class: "firefox".into(),
            },
        ];
        for req in requests {
            let line = req.to_string();
            assert_eq!(Request::parse(&line).unwrap(), req, "line: {line}");
        }
    }

    #[test]
    fn accepts_single_letter_query_aliases() {
        assert_eq!(
            Request::parse("query W").unwrap(),
            Request::QueryWindows { workspace: None }
        );
        assert_eq!(Request::parse("query D").unwrap(), Request::QueryWorkspaces);
        assert_eq!(
            Request::parse("query T 2").unwrap(),
            Request::QueryCount { workspace: Some(2) }
        );
    }

    #[test]
    fn rejects_malformed_move() {
        assert_eq!(
            Request::parse("move notahandle 2"),
            Err(ParseRequestError::MoveUsage)
        );
        assert_eq!(Request::parse("move 1"), Err(ParseRequestError::MoveUsage));
    }

    #[test]
    fn parses_decimal_and_hex_handles() {
        assert_eq!(
            Request::parse("move 0x2A 1").unwrap(),
            Request::Move {
                handle: 42,
                workspace: 1
            }
        );
        assert_eq!(
            Request::parse("move 42 1").unwrap(),
            Request::Move {
                handle: 42,
                workspace: 1
            }
        );
    }
}
