//! Command-line client for the GridFlux window manager (`spec.md` §6.3).
//!
//! Each invocation opens one connection, sends one request, prints the
//! response, and exits: 0 on success, 1 on any error.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gridflux_ipc::{
    connect, default_socket_path, send_request, Request, WindowListFrame, WorkspaceListFrame,
};

#[derive(Parser)]
#[command(name = "gridflux", about = "Control a running GridFlux server")]
struct Cli {
    /// Path to the server's Unix socket. Defaults to the standard
    /// per-session location (`spec.md` §6.2).
    #[arg(long)]
    socket: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query server-side state.
    Query {
        #[command(subcommand)]
        what: QueryKind,
    },
    /// Move a window to a workspace.
    Move { handle: String, workspace: i32 },
    /// Pin a workspace so auto-placement skips it.
    Lock { workspace: i32 },
    /// Unpin a previously locked workspace.
    Unlock { workspace: i32 },
    /// Toggle whether the server draws window borders.
    ToggleBorders,
    /// Manage per-application placement rules.
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },
}

#[derive(Subcommand)]
enum QueryKind {
    Windows { workspace: Option<i32> },
    Workspaces,
    Count { workspace: Option<i32> },
    Apps,
}

#[derive(Subcommand)]
enum RuleAction {
    Add { class: String, workspace: i32 },
    Remove { class: String },
}

impl From<Cli> for Request {
    fn from(cli: Cli) -> Request {
        match cli.command {
            Command::Query {
                what: QueryKind::Windows { workspace },
            } => Request::QueryWindows { workspace },
            Command::Query {
                what: QueryKind::Workspaces,
            } => Request::QueryWorkspaces,
            Command::Query {
                what: QueryKind::Count { workspace },
            } => Request::QueryCount { workspace },
            Command::Query {
                what: QueryKind::Apps,
            } => Request::QueryApps,
            Command::Move { handle, workspace } => Request::Move {
                handle: parse_handle(&handle),
                workspace,
            },
            Command::Lock { workspace } => Request::Lock { workspace },
            Command::Unlock { workspace } => Request::Unlock { workspace },
            Command::ToggleBorders => Request::ToggleBorders,
            Command::Rule {
                action: RuleAction::Add { class, workspace },
            } => Request::RuleAdd { class, workspace },
            Command::Rule {
                action: RuleAction::Remove { class },
            } => Request::RuleRemove { class },
        }
    }
}

fn parse_handle(s: &str) -> u64 {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).unwrap_or(0)
    } else {
        s.parse().unwrap_or(0)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let socket = cli
        .socket
        .clone()
        .unwrap_or_else(default_socket_path);
    let is_window_query = matches!(
        cli.command,
        Command::Query {
            what: QueryKind::Windows { .. }
        }
    );
    let is_workspace_query = matches!(
        cli.command,
        Command::Query {
            what: QueryKind::Workspaces
        }
    );
    let request: Request = cli.into();

    match run(&socket, &request, is_window_query, is_workspace_query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gridflux: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    socket: &std::path::Path,
    request: &Request,
    is_window_query: bool,
    is_workspace_query: bool,
) -> anyhow::Result<()> {
    let mut stream = connect(socket)?;
    let response = send_request(&mut stream, request)?;

    if !response.status.is_success() {
        anyhow::bail!("{}", response.message_text());
    }

    if is_window_query {
        let frame = WindowListFrame::decode(&response.message)
            .ok_or_else(|| anyhow::anyhow!("server sent a malformed window list"))?;
        for record in &frame.records {
            println!(
                "0x{:x}\tws={}\t{}x{}+{}+{}\t{}{}{}",
                record.id,
                record.workspace,
                record.width,
                record.height,
                record.x,
                record.y,
                record.name,
                if record.is_maximized { " [max]" } else { "" },
                if record.is_minimized { " [min]" } else { "" },
            );
        }
        if frame.truncated {
            eprintln!("gridflux: output truncated, narrow the query by workspace");
        }
    } else if is_workspace_query {
        let frame = WorkspaceListFrame::decode(&response.message)
            .ok_or_else(|| anyhow::anyhow!("server sent a malformed workspace list"))?;
        for record in &frame.records {
            println!(
                "{}\t{}/{}\tlocked={}\tmaximized={}",
                record.id,
                record.window_count,
                record.max_windows,
                record.is_locked,
                record.has_maximized_window,
            );
        }
        if frame.truncated {
            eprintln!("gridflux: output truncated");
        }
    } else {
        println!("{}", response.message_text());
    }

    Ok(())
}
