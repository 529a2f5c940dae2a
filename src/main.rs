//! GridFlux server entry point (`spec.md` §5, §6.5).
//!
//! Wires the control loop's tick timer, the IPC accept socket, and the
//! `SIGINT`/`SIGTERM` handler onto one `calloop` event loop.

use std::path::PathBuf;

use anyhow::{bail, Context};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use clap::Parser;
use gridflux_config::{config_path, ConfigFile};
use tracing_subscriber::EnvFilter;

use gridflux::backend::MockBackend;
use gridflux::ipc;
use gridflux::manager::{WindowManager, TICK_INTERVAL};
use gridflux::signals;

#[derive(Parser)]
#[command(name = "gridfluxd", about = "The GridFlux window manager server")]
struct Cli {
    /// Path to the JSON config file. Defaults to the XDG/AppData location
    /// (`spec.md` §6.4).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run against the in-memory test backend instead of a real platform
    /// backend. The only backend this build ships, since the concrete
    /// X11/Win32 implementation is out of scope (`spec.md` §1).
    #[arg(long)]
    mock: bool,

    /// Increase log verbosity; repeatable.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity; repeatable.
    #[arg(short = 'q', long, action = clap::ArgAction::Count)]
    quiet: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    require_x11_session()?;

    if !cli.mock {
        bail!(
            "no concrete platform backend is compiled into this build; \
             pass --mock to run against the in-memory test backend"
        );
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => config_path().context("resolving config path")?,
    };
    let config = ConfigFile::open(config_path).context("loading config")?;

    let backend = MockBackend::new();
    let mut manager = WindowManager::new(backend, config).context("initializing backend")?;

    let mut event_loop: EventLoop<'static, WindowManager<MockBackend>> =
        EventLoop::try_new().context("creating event loop")?;
    let handle = event_loop.handle();

    let timer = Timer::from_duration(TICK_INTERVAL);
    handle
        .insert_source(timer, |_deadline, _, manager| {
            manager.tick();
            TimeoutAction::ToDuration(TICK_INTERVAL)
        })
        .map_err(|err| anyhow::anyhow!("registering tick timer: {err}"))?;

    let socket_path = ipc::server::default_path();
    let listener = ipc::server::bind(&socket_path).context("binding ipc socket")?;
    ipc::server::register(&handle, listener)
        .map_err(|err| anyhow::anyhow!("registering ipc socket: {err}"))?;

    signals::register(&handle, event_loop.get_signal())
        .map_err(|err| anyhow::anyhow!("registering signal handler: {err}"))?;

    tracing::info!("gridflux started, socket at {}", socket_path.display());
    event_loop
        .run(None, &mut manager, |_| {})
        .context("running event loop")?;

    manager.shutdown();
    ipc::server::cleanup(&socket_path);
    Ok(())
}

fn init_tracing(verbose: u8, quiet: u8) {
    let level = match verbose as i8 - quiet as i8 {
        i8::MIN..=-1 => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// `spec.md` §6.5: `XDG_SESSION_TYPE` must be `x11` on Unix or the server
/// refuses to start.
#[cfg(unix)]
fn require_x11_session() -> anyhow::Result<()> {
    match std::env::var("XDG_SESSION_TYPE") {
        Ok(value) if value == "x11" => Ok(()),
        Ok(other) => bail!("unsupported session type {other:?}; gridflux requires X11"),
        Err(_) => bail!("XDG_SESSION_TYPE is unset; gridflux requires an X11 session"),
    }
}

#[cfg(not(unix))]
fn require_x11_session() -> anyhow::Result<()> {
    Ok(())
}
