//! Shogi-Net: a shared shogi board client.
//!
//! ## Usage
//!
//! - `shogi-net` - Start the console (same as `shogi-net console`)
//! - `shogi-net console --side white` - Console viewing from the second side
//! - `shogi-net demo` - Two in-process clients exchanging moves through a relay

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info};

use shogi_net::board::{Point, diagram};
use shogi_net::console::Console;
use shogi_net::piece::Side;
use shogi_net::promotion::Choice;
use shogi_net::protocol::{Message, frame};
use shogi_net::relay::{ConnectionId, Relay};
use shogi_net::session::{Session, SessionConfig};

/// Shogi-Net: a shared shogi board relayed between two players
#[derive(Parser)]
#[command(name = "shogi-net")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    logging: LogArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive one client from stdin; outgoing relay frames are printed as `send` lines
    Console(ConsoleArgs),
    /// Play a short scripted game between two in-process clients
    Demo,
}

#[derive(Args, Default)]
struct ConsoleArgs {
    /// Side to view the board from
    #[arg(long, value_enum, env = "SHOGI_NET_SIDE", default_value_t = SideArg::Black)]
    side: SideArg,

    /// Allow moving and dropping either side's pieces
    #[arg(long)]
    elevated: bool,

    /// Apply moves received from peers without checking them
    #[arg(long)]
    trust_remote: bool,
}

#[derive(Args)]
struct LogArgs {
    /// Log level written to stderr
    #[arg(long, global = true, env = "SHOGI_NET_LOG", default_value = "warn")]
    log_level: LevelFilter,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Copy, Clone, Default, ValueEnum)]
enum SideArg {
    #[default]
    Black,
    White,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Black => Side::First,
            SideArg::White => Side::Second,
        }
    }
}

impl From<&ConsoleArgs> for SessionConfig {
    fn from(args: &ConsoleArgs) -> Self {
        SessionConfig {
            side: args.side.into(),
            elevated: args.elevated,
            validate_remote: !args.trust_remote,
        }
    }
}

fn setup_logging(args: &LogArgs) -> Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(args.log_level)
        .chain(io::stderr());
    if let Some(path) = &args.log_file {
        let file = fern::log_file(path).with_context(|| format!("opening log file {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }
    dispatch.apply().context("installing logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.logging)?;

    match cli.command {
        Some(Commands::Console(args)) => run_console(&args),
        None => run_console(&ConsoleArgs::default()),
        Some(Commands::Demo) => run_demo(),
    }
}

fn run_console(args: &ConsoleArgs) -> Result<()> {
    let config = SessionConfig::from(args);
    info!("starting console as {} (elevated: {})", config.side, config.elevated);
    let mut console = Console::new(config);
    console
        .run(io::stdin().lock(), io::stdout().lock())
        .context("console i/o")
}

/// One client attached to the relay.
struct Peer {
    id: ConnectionId,
    session: Session,
}

impl Peer {
    fn join(relay: &mut Relay, side: Side) -> Result<Self> {
        let peer = Peer {
            id: relay.connect(),
            session: Session::new(SessionConfig {
                side,
                ..SessionConfig::default()
            }),
        };
        let arrived = peer.session.on_open();
        relay.handle_frame(&peer.id, &frame(&arrived)?)?;
        Ok(peer)
    }

    fn send_all(&self, relay: &mut Relay, outgoing: Vec<Message>) -> Result<()> {
        for message in outgoing {
            relay.handle_frame(&self.id, &frame(&message)?)?;
        }
        Ok(())
    }

    /// Handle everything queued for this peer, forwarding any replies.
    fn drain(&mut self, relay: &mut Relay) -> Result<()> {
        while let Some(payload) = relay.poll(&self.id) {
            let replies = self.session.receive(&payload)?;
            self.send_all(relay, replies)?;
        }
        Ok(())
    }

    /// Click `from` then `to` in this peer's own view and send the result.
    fn play(&mut self, relay: &mut Relay, from: (u8, u8), to: (u8, u8), promote: bool) -> Result<()> {
        self.session.click_square(Point::new(from.0, from.1));
        let mut outgoing = self.session.click_square(Point::new(to.0, to.1));
        if self.session.is_awaiting_promotion() {
            let choice = if promote { Choice::Promote } else { Choice::Decline };
            outgoing = self.session.choose_promotion(choice);
        }
        if outgoing.is_empty() {
            bail!("move {from:?} -> {to:?} was not accepted");
        }
        self.send_all(relay, outgoing)
    }
}

fn run_demo() -> Result<()> {
    println!("Shogi-Net: two clients sharing one board\n");
    let mut relay = Relay::new();

    let mut black = Peer::join(&mut relay, Side::First)?;
    let mut white = Peer::join(&mut relay, Side::Second)?;
    black.drain(&mut relay)?;
    white.drain(&mut relay)?;

    // Each player clicks in their own view; both see their pieces at the bottom.
    let script = [
        ((2, 6), (2, 5), false),
        ((2, 6), (2, 5), false),
        ((1, 7), (7, 1), true),
    ];
    for (turn, &(from, to, promote)) in script.iter().enumerate() {
        let (mover, other) = if turn % 2 == 0 {
            (&mut black, &mut white)
        } else {
            (&mut white, &mut black)
        };
        mover.play(&mut relay, from, to, promote)?;
        other.drain(&mut relay)?;
        mover.drain(&mut relay)?;
    }

    println!("=== Board (black's view) ===");
    println!("{}", black.session.board());
    println!("=== White's view ===");
    println!("{}", diagram(&white.session.view()));
    println!(
        "boards agree: {}",
        black.session.board() == white.session.board()
    );
    Ok(())
}
