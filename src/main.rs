//! rotachess command line: tournaments, single matches and layout conversion.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use rotachess::arena::{AgentRegistry, Match, MatchConfig, Outcome, Tournament, TournamentConfig};
use rotachess::core::Layout;

/// Bot arena for chess on rectangular boards with rotating player frames.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level for diagnostics.
    #[arg(global = true, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct MatchOpts {
    /// Layout file (.brd or .fen); the standard 8x8 setup when omitted.
    #[arg(long)]
    board: Option<PathBuf>,

    /// Thinking time per turn, in seconds.
    #[arg(long, default_value_t = 1.0)]
    budget: f64,

    /// Turns before a match is declared drawn.
    #[arg(long, default_value_t = 99)]
    max_turns: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Round robin between registered bots.
    Tournament {
        #[clap(flatten)]
        opts: MatchOpts,

        /// Games per pairing.
        #[arg(long, default_value_t = 10)]
        matches: u32,

        /// Comma-separated subset of bots; every automated bot otherwise.
        #[arg(long, value_delimiter = ',')]
        bots: Option<Vec<String>>,
    },
    /// Play one match, one agent per seat, printing the board after each turn.
    Play {
        #[clap(flatten)]
        opts: MatchOpts,

        /// Agent names in seat order.
        #[arg(required = true)]
        agents: Vec<String>,
    },
    /// List registered bots.
    Bots,
    /// Convert a layout between .brd and .fen.
    Convert { input: PathBuf, output: PathBuf },
}

fn load_layout(path: Option<&Path>) -> Result<Layout, String> {
    match path {
        Some(path) => Layout::load_file(path).map_err(|e| e.to_string()),
        None => Ok(Layout::default()),
    }
}

fn match_config(opts: &MatchOpts) -> Result<MatchConfig, String> {
    let time_budget = Duration::try_from_secs_f64(opts.budget).map_err(|e| format!("invalid budget: {}", e))?;
    Ok(MatchConfig {
        time_budget,
        max_turns: opts.max_turns,
        ..MatchConfig::default()
    })
}

fn run_tournament(opts: MatchOpts, matches: u32, bots: Option<Vec<String>>) -> Result<(), String> {
    let layout = load_layout(opts.board.as_deref())?;
    let config = TournamentConfig {
        match_config: match_config(&opts)?,
        matches_per_pair: matches,
        bots,
    };
    let registry = AgentRegistry::builtin();
    let report = Tournament::new(&registry, layout, config).run().map_err(|e| e.to_string())?;
    print!("{}", report);
    Ok(())
}

fn run_match(opts: MatchOpts, names: Vec<String>) -> Result<(), String> {
    let layout = load_layout(opts.board.as_deref())?;
    let registry = AgentRegistry::builtin();
    let mut agents = Vec::with_capacity(names.len());
    for name in names {
        let agent = registry.create(&name).ok_or_else(|| format!("unknown agent '{}'", name))?;
        agents.push((name, agent));
    }

    let mut game = Match::new(layout, agents, match_config(&opts)?).map_err(|e| e.to_string())?;
    println!("{}", game.board());
    let result = loop {
        let done = game.step();
        println!("\nTurn {}\n{}", game.turn(), game.board());
        if let Some(result) = done {
            break result;
        }
    };

    match &result.outcome {
        Outcome::Win { seat } => println!("{} wins after {} turns", game.name(*seat), result.turns),
        Outcome::Draw => println!("Draw after {} turns", result.turns),
        Outcome::Forfeit { seat, reason } => {
            println!("{} forfeits after {} turns: {}", game.name(*seat), result.turns, reason)
        }
    }
    Ok(())
}

fn convert(input: &Path, output: &Path) -> Result<(), String> {
    let layout = Layout::load_file(input).map_err(|e| e.to_string())?;
    layout.save_file(output).map_err(|e| e.to_string())?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();
    if let Err(e) = TermLogger::init(cli.log_level, config, TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("logger unavailable: {}", e);
    }

    let outcome = match cli.command {
        Commands::Tournament { opts, matches, bots } => run_tournament(opts, matches, bots),
        Commands::Play { opts, agents } => run_match(opts, agents),
        Commands::Bots => {
            for r in AgentRegistry::builtin().iter() {
                println!("{}{}", r.name, if r.interactive { " (interactive)" } else { "" });
            }
            Ok(())
        }
        Commands::Convert { input, output } => convert(&input, &output),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            log::error!("{}", msg);
            ExitCode::FAILURE
        }
    }
}
