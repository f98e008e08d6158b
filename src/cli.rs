//! CLI argument parsing using clap.

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::api::types::{Difficulty, RankingPeriod, RankingType};
use crate::strategy::{Move, Strategy};

/// Agent Arena CLI.
///
/// Registers bots, plays qualification, joins the match queue and watches the
/// lobby of a rock-paper-scissors agent arena. Every result is printed as
/// JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "arena", version, about, long_about = None)]
pub struct Args {
    /// API base URL [default: https://agent-arena-rps.vercel.app]
    #[arg(long, global = true, value_name = "URL", env = "ARENA_BASE")]
    pub base: Option<String>,

    /// Per-request timeout in seconds [default: 20]
    #[arg(long, global = true, value_name = "SECS", env = "ARENA_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// API key flag shared by every authenticated command.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct KeyArg {
    /// Agent API key (falls back to [api] key in .arena.toml)
    #[arg(long, value_name = "API_KEY", env = "ARENA_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

/// Flags shared by the qualification workflows.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Qualification difficulty [default: easy]
    #[arg(long, value_enum, ignore_case = true)]
    pub difficulty: Option<Difficulty>,

    /// Move selection strategy [default: paper]
    #[arg(long, value_enum, ignore_case = true)]
    pub strategy: Option<Strategy>,

    /// Maximum rounds to play before giving up [default: 5]
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,
}

/// Agent identity fields used at registration.
#[derive(ClapArgs, Debug, Clone)]
pub struct RegisterArgs {
    /// Bot name (3-32 chars: letters, digits, spaces, hyphens)
    #[arg(long)]
    pub name: String,

    /// Author contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Free-form bot description
    #[arg(long)]
    pub description: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new bot
    Register(RegisterArgs),
    /// Start qualification
    QualStart {
        #[command(flatten)]
        key: KeyArg,

        /// Qualification difficulty [default: easy]
        #[arg(long, value_enum, ignore_case = true)]
        difficulty: Option<Difficulty>,
    },
    /// Submit one qualification round
    QualRound {
        #[command(flatten)]
        key: KeyArg,

        /// Qualification match ID
        #[arg(long, value_name = "ID")]
        qual_id: String,

        /// Round number, starting at 1
        #[arg(long, visible_alias = "round", value_name = "N")]
        round_no: u32,

        /// Move to play
        #[arg(long = "move", value_enum, ignore_case = true)]
        mv: Move,
    },
    /// Auto-play qualification rounds
    QualAuto {
        #[command(flatten)]
        key: KeyArg,

        #[command(flatten)]
        play: PlayArgs,
    },
    /// Join the match queue
    Join {
        #[command(flatten)]
        key: KeyArg,
    },
    /// Leave the match queue
    Leave {
        #[command(flatten)]
        key: KeyArg,
    },
    /// Public queue snapshot
    Queue,
    /// My queue status
    QueueMe {
        #[command(flatten)]
        key: KeyArg,
    },
    /// Register + qualify + join queue
    Onboard {
        #[command(flatten)]
        agent: RegisterArgs,

        #[command(flatten)]
        play: PlayArgs,
    },
    /// Poll queue and matches
    WatchLobby {
        /// Seconds between polls [default: 5]
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        /// Print a single snapshot and exit
        #[arg(long)]
        once: bool,
    },
    /// List matches
    Matches,
    /// Show one match with its rounds
    Match {
        /// Match ID
        #[arg(long, value_name = "ID")]
        id: String,
    },
    /// Confirm readiness for a match
    Ready {
        #[command(flatten)]
        key: KeyArg,

        /// Match ID
        #[arg(long, value_name = "ID")]
        match_id: String,
    },
    /// Commit a hashed move for a match round
    Commit {
        #[command(flatten)]
        key: KeyArg,

        /// Match ID
        #[arg(long, value_name = "ID")]
        match_id: String,

        /// Round number, starting at 1
        #[arg(long, visible_alias = "round", value_name = "N")]
        round_no: u32,

        /// Move to commit (otherwise chosen by --strategy)
        #[arg(long = "move", value_enum, ignore_case = true)]
        mv: Option<Move>,

        /// Strategy used when --move is absent [default: paper]
        #[arg(long, value_enum, ignore_case = true, conflicts_with = "mv")]
        strategy: Option<Strategy>,

        /// Salt to hash with (16-64 printable chars; generated when absent)
        #[arg(long)]
        salt: Option<String>,

        /// Predicted opponent move
        #[arg(long, value_enum, ignore_case = true)]
        prediction: Option<Move>,
    },
    /// Reveal a previously committed move
    Reveal {
        #[command(flatten)]
        key: KeyArg,

        /// Match ID
        #[arg(long, value_name = "ID")]
        match_id: String,

        /// Round number, starting at 1
        #[arg(long, visible_alias = "round", value_name = "N")]
        round_no: u32,

        /// Move that was committed
        #[arg(long = "move", value_enum, ignore_case = true)]
        mv: Move,

        /// Salt that was committed
        #[arg(long)]
        salt: String,
    },
    /// Game rules and timeouts
    Rules,
    /// Server time
    Time,
    /// Service health
    Health,
    /// Leaderboards
    Rankings {
        /// Leaderboard kind
        #[arg(long = "type", value_enum, default_value_t = RankingType::Agents)]
        kind: RankingType,

        /// Leaderboard window
        #[arg(long, value_enum, default_value_t = RankingPeriod::Weekly)]
        period: RankingPeriod,
    },
    /// Create a commented .arena.toml in the current directory
    Init,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
