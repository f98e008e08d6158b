//! Arena - command-line client for the rock-paper-scissors Agent Arena

use anyhow::Result;
use arena::api::types::RegisterRequest;
use arena::api::ArenaClient;
use arena::cli::{self, Command};
use arena::commands::{lobby, onboard, play, qualify};
use arena::config::Config;
use arena::output::formatter::{self, print_json};
use arena::output::logger;
use arena::strategy::choose_move;
use arena::{interrupt, project};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse_args();

    if let Err(e) = logger::init_tracing(args.verbose) {
        formatter::print_warning(&format!("logging disabled: {e:#}"));
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            let (envelope, code) = formatter::error_report(&e);
            print_json(&envelope);
            ExitCode::from(code)
        }
    }
}

async fn run(args: cli::Args) -> Result<ExitCode> {
    // init must work even when an unreadable .arena.toml sits further up
    if matches!(args.command, Command::Init) {
        return init_project();
    }

    let project = project::discover()?;
    if let Some(path) = &project.path {
        tracing::debug!(path = %path.display(), "loaded settings");
    }
    let config = Config::from_args(args.base, args.timeout, &project.config)?;
    let client = ArenaClient::new(&config.base, config.timeout)?;

    match args.command {
        Command::Register(agent) => {
            let req = RegisterRequest::new(
                &agent.name,
                agent.email.as_deref(),
                agent.description.as_deref(),
            );
            print_json(&client.register(&req).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::QualStart { key, difficulty } => {
            let key = config.api_key(&key)?;
            let res = client.qualify_start(&key, config.difficulty(difficulty)).await?;
            print_json(&res);
            Ok(ExitCode::SUCCESS)
        }
        Command::QualRound {
            key,
            qual_id,
            round_no,
            mv,
        } => {
            let key = config.api_key(&key)?;
            print_json(&client.qualify_round(&key, &qual_id, round_no, mv).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::QualAuto { key, play } => {
            let key = config.api_key(&key)?;
            let opts = config.play_options(&play)?;
            let outcome = qualify::auto(&client, &key, &opts).await?;
            print_json(&outcome.to_json());
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Command::Join { key } => {
            let key = config.api_key(&key)?;
            print_json(&client.join_queue(&key).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Leave { key } => {
            let key = config.api_key(&key)?;
            print_json(&client.leave_queue(&key).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Queue => {
            print_json(&client.queue().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::QueueMe { key } => {
            let key = config.api_key(&key)?;
            print_json(&client.queue_me(&key).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Onboard { agent, play } => {
            let opts = config.play_options(&play)?;
            let req = RegisterRequest::new(
                &agent.name,
                agent.email.as_deref(),
                agent.description.as_deref(),
            );
            let outcome = onboard::run(&client, &req, &opts).await?;
            print_json(&outcome.to_json());
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Command::WatchLobby { interval, once } => {
            let interval = config.interval(interval)?;
            let stop = interrupt::register_signal_handler()?;
            formatter::print_status(&format!(
                "Watching {} every {}s (Ctrl+C to stop)",
                client.base(),
                interval.as_secs()
            ));
            lobby::watch(&client, interval, once, &stop, |snap| print_json(snap)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Matches => {
            print_json(&client.matches().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Match { id } => {
            print_json(&client.get_match(&id).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Ready { key, match_id } => {
            let key = config.api_key(&key)?;
            print_json(&client.ready(&key, &match_id).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Commit {
            key,
            match_id,
            round_no,
            mv,
            strategy,
            salt,
            prediction,
        } => {
            let key = config.api_key(&key)?;
            let mv = mv.unwrap_or_else(|| choose_move(config.strategy(strategy), round_no));
            let receipt =
                play::commit(&client, &key, &match_id, round_no, mv, salt, prediction).await?;
            print_json(&receipt);
            Ok(ExitCode::SUCCESS)
        }
        Command::Reveal {
            key,
            match_id,
            round_no,
            mv,
            salt,
        } => {
            let key = config.api_key(&key)?;
            print_json(&play::reveal(&client, &key, &match_id, round_no, mv, salt).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Rules => {
            print_json(&client.rules().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Time => {
            print_json(&client.time().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => {
            print_json(&client.health().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Rankings { kind, period } => {
            print_json(&client.rankings(kind, period).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Init => init_project(),
    }
}

fn init_project() -> Result<ExitCode> {
    if project::init()? {
        formatter::print_success(&format!("Created {}", project::SETTINGS_FILE));
    } else {
        formatter::print_status(&format!("{} already exists, skipping.", project::SETTINGS_FILE));
    }
    Ok(ExitCode::SUCCESS)
}
