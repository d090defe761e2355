mod csrf;
mod notify;
mod playlist;


use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::cli::{Cli, Command, ServerArgs};

use self::csrf::resolve_token;
use self::notify::{Notifier, TerminalNotifier};
use self::playlist::{MutationOutcome, PlaylistClient, report_failure};

pub fn run(cli: Cli) -> Result<ExitCode> {
    let mut notifier = TerminalNotifier::stdout();
    let outcome = run_command(&cli.server, &cli.command, &mut notifier);
    notifier
        .finish()
        .context("failed to write notification to stdout")?;
    Ok(exit_code(&outcome))
}

fn run_command(
    server: &ServerArgs,
    command: &Command,
    notifier: &mut dyn Notifier,
) -> MutationOutcome {
    let agent = ureq::AgentBuilder::new().build();
    let token = match resolve_token(
        &agent,
        &server.base_url,
        server.csrf_token.as_deref(),
        server.token_page.as_deref(),
        server.cookie.as_deref(),
    ) {
        Ok(token) => token,
        Err(err) => {
            report_failure(&err, notifier);
            return MutationOutcome::from_error(err);
        }
    };

    let client = PlaylistClient::new(agent, server.base_url.clone(), token)
        .with_cookie(server.cookie.clone())
        .with_soft_server_warning(!server.no_soft_warning);

    match command {
        Command::Add {
            episode_id,
            playlist_id,
        } => client.add_to_playlist(episode_id, playlist_id, notifier),
        Command::Remove {
            episode_id,
            playlist_id,
        } => client.remove_from_playlist(episode_id, playlist_id, notifier),
    }
}

fn exit_code(outcome: &MutationOutcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
