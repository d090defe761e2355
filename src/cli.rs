use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "podlist",
    version,
    about = "Add or remove podcast episodes from a playlist"
)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Base URL of the podcast server
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:5000",
        env = "PODLIST_BASE_URL"
    )]
    pub base_url: String,

    /// Anti-forgery token sent as X-CSRFToken
    #[arg(long, global = true, env = "PODLIST_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Page to read the csrf-token meta tag from when no token is given
    #[arg(long, global = true, env = "PODLIST_TOKEN_PAGE")]
    pub token_page: Option<String>,

    /// Raw Cookie header carrying the logged-in session
    #[arg(long, global = true, env = "PODLIST_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Skip the extra warning shown before a server error
    #[arg(long, global = true, env = "PODLIST_NO_SOFT_WARNING")]
    pub no_soft_warning: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an episode to a playlist
    Add {
        episode_id: String,
        playlist_id: String,
    },
    /// Remove an episode from a playlist
    Remove {
        episode_id: String,
        playlist_id: String,
    },
}
