use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotstats::{
    cli,
    config::{self, Config},
    error,
    management::{FileStorage, SessionManager},
    types::CallbackLocation,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to Spotify
    Auth(AuthOptions),

    /// Print the Spotify login URL
    LoginUrl,

    /// Forget the stored access token
    Logout,

    /// Show your profile, top artists and top tracks
    Profile,

    /// Search artists by name
    Search(SearchOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Redirect URL copied from the browser after logging in
    #[clap(long)]
    pub callback_url: Option<String>,

    /// Only print the login URL instead of opening a browser
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free-text artist query
    pub query: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let mut session = SessionManager::new(FileStorage::default_location());
    session.resolve_token(&mut CallbackLocation::empty()).await;

    match cli.command {
        Command::Auth(opt) => {
            cli::auth(&config, &mut session, opt.callback_url, !opt.no_browser).await
        }
        Command::LoginUrl => cli::login_url(&config),
        Command::Logout => cli::logout(&mut session).await,
        Command::Profile => cli::profile(&config, &session).await,
        Command::Search(opt) => cli::search(&config, &session, opt.query).await,
        Command::Completions(_) => {}
    }
}
