use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use melosearch::{cli, config, error, planner::QueryKind};

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
    /// Start the HTTP search server
    Serve(ServeOptions),

    /// Run a single search query
    Search(SearchOptions),

    /// Manage favorite songs used by the `guess` search
    Favorites(FavoritesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Kind of query to run
    #[clap(value_enum)]
    pub kind: QueryKind,

    /// Keyword, id, description, mood or title, depending on the kind
    pub value: Option<String>,

    /// Page to show (keyword and id searches)
    #[clap(long)]
    pub page: Option<usize>,

    /// Results per page (keyword and id searches)
    #[clap(long)]
    pub page_size: Option<usize>,

    /// User whose favorites seed the `guess` search
    #[clap(long)]
    pub user: Option<String>,

    /// Print the raw response envelope as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FavoritesOptions {
    #[command(subcommand)]
    pub command: FavoritesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// List a user's favorite songs
    List { user: String },
    /// Add a song to a user's favorites
    Add { user: String, song: String },
    /// Remove a song from a user's favorites
    Remove { user: String, song: String },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Search(opt) => {
            cli::search(
                opt.kind,
                opt.value,
                opt.page,
                opt.page_size,
                opt.user,
                opt.json,
            )
            .await
        }
        Command::Favorites(opt) => match opt.command {
            FavoritesSubcommand::List { user } => cli::list_favorites(user).await,
            FavoritesSubcommand::Add { user, song } => cli::add_favorite(user, song).await,
            FavoritesSubcommand::Remove { user, song } => cli::remove_favorite(user, song).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
