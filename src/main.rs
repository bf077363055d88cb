use anyhow::Result;
use bookstore_admin::{
    commands::{self, Config, DEFAULT_LIMIT, Services},
    runtime::RealRuntime,
    view::ConsoleNotifier,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// bookstore-admin - administration client for the bookstore backend
///
/// Lists, searches and deletes books and manages genres and publishers.
/// The bearer token from `login` is kept in a session file and refreshed
/// automatically once it expires.
///
/// Examples:
///   bookstore-admin login --email admin@example.com --password secret
///   bookstore-admin books list --page 2 --search dune
///   bookstore-admin books delete 65f0c0ffee --yes
#[derive(Parser, Debug)]
#[command(author, version = env!("BOOKSTORE_ADMIN_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend API root (also via BOOKSTORE_API_URL; defaults to http://localhost:5000/api/v1/)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// File holding the session token (also via BOOKSTORE_SESSION_FILE)
    #[arg(long = "session-file", value_name = "PATH", global = true)]
    pub session_file: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// List, search and delete books
    #[command(subcommand)]
    Books(BooksCommand),

    /// List, show and create genres
    #[command(subcommand)]
    Genres(GenresCommand),

    /// List and create publishers
    #[command(subcommand)]
    Publishers(PublishersCommand),
}

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    #[arg(long, env = "BOOKSTORE_EMAIL")]
    pub email: String,

    #[arg(long, env = "BOOKSTORE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(clap::Subcommand, Debug)]
enum BooksCommand {
    /// Show one page of books, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Only books matching this key
        #[arg(long, value_name = "KEY")]
        search: Option<String>,
    },

    /// Delete a book unless it has been ordered
    Delete {
        #[arg(value_name = "ID")]
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(clap::Subcommand, Debug)]
enum GenresCommand {
    List(PageArgs),
    Show {
        #[arg(value_name = "SLUG")]
        slug: String,
    },
    Create {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(clap::Subcommand, Debug)]
enum PublishersCommand {
    List(PageArgs),
    Create {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let config = Config::load(&runtime, cli.api_url, cli.session_file)?;
    let services = Services::new(runtime, &config)?;
    let notifier = Arc::new(ConsoleNotifier);

    match cli.command {
        Commands::Login(args) => {
            commands::login(&services.auth, &args.email, &args.password).await?
        }
        Commands::Logout => commands::logout(&services.auth).await?,
        Commands::Books(BooksCommand::List { page, search }) => {
            commands::list_books(services.books, notifier, page, search).await?
        }
        Commands::Books(BooksCommand::Delete { id, yes }) => {
            commands::delete_book(&runtime, services.books, notifier, &id, yes).await?
        }
        Commands::Genres(GenresCommand::List(args)) => {
            commands::list_genres(&services.genres, args.page, args.limit).await?
        }
        Commands::Genres(GenresCommand::Show { slug }) => {
            commands::show_genre(&services.genres, &slug).await?
        }
        Commands::Genres(GenresCommand::Create { name }) => {
            commands::create_genre(&services.genres, &name).await?
        }
        Commands::Publishers(PublishersCommand::List(args)) => {
            commands::list_publishers(&services.publishers, args.page, args.limit).await?
        }
        Commands::Publishers(PublishersCommand::Create { name }) => {
            commands::create_publisher(&services.publishers, &name).await?
        }
    }
    Ok(())
}
