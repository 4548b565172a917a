use std::path::PathBuf;

use buzz_client::{init_logging, FlagEnricher, FlagPolicy, HttpSource, StaticSource, DEFAULT_ENDPOINT};
use buzz_core::filter::ALL;
use buzz_core::{ArticleManager, ArticleSource, ArticleStatus, FilterAction, Selection};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

mod render;

use render::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the BuzzCMS article list from the terminal", long_about = None)]
pub struct Cli {
    /// Articles endpoint of the admin API
    #[arg(long, env = "BUZZ_API_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Read the articles response body from a file instead of the API
    #[arg(long)]
    from_file: Option<PathBuf>,
    /// Where the AI/video display flags come from: payload, random or payload-or-random
    #[arg(long, default_value_t = FlagPolicy::PayloadOrRandom)]
    flags: FlagPolicy,
    /// Seed for the placeholder flag randomness
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the filtered article list
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show the distinct categories and authors available for filtering
    Facets,
    /// Duplicate an article as a new draft, then show the filtered list
    Clone {
        /// Identifier of the article to copy
        id: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct FilterArgs {
    /// Case-insensitive match on title or author
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Published, Draft, Scheduled or any backend status
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    author: Option<String>,
    /// Only AI-generated articles
    #[arg(long)]
    ai: bool,
    /// Only articles with video
    #[arg(long)]
    video: bool,
    /// Only articles with more than 10,000 views
    #[arg(long)]
    high_traffic: bool,
}

/// Matches a typed status against the loaded ones ignoring case.
fn resolve_status(input: &str, known: &[String]) -> Selection {
    if input.eq_ignore_ascii_case(ALL) {
        return Selection::All;
    }
    known
        .iter()
        .find(|status| status.to_lowercase() == input.to_lowercase())
        .map(|status| Selection::exact(status.as_str()))
        .unwrap_or_else(|| Selection::exact(ArticleStatus::from(input).as_str()))
}

impl FilterArgs {
    fn actions(&self, known_statuses: &[String]) -> Vec<FilterAction> {
        let mut actions = Vec::new();
        if let Some(query) = &self.search {
            actions.push(FilterAction::Search(query.clone()));
        }
        if let Some(category) = &self.category {
            actions.push(FilterAction::Category(Selection::exact(category.as_str())));
        }
        if let Some(status) = &self.status {
            actions.push(FilterAction::Status(resolve_status(status, known_statuses)));
        }
        if let Some(author) = &self.author {
            actions.push(FilterAction::Author(Selection::exact(author.as_str())));
        }
        if self.ai {
            actions.push(FilterAction::ToggleAi(true));
        }
        if self.video {
            actions.push(FilterAction::ToggleVideo(true));
        }
        if self.high_traffic {
            actions.push(FilterAction::ToggleHighTraffic(true));
        }
        actions
    }
}

fn create_source(cli: &Cli) -> buzz_core::Result<Box<dyn ArticleSource>> {
    let enricher = match cli.seed {
        Some(seed) => FlagEnricher::seeded(cli.flags, seed),
        None => FlagEnricher::new(cli.flags),
    };
    debug!("Flag policy: {}", enricher.policy());

    match &cli.from_file {
        Some(path) => Ok(Box::new(StaticSource::from_file(path, enricher))),
        None => Ok(Box::new(HttpSource::new(&cli.endpoint, enricher)?)),
    }
}

fn apply_filters(manager: &mut ArticleManager, filters: &FilterArgs) {
    let known_statuses = manager.statuses();
    for action in filters.actions(&known_statuses) {
        manager.dispatch(action);
    }
}

fn print_view(manager: &ArticleManager, format: OutputFormat) -> anyhow::Result<()> {
    let visible = manager.visible();
    println!("{}", render::render_articles(&visible, &manager.summary(), format)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = create_source(&cli)?;
    let mut manager = ArticleManager::new();
    manager.load(source.as_ref()).await;

    match &cli.command {
        Commands::List { filters } => {
            apply_filters(&mut manager, filters);
            print_view(&manager, cli.format)?;
        }
        Commands::Facets => {
            let out = render::render_facets(&manager.categories(), &manager.authors(), cli.format)?;
            println!("{}", out);
        }
        Commands::Clone { id, filters } => {
            match manager.clone_article(id) {
                Some(copy) => info!("🆕 Created draft {} ({})", copy.id, copy.title),
                None => warn!("No article with id {}; nothing cloned", id),
            }
            apply_filters(&mut manager, filters);
            print_view(&manager, cli.format)?;
        }
    }

    Ok(())
}
