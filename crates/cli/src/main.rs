use anyhow::Context;
use catalog_core::application::{CarouselScreen, CatalogService};
use catalog_core::config::{CarouselConfig, DEFAULT_LAYOUT_WIDTH, DEFAULT_PAGE_SIZE};
use catalog_core::domain::{ArticleDraft, ItemKind, NoteDraft, RecipeDraft};
use catalog_core::ports::{CardRenderer, CatalogRepository};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use markdown_adapter::{export_pages, MarkdownCardRenderer};
use sqlite_adapter::{SqliteCatalogRepository, USER_AUTHOR};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Browse and edit a recipe and article catalog stored in SQLite
#[derive(Parser, Debug)]
#[command(name = "recipe-catalog")]
#[command(about = "Browses recipes and articles page by page and edits the catalog")]
struct Cli {
    /// Path to the catalog SQLite database file
    #[arg(long = "db", env = "CATALOG_DB")]
    db: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Cards per page
    #[arg(long, env = "CATALOG_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Width in pixels available to the card grid
    #[arg(long = "width", env = "CATALOG_LAYOUT_WIDTH", default_value_t = DEFAULT_LAYOUT_WIDTH)]
    layout_width: u32,
}

impl LayoutArgs {
    fn config(&self) -> catalog_core::Result<CarouselConfig> {
        CarouselConfig::new(self.page_size, self.layout_width)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the catalog tables
    Init,
    /// Print every recipe or article
    List {
        kind: ItemKind,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Page through cards interactively (n = next, p = previous, q = quit)
    Browse {
        kind: ItemKind,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Write every page as a Markdown file
    Export {
        kind: ItemKind,
        /// Folder receiving the page files
        #[arg(short = 'o', long = "out")]
        out: PathBuf,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    #[command(subcommand)]
    Recipe(RecipeCommand),
    #[command(subcommand)]
    Article(ArticleCommand),
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(subcommand)]
    Photo(PhotoCommand),
}

#[derive(Args, Debug)]
struct RecipeFields {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    utensils: String,
    #[arg(long, default_value = "")]
    ingredients: String,
    #[arg(long, default_value = "")]
    steps: String,
}

impl From<RecipeFields> for RecipeDraft {
    fn from(fields: RecipeFields) -> Self {
        RecipeDraft {
            title: fields.title,
            utensils: fields.utensils,
            ingredients: fields.ingredients,
            steps: fields.steps,
        }
    }
}

#[derive(Args, Debug)]
struct TextFields {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    content: String,
}

#[derive(Subcommand, Debug)]
enum RecipeCommand {
    /// Add a user recipe
    Add(RecipeFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: RecipeFields,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ArticleCommand {
    Add(TextFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: TextFields,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    /// Add a note to a recipe
    Add {
        recipe_id: i64,
        #[command(flatten)]
        fields: TextFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: TextFields,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum PhotoCommand {
    /// Attach a photo path to a recipe, article or note
    Attach {
        target: PhotoTarget,
        id: i64,
        path: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PhotoTarget {
    Recipe,
    Article,
    Note,
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn list(service: &CatalogService, kind: ItemKind, json: bool) -> anyhow::Result<()> {
    let items = service.load_items(kind)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for item in &items {
        println!(
            "{}\t{}\t{}",
            item.id(),
            item.title(),
            item.image_path().unwrap_or("-")
        );
    }
    println!("{} {}(s)", items.len(), kind);
    Ok(())
}

/// Outcome of one line typed on the browse screen
#[derive(Debug, PartialEq, Eq)]
enum BrowseStep {
    /// Page redrawn; carries whether the page changed
    Redrawn(bool),
    Quit,
    Ignored,
    Unknown(String),
}

const BROWSE_PROMPT: &str = "[n]ext  [p]revious  [q]uit";

fn browse_step<R: CardRenderer>(screen: &mut CarouselScreen<R>, input: &str) -> catalog_core::Result<BrowseStep> {
    let step = match input.trim() {
        "n" | ">" => BrowseStep::Redrawn(screen.next()?),
        "p" | "<" => BrowseStep::Redrawn(screen.previous()?),
        "q" | "quit" => BrowseStep::Quit,
        "" => BrowseStep::Ignored,
        other => BrowseStep::Unknown(other.to_string()),
    };
    Ok(step)
}

fn browse(service: &CatalogService, kind: ItemKind, config: CarouselConfig) -> anyhow::Result<()> {
    let carousel = service.open_carousel(kind, &config)?;
    let mut screen = CarouselScreen::new(carousel, MarkdownCardRenderer::new(), config.layout_width)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", screen.renderer().markdown())?;
    writeln!(out, "{}", BROWSE_PROMPT)?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        match browse_step(&mut screen, &line?)? {
            BrowseStep::Redrawn(_) => {
                write!(out, "{}", screen.renderer().markdown())?;
                writeln!(out, "{}", BROWSE_PROMPT)?;
                out.flush()?;
            }
            BrowseStep::Quit => break,
            BrowseStep::Ignored => {}
            BrowseStep::Unknown(other) => {
                eprintln!("unknown command '{}' (expected n, p or q)", other);
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Instantiate the concrete repository and hand it to the core service
    let repository = SqliteCatalogRepository::open(&cli.db)
        .with_context(|| format!("cannot open catalog at {}", cli.db.display()))?;
    let service = CatalogService::new(Box::new(repository));
    let repo = service.repository();

    match cli.command {
        Command::Init => {
            repo.init_schema()?;
            println!("Catalog ready at {}", cli.db.display());
        }
        Command::List { kind, json } => list(&service, kind, json)?,
        Command::Browse { kind, layout } => browse(&service, kind, layout.config()?)?,
        Command::Export { kind, out, layout } => {
            let config = layout.config()?;
            let carousel = service.open_carousel(kind, &config)?;
            let written = export_pages(carousel, &out, config.layout_width)?;
            println!("Wrote {} page(s) to {}", written.len(), out.display());
        }
        Command::Recipe(command) => match command {
            RecipeCommand::Add(fields) => {
                let id = repo.create_recipe(&fields.into(), Some(USER_AUTHOR))?;
                println!("Created recipe {}", id);
            }
            RecipeCommand::Update { id, fields } => {
                repo.update_recipe(id, &fields.into())?;
                println!("Updated recipe {}", id);
            }
            RecipeCommand::Delete { id } => {
                repo.delete_recipe(id)?;
                println!("Deleted recipe {}", id);
            }
        },
        Command::Article(command) => match command {
            ArticleCommand::Add(fields) => {
                let id = repo.create_article(&ArticleDraft {
                    title: fields.title,
                    content: fields.content,
                })?;
                println!("Created article {}", id);
            }
            ArticleCommand::Update { id, fields } => {
                repo.update_article(
                    id,
                    &ArticleDraft {
                        title: fields.title,
                        content: fields.content,
                    },
                )?;
                println!("Updated article {}", id);
            }
            ArticleCommand::Delete { id } => {
                repo.delete_article(id)?;
                println!("Deleted article {}", id);
            }
        },
        Command::Note(command) => match command {
            NoteCommand::Add { recipe_id, fields } => {
                let id = repo.add_note(
                    recipe_id,
                    &NoteDraft {
                        title: fields.title,
                        content: fields.content,
                    },
                )?;
                println!("Added note {} to recipe {}", id, recipe_id);
            }
            NoteCommand::Update { id, fields } => {
                repo.update_note(
                    id,
                    &NoteDraft {
                        title: fields.title,
                        content: fields.content,
                    },
                )?;
                println!("Updated note {}", id);
            }
            NoteCommand::Delete { id } => {
                repo.delete_note(id)?;
                println!("Deleted note {}", id);
            }
        },
        Command::Photo(PhotoCommand::Attach { target, id, path }) => {
            let photo_id = match target {
                PhotoTarget::Recipe => repo.attach_recipe_photo(id, &path)?,
                PhotoTarget::Article => repo.attach_article_photo(id, &path)?,
                PhotoTarget::Note => repo.attach_note_photo(id, &path)?,
            };
            println!("Attached photo {} ({})", photo_id, path);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    info!(db = %cli.db.display(), "recipe-catalog starting");

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::domain::{Article, CatalogItem};
    use catalog_core::Carousel;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_browse_with_layout() {
        let cli = Cli::try_parse_from([
            "recipe-catalog", "--db", "catalog.db", "browse", "article", "--page-size", "3", "--width", "900",
        ])
        .unwrap();
        match cli.command {
            Command::Browse { kind, layout } => {
                assert_eq!(kind, ItemKind::Article);
                assert_eq!(layout.config().unwrap(), CarouselConfig::new(3, 900).unwrap());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_zero_page_size_fails_validation() {
        let cli = Cli::try_parse_from([
            "recipe-catalog", "--db", "catalog.db", "export", "recipe", "--out", "pages", "--page-size", "0",
        ])
        .unwrap();
        match cli.command {
            Command::Export { layout, .. } => assert!(layout.config().is_err()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn article_screen(count: i64) -> CarouselScreen<MarkdownCardRenderer> {
        let items = (1..=count)
            .map(|id| {
                CatalogItem::Article(Article {
                    id,
                    title: format!("Article {}", id),
                    content: "body".to_string(),
                    author: None,
                    publish_date: String::new(),
                    photo_path: None,
                })
            })
            .collect();
        let carousel = Carousel::new(ItemKind::Article, items, 3).unwrap();
        CarouselScreen::new(carousel, MarkdownCardRenderer::new(), 900).unwrap()
    }

    #[test]
    fn test_browse_step_navigates_and_redraws() {
        let mut screen = article_screen(5);

        assert_eq!(browse_step(&mut screen, "n").unwrap(), BrowseStep::Redrawn(true));
        assert_eq!(screen.carousel().current_page(), 1);
        assert!(screen.renderer().markdown().ends_with("< 2 of 2 >\n"));

        assert_eq!(browse_step(&mut screen, ">").unwrap(), BrowseStep::Redrawn(false));
        assert_eq!(browse_step(&mut screen, " p ").unwrap(), BrowseStep::Redrawn(true));
        assert_eq!(screen.carousel().current_page(), 0);
        assert_eq!(browse_step(&mut screen, "<").unwrap(), BrowseStep::Redrawn(false));
        assert!(screen.renderer().markdown().ends_with("< 1 of 2 >\n"));
    }

    #[test]
    fn test_browse_step_quit_blank_and_unknown() {
        let mut screen = article_screen(5);

        assert_eq!(browse_step(&mut screen, "q").unwrap(), BrowseStep::Quit);
        assert_eq!(browse_step(&mut screen, "quit").unwrap(), BrowseStep::Quit);
        assert_eq!(browse_step(&mut screen, "   ").unwrap(), BrowseStep::Ignored);
        assert_eq!(
            browse_step(&mut screen, "jump 3").unwrap(),
            BrowseStep::Unknown("jump 3".to_string())
        );
        assert_eq!(screen.carousel().current_page(), 0);
    }

    #[test]
    fn test_layout_falls_back_to_env() {
        // Only this test sets these variables; the others pass layout flags explicitly
        std::env::set_var("CATALOG_PAGE_SIZE", "4");
        std::env::set_var("CATALOG_LAYOUT_WIDTH", "750");
        let parsed = Cli::try_parse_from(["recipe-catalog", "--db", "catalog.db", "browse", "recipe"]);
        std::env::remove_var("CATALOG_PAGE_SIZE");
        std::env::remove_var("CATALOG_LAYOUT_WIDTH");

        match parsed.unwrap().command {
            Command::Browse { layout, .. } => {
                assert_eq!(layout.config().unwrap(), CarouselConfig::new(4, 750).unwrap());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["recipe-catalog", "--db", "x.db", "list", "photo"]).is_err());
    }
}
