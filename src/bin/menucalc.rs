//! Command-line front end for the nutrition calculator.
//!
//! Usage:
//! ```bash
//! # Browse a dataset from ./data
//! menucalc menu --brand kfc --region uk --category Chicken --query fillet
//!
//! # Build a meal: two of one item, one of another
//! menucalc meal --brand starbucks --region us \
//!     --add starbucks_us_hot_coffees_caff_latte_grande_:2 \
//!     --add starbucks_us_bakery_butter_croissant
//!
//! # Datasets served over HTTP, JSON output
//! menucalc --base-url https://example.com/nutrition --json seo --brand mcdonalds
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use menucalc::{
    ALL_CATEGORIES, AppConfig, Brand, DatasetSource, LinkStatus, PageMeta, Session, SourceKind,
    Theme, ThemeStore, region_label,
};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "menucalc.yaml";
const EMPTY_MENU: &str = "No items found for this dataset.";
const EMPTY_MEAL: &str = "Add items to build your meal.";

#[derive(Parser)]
#[command(
    name = "menucalc",
    version,
    about = "Fast-food nutrition calculator",
    long_about = "Browse Starbucks, McDonald's and KFC nutrition datasets and total up a meal"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Read datasets below this directory
    #[arg(long, global = true, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// Fetch datasets under this URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatasetArgs {
    /// Brand key: starbucks, mcdonalds or kfc
    #[arg(long, default_value_t = Brand::Starbucks)]
    brand: Brand,

    /// Region key; defaults to the brand's default region
    #[arg(long)]
    region: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// List menu items, optionally filtered
    Menu {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,

        #[arg(long, default_value = "")]
        query: String,
    },
    /// List category options
    Categories {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Build a meal and print its totals
    Meal {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Item id to add, optionally with a quantity: ID[:QTY]
        #[arg(long = "add", value_name = "ID[:QTY]")]
        add: Vec<String>,

        /// Item id to remove after adding
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<String>,
    },
    /// List regions offered for a brand
    Regions {
        #[arg(long, default_value_t = Brand::Starbucks)]
        brand: Brand,
    },
    /// Print page metadata for a dataset
    Seo {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_file_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.source.kind = SourceKind::Dir;
        config.source.data_dir = dir.clone();
    }
    if let Some(url) = &cli.base_url {
        config.source.kind = SourceKind::Http;
        config.source.base_url = Some(url.clone());
    }

    init_tracing(&config);

    let source = config.build_source().context("building dataset source")?;
    let session = Session::new(source, config.registry());

    match cli.command {
        Command::Menu {
            dataset,
            category,
            query,
        } => {
            let session = open(session, &dataset).await;
            print_menu(&session, &category, &query, cli.json)
        }
        Command::Categories { dataset } => {
            let session = open(session, &dataset).await;
            print_categories(&session, cli.json)
        }
        Command::Meal {
            dataset,
            add,
            remove,
        } => {
            let mut session = open(session, &dataset).await;
            for spec in &add {
                let (id, qty) = parse_add(spec)?;
                if !add_line(&mut session, id, qty) {
                    warn!(item_id = id, brand = %session.brand(), "meal_add_unknown_item");
                }
            }
            for id in &remove {
                session.remove(id);
            }
            print_meal(&session, cli.json)
        }
        Command::Regions { brand } => {
            let registry = session.registry();
            let regions = registry.regions(brand);
            if cli.json {
                let rows: Vec<_> = regions
                    .iter()
                    .map(|r| json!({ "region": r, "label": region_label(r) }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for region in regions {
                    println!("{region}\t{}", region_label(region));
                }
            }
            Ok(())
        }
        Command::Seo { dataset } => {
            let region = dataset
                .region
                .unwrap_or_else(|| session.registry().default_region(dataset.brand));
            let meta = PageMeta::for_dataset(dataset.brand, &region);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&meta)?);
            } else {
                println!("title: {}", meta.title);
                println!("description: {}", meta.description);
                println!("keywords: {}", meta.keywords);
            }
            Ok(())
        }
        Command::Theme { action } => {
            let store = ThemeStore::new(&config.theme.path);
            let theme = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => store.load(),
                ThemeAction::Toggle => store.toggle(),
                ThemeAction::Set { theme } => {
                    store.save(theme);
                    theme
                }
            };
            if cli.json {
                println!("{}", json!({ "theme": theme }));
            } else {
                println!("{theme}");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_env("MENUCALC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn open<S: DatasetSource>(mut session: Session<S>, dataset: &DatasetArgs) -> Session<S> {
    session.select(dataset.brand, dataset.region.clone()).await;
    session
}

/// Add `qty` of a menu item. Unknown ids leave the meal untouched.
fn add_line<S: DatasetSource>(session: &mut Session<S>, id: &str, qty: u32) -> bool {
    if !session.add(id) {
        return false;
    }
    if qty > 1 {
        session.change_qty(id, i64::from(qty) - 1);
    }
    true
}

/// `ID` or `ID:QTY` with `QTY >= 1`.
fn parse_add(spec: &str) -> Result<(&str, u32)> {
    match spec.rsplit_once(':') {
        Some((id, qty)) => {
            let qty: u32 = qty
                .parse()
                .with_context(|| format!("invalid quantity in {spec:?}"))?;
            if qty == 0 {
                bail!("quantity must be at least 1 in {spec:?}");
            }
            Ok((id, qty))
        }
        None => Ok((spec, 1)),
    }
}

fn print_menu<S: DatasetSource>(
    session: &Session<S>,
    category: &str,
    query: &str,
    json: bool,
) -> Result<()> {
    let visible = session.visible(category, query);
    if json {
        let out = json!({
            "count": session.item_count_label(),
            "status": session.status(),
            "items": visible,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} ({})", session.item_count_label(), session.status());
    if let LinkStatus::Failed { message } = session.status() {
        println!("{message}");
        return Ok(());
    }
    if visible.is_empty() {
        println!("{EMPTY_MENU}");
        return Ok(());
    }
    for item in visible {
        println!(
            "{}\t{} kcal\t{}",
            item.name,
            menucalc::round_half_up(item.calories),
            item.id
        );
    }
    Ok(())
}

fn print_categories<S: DatasetSource>(session: &Session<S>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session.categories())?);
        return Ok(());
    }
    for category in session.categories() {
        if category == ALL_CATEGORIES {
            println!("All Categories");
        } else {
            println!("{category}");
        }
    }
    Ok(())
}

fn print_meal<S: DatasetSource>(session: &Session<S>, json: bool) -> Result<()> {
    let totals = session.display_totals();
    if json {
        let out = json!({
            "lines": session.meal(),
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if session.meal().is_empty() {
        println!("{EMPTY_MEAL}");
    } else {
        for line in session.meal().lines() {
            println!("{} x{}\t{}", line.item.name, line.qty, line.id());
        }
    }
    println!("{totals}");
    Ok(())
}
