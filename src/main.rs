use clap::{Parser, Subcommand, ValueEnum};
use studio_folio::config::{self, SiteConfig};
use studio_folio::list::Column;
use studio_folio::logging::{self, LogConfig};
use studio_folio::output;
use studio_folio::render;
use studio_folio::store::{DataStore, DirSource};
use studio_folio::studio::{Intent, Studio, Update};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "studio-folio")]
#[command(about = "Inspect and render an architecture-studio portfolio")]
#[command(long_about = "\
Inspect and render an architecture-studio portfolio

The site directory holds a table of contents and one detail document per
project. Everything the page shows is derived from these two documents.

Site structure:

  site/
  ├── config.toml                  # Optional, sparse overrides
  ├── img/splash.jpg               # Default splash
  └── content/
      ├── toc.json                 # {\"projects\": [{id, directory, name, year, ...}]}
      └── projects/01-harbor/
          ├── project.json         # {title, description, credits, images}
          ├── thumb.jpg            # Listing thumbnail
          └── img/splash.jpg       # Splash shown while hovering the project

A project whose detail document is missing or broken still lists; its
gallery is simply empty.

Run 'studio-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every document and print an inventory
    Check,
    /// Print the project listing
    List {
        /// Sort column; repeat the same column to flip direction
        #[arg(long = "sort", value_name = "COLUMN")]
        sorts: Vec<Column>,
        /// Filter as COLUMN=VALUE (program or location)
        #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
        filters: Vec<(Column, String)>,
    },
    /// Print the distinct values of a column
    Values {
        column: Column,
    },
    /// Print the initial view of the site
    View {
        #[arg(long, value_enum, default_value_t = ViewFormat::Json)]
        format: ViewFormat,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewFormat {
    Json,
    Html,
}

fn parse_filter(s: &str) -> Result<(Column, String), String> {
    let (column, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{s}'"))?;
    let column: Column = column.parse().map_err(|e| format!("{e}"))?;
    if !column.is_filterable() {
        return Err(format!("{column} is not a filterable column"));
    }
    Ok((column, value.trim().to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(&LogConfig::from_verbosity(cli.verbose));

    match cli.command {
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            let store = DataStore::new(DirSource::new(&cli.root), config.content.clone());
            let projects = store.load_all()?;
            output::print_inventory(&projects, &config.gallery);
        }
        Command::List { sorts, filters } => {
            let mut studio = load_studio(&cli.root)?;
            for column in sorts {
                if studio.dispatch(Intent::SortBy(column)) == Update::Ignored {
                    return Err(format!("cannot sort by {column}").into());
                }
            }
            for (column, value) in filters {
                let intent = Intent::FilterBy(column, Some(value.clone()));
                if studio.dispatch(intent) == Update::Ignored {
                    return Err(format!("no project has {column} = {value}").into());
                }
            }
            output::print_listing(studio.list());
        }
        Command::Values { column } => {
            let studio = load_studio(&cli.root)?;
            output::print_values(column, &studio.list().unique_values(column));
        }
        Command::View { format } => {
            let studio = load_studio(&cli.root)?;
            let view = render::site_view(&studio);
            match format {
                ViewFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                ViewFormat::Html => println!("{}", render::site_markup("Studio", &view).into_string()),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_studio(root: &Path) -> Result<Studio, Box<dyn std::error::Error>> {
    let config: SiteConfig = config::load_config(root)?;
    Ok(Studio::load(DirSource::new(root), config)?)
}
