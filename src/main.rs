use clap::{Parser, Subcommand};
use menuforge::config::{self, MenuConfig};
use menuforge::menu::{Manifest, ParseOptions, ParsedMenu, parse_menu};
use menuforge::{generate, output, validate};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "menuforge")]
#[command(about = "Menu, dictionary and URL generator for multilingual PHP sites")]
#[command(long_about = "\
Menu, dictionary and URL generator for multilingual PHP sites

The menu file is an indented outline, one page per line. A line of ten or
more hyphens starts the translation of the same outline into the secondary
language, page by page in the same order.

Menu file:

  Inicio (SEO: Tienda de decoración)     # Home page → web.php
  La botiga                              # Page → la-botiga.php
    Regalos para ella                    # Subpage (indent: tab or 2 spaces)
  Servicios (*)                          # Menu entry only, no file
  Aviso legal (**)                       # File without SEO texts
  Blog (autogestionable)                 # Maintained by hand, no file
  # comment lines and blank lines are ignored
  ----------------------------------------
  Inici (SEO: Botiga de decoració)
  La botiga
    Regals per a ella
  Serveis (*)
  Avís legal (**)
  Blog (autogestionable)

A config.toml next to the menu file sets languages, parsing limits and
business details. Run 'menuforge gen-config' to generate a documented one.")]
#[command(version)]
struct Cli {
    /// Primary language code (overrides config.toml)
    #[arg(long, global = true)]
    primary: Option<String>,

    /// Secondary language code (overrides config.toml)
    #[arg(long, global = true)]
    secondary: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a menu file and show the resulting pages
    Parse {
        /// Menu file
        menu: PathBuf,
        /// Print the full manifest as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Validate one or more menu files without writing anything
    Check {
        /// Menu files
        #[arg(required = true)]
        menus: Vec<PathBuf>,
    },
    /// Write menu.json and the PHP includes for a menu file
    Generate {
        /// Menu file
        menu: PathBuf,
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Parse { menu, json } => {
            let config = load_config(&cli, menu)?;
            let content = std::fs::read_to_string(menu)?;
            let parsed = parse_menu(&content, &ParseOptions::from_config(&config))?;
            let manifest = Manifest::build(&parsed, &config);
            if *json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_parse_output(&parsed, &manifest);
            }
        }
        Command::Check { menus } => {
            let configs = menus
                .iter()
                .map(|menu| load_config(&cli, menu).map_err(|e| e.to_string()))
                .collect::<Vec<_>>();
            if let Some(Ok(first)) = configs.first() {
                init_thread_pool(&first.processing);
            }

            let results: Vec<Result<ParsedMenu, String>> = menus
                .par_iter()
                .zip(configs.par_iter())
                .map(|(menu, config)| check_menu(menu, config.as_ref().map_err(Clone::clone)?))
                .collect();

            for ((menu, config), result) in menus.iter().zip(&configs).zip(&results) {
                let secondary = config
                    .as_ref()
                    .ok()
                    .and_then(|c| c.languages.secondary.as_deref());
                output::print_check_output(menu, result, secondary);
            }

            let failed = results.iter().filter(|r| r.is_err()).count();
            if failed > 0 {
                return Err(format!("{failed} of {} menus failed", menus.len()).into());
            }
        }
        Command::Generate { menu, output: out } => {
            let config = load_config(&cli, menu)?;
            let generated = generate::generate(menu, out, &config)?;
            output::print_generate_output(&generated, out);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the menu's config and apply the language flags on top.
fn load_config(cli: &Cli, menu: &Path) -> Result<MenuConfig, config::ConfigError> {
    let mut config = config::load_config_for_menu(menu)?;
    if let Some(primary) = &cli.primary {
        config.languages.primary = primary.clone();
    }
    if let Some(secondary) = &cli.secondary {
        config.languages.secondary = Some(secondary.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Parse one menu and run the policy checks on it.
fn check_menu(menu: &Path, config: &MenuConfig) -> Result<ParsedMenu, String> {
    let content = std::fs::read_to_string(menu).map_err(|e| e.to_string())?;
    let parsed =
        parse_menu(&content, &ParseOptions::from_config(config)).map_err(|e| e.to_string())?;
    validate::validate_menu_structure(&parsed.combined, config.validation.min_pages)
        .map_err(|e| e.to_string())?;
    validate::validate_project(&config.project).map_err(|e| e.to_string())?;
    Ok(parsed)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
