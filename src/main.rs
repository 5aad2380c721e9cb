use std::error::Error;
use std::path::{Path, PathBuf};

use bpaf::Bpaf;
use tracing_subscriber::EnvFilter;
use waf_boards_core::{BoardRegistry, ConfigDict, ConfigValue, ROOT_CLASS};

use crate::config::Config;

mod catalog;
mod config;

#[derive(Clone, Debug, Bpaf)]
enum Command {
    /// List the registered board names
    #[bpaf(command)]
    List {
        /// Also print the board each one derives from
        #[bpaf(short, long)]
        long: bool,
    },
    /// Print the compiled configuration of a board
    #[bpaf(command)]
    Show {
        /// Only print the values of a single key, one per line
        #[bpaf(short, long, argument("KEY"))]
        key: Option<String>,
        /// Board to compile, defaults to general.default_board
        #[bpaf(positional("BOARD"))]
        board: Option<String>,
    },
    /// Write a default configuration file
    #[bpaf(command)]
    Init {
        /// Overwrite an existing file
        #[bpaf(long)]
        force: bool,
    },
}

#[derive(Clone, Debug, Bpaf)]
#[bpaf(options, version, descr(env!("CARGO_PKG_DESCRIPTION")))]
struct Cli {
    /// Configuration file to use instead of the default location
    #[bpaf(short, long, argument("PATH"))]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[bpaf(short, long)]
    verbose: bool,
    #[bpaf(external(command))]
    command: Command,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load(path: Option<&Path>) -> Result<(Config, BoardRegistry), Box<dyn Error>> {
    let config = Config::load(path)?;
    let registry = catalog::load(&config)?;
    Ok((config, registry))
}

fn list(registry: &BoardRegistry, long: bool) -> Result<(), Box<dyn Error>> {
    let names = registry.names();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    for name in names {
        if long {
            let base = registry.class(name)?.base().unwrap_or(ROOT_CLASS);
            println!("{name:width$}  {base}");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

/// Render a compiled board as TOML, or only the values of `key`
fn render(dict: &ConfigDict, key: Option<&str>) -> Result<String, Box<dyn Error>> {
    let Some(key) = key else {
        return Ok(toml::to_string_pretty(dict)?);
    };

    let value = dict.get(key).ok_or_else(|| {
        let valid: Vec<_> = dict.keys().map(String::as_str).collect();
        format!("unknown key '{key}'. Valid: {}", valid.join(", "))
    })?;
    Ok(match value {
        ConfigValue::Scalar(s) => format!("{s}\n"),
        ConfigValue::List(items) => items.iter().map(|item| format!("{item}\n")).collect(),
    })
}

fn show(registry: &BoardRegistry, board: &str, key: Option<&str>) -> Result<(), Box<dyn Error>> {
    let dict = registry.get_board(board).map_err(|_| {
        format!(
            "unknown board: {board}. Available: {}",
            registry.names().join(", ")
        )
    })?;
    print!("{}", render(&dict, key)?);
    Ok(())
}

fn init(path: Option<PathBuf>, force: bool) -> Result<(), Box<dyn Error>> {
    let path = path
        .or_else(Config::path)
        .ok_or(config::ConfigError::NoConfigDir)?;
    if path.exists() && !force {
        return Err(format!("{} already exists, use --force to overwrite", path.display()).into());
    }

    Config::default().save_with_header(&path)?;
    println!("created default config at {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = cli().run();
    init_tracing(cli.verbose);

    match cli.command {
        Command::List { long } => {
            let (_, registry) = load(cli.config.as_deref())?;
            list(&registry, long)
        },
        Command::Show { key, board } => {
            let (config, registry) = load(cli.config.as_deref())?;
            let board = config.board_name(board)?;
            show(&registry, &board, key.as_deref())
        },
        Command::Init { force } => init(cli.config, force),
    }
}
