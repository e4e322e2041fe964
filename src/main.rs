use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use spellsphere::config::GameConfig;
use spellsphere::validation::WordListDictionary;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list, tab-separated, word in the first column.
    #[arg(global = true, short, long, default_value = "data/words_en.tsv")]
    words: String,

    /// Language tag the word list is registered under.
    #[arg(global = true, long, default_value = "en")]
    language: String,

    /// Directory holding the persisted score history.
    #[arg(global = true, long, default_value = "data/saves")]
    save_dir: String,

    /// JSON game config; flags given on the command line still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Check(cmd::check::CheckArgs),
    History(cmd::history::HistoryArgs),
    Simulate(cmd::simulate::SimulateArgs),
}

fn main() {
    // 1. Parse raw matches so CLI-provided values can be told apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    // 2. History only reads the save file
    if let Commands::History(args) = &cli.command {
        cmd::history::run(args, Path::new(&cli.save_dir));
        return;
    }

    // 3. Resolve config: JSON file as base, explicit flags on top
    let (cli_config, sub_matches) = match &cli.command {
        Commands::Check(args) => (&args.config, matches.subcommand_matches("check")),
        Commands::Simulate(args) => (&args.config, matches.subcommand_matches("simulate")),
        Commands::History(_) => unreachable!("handled above"),
    };
    let config = resolve_config(cli.config.as_deref(), cli_config, sub_matches);

    // 4. Load dictionary
    println!("📖 Loading word list: {}", cli.words);
    let dictionary = match WordListDictionary::load_from_file(&cli.words, &cli.language) {
        Ok(d) => Arc::new(d),
        Err(e) => {
            eprintln!("❌ Could not load word list '{}': {}", cli.words, e);
            process::exit(1);
        }
    };

    // 5. Execute
    match &cli.command {
        Commands::Check(args) => cmd::check::run(args, config, dictionary),
        Commands::Simulate(args) => {
            cmd::simulate::run(args, config, dictionary, &cli.language, Path::new(&cli.save_dir))
        }
        Commands::History(_) => {}
    }
}

fn resolve_config(
    path: Option<&str>,
    cli_config: &GameConfig,
    sub_matches: Option<&clap::ArgMatches>,
) -> GameConfig {
    let config = match path {
        None => cli_config.clone(),
        Some(path) => {
            println!("⚙️  Loading config from: {}", path);
            let mut file_config = GameConfig::load_from_file(path).unwrap_or_else(|e| {
                eprintln!("❌ {}", e);
                process::exit(1);
            });
            if let Some(m) = sub_matches {
                file_config.merge_from_cli(cli_config, m);
            }
            file_config
        }
    };

    if let Err(e) = config.check() {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
    config
}
