// One-shot transliteration and dry-run lookups.
// Run with: cargo run --bin translit -- cyrillic borsht shchi
//           cargo run --bin translit -- lookup tr ru merhaba
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use translate_core::core::table::ScriptTables;
use translate_core::core::types::Script;
use translate_core::error::SettingsError;
use translate_core::ledger::SessionLedger;
use translate_core::persistence::{load_dictionary, MemoryStore};
use translate_core::trace_init::init_tracing;
use translate_core::{transliterate, Settings, TranslateEngine};

#[derive(Parser)]
#[command(name = "translit", about = "Render Latin phonetic spellings in Cyrillic or Greek")]
struct Cli {
    /// Settings file (TOML); custom tables and the dictionary path come from here
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate words with the Cyrillic table
    Cyrillic { words: Vec<String> },
    /// Transliterate words with the Greek table
    Greek { words: Vec<String> },
    /// Look a word up without writing history or favorites
    Lookup {
        source: String,
        target: String,
        word: String,
        /// Dictionary file, overrides the settings
        #[arg(long)]
        dictionary: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing("translate_core=warn");
    let cli = Cli::parse();

    let (settings, tables) = match load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Cyrillic { words } => print_rendered(&tables, Script::Cyrillic, &words),
        Command::Greek { words } => print_rendered(&tables, Script::Greek, &words),
        Command::Lookup { source, target, word, dictionary } => {
            let path = dictionary.unwrap_or(settings.paths.dictionary);
            let ledger = SessionLedger::open(MemoryStore::new());
            let mut engine = TranslateEngine::new(load_dictionary(&path), tables, ledger);
            match engine.lookup_and_transliterate(&word, &source, &target) {
                Ok(t) => {
                    println!("{} => {} ({})", t.source, t.output, t.pronunciation);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn load(config: Option<&Path>) -> Result<(Settings, ScriptTables), SettingsError> {
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let tables = settings.load_tables()?;
    Ok((settings, tables))
}

fn print_rendered(tables: &ScriptTables, script: Script, words: &[String]) -> ExitCode {
    let Some(table) = tables.table_for(script) else {
        return ExitCode::FAILURE;
    };
    for word in words {
        println!("{} => {}", word, transliterate(&word.to_lowercase(), table));
    }
    ExitCode::SUCCESS
}
