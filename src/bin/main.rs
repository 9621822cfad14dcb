use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, stdin, stdout, Stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use translate_core::error::SettingsError;
use translate_core::ledger::LedgerStore;
use translate_core::trace_init::init_tracing;
use translate_core::{EngineError, LanguageCode, LedgerEntry, Settings, TranslateEngine, Translation};

#[derive(Parser)]
#[command(name = "mini-translate", about = "Multilingual word lookup with Cyrillic and Greek rendering")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dictionary file, overrides the settings
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// Directory that relative data paths are resolved against
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy)]
enum ListKind {
    History,
    Favorites,
}

fn main() -> ExitCode {
    init_tracing("translate_core=warn");
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut engine = match TranslateEngine::open(&settings) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return ExitCode::FAILURE;
        }
    };

    if engine.dictionary().is_empty() {
        eprintln!(
            "[WARN] No dictionary entries loaded from '{}'; every lookup will fail.",
            settings.paths.dictionary.display()
        );
    }

    match run(&mut engine, settings.ledger.recent) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, SettingsError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(dictionary) = &cli.dictionary {
        settings.paths.dictionary = dictionary.clone();
    }
    if let Some(dir) = &cli.data_dir {
        settings = settings.with_data_dir(dir);
    }
    Ok(settings)
}

fn run<S: LedgerStore>(engine: &mut TranslateEngine<S>, recent: usize) -> io::Result<()> {
    let mut out = stdout();
    let mut source = LanguageCode::Tr;
    let mut target = LanguageCode::Ru;

    loop {
        print_menu(&mut out, source, target)?;
        let Some(choice) = prompt(&mut out, "> ")? else { break };

        match choice.as_str() {
            "1" | "t" => {
                let Some(pair) = choose_languages(&mut out, source, target)? else { break };
                (source, target) = pair;
                if !translate(engine, &mut out, source, target)? {
                    break;
                }
            }
            "2" | "h" => {
                if !browse(engine, &mut out, ListKind::History, recent)? {
                    break;
                }
            }
            "3" | "f" => {
                if !browse(engine, &mut out, ListKind::Favorites, recent)? {
                    break;
                }
            }
            "4" => report(&mut out, engine.clear_history().map(|_| "History cleared."))?,
            "5" => report(&mut out, engine.clear_favorites().map(|_| "Favorites cleared."))?,
            "q" | "exit" => break,
            "" => {}
            other => writeln!(out, "{}", format!("Unknown choice '{}'", other).red())?,
        }
    }
    writeln!(out, "Bye.")?;
    Ok(())
}

fn print_menu(out: &mut Stdout, source: LanguageCode, target: LanguageCode) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "MiniTranslate".bold().cyan())?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Languages: tr, ru, el, de    (last pair: {} -> {})", source, target)?;
    writeln!(out, "  1) translate   2) history   3) favorites")?;
    writeln!(out, "  4) clear history   5) clear favorites   q) quit")?;
    Ok(())
}

/// `None` on end of input.
fn prompt(out: &mut Stdout, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn choose_languages(
    out: &mut Stdout,
    source: LanguageCode,
    target: LanguageCode,
) -> io::Result<Option<(LanguageCode, LanguageCode)>> {
    let Some(source) = prompt_language(out, "Source", source)? else { return Ok(None) };
    let Some(target) = prompt_language(out, "Target", target)? else { return Ok(None) };
    Ok(Some((source, target)))
}

fn prompt_language(
    out: &mut Stdout,
    label: &str,
    current: LanguageCode,
) -> io::Result<Option<LanguageCode>> {
    loop {
        let Some(code) = prompt(out, &format!("{} language [{}]: ", label, current))? else {
            return Ok(None);
        };
        if code.is_empty() {
            return Ok(Some(current));
        }
        match code.parse::<LanguageCode>() {
            Ok(lang) => return Ok(Some(lang)),
            Err(e) => writeln!(out, "{}", e.to_string().red())?,
        }
    }
}

/// `false` on end of input.
fn translate<S: LedgerStore>(
    engine: &mut TranslateEngine<S>,
    out: &mut Stdout,
    source: LanguageCode,
    target: LanguageCode,
) -> io::Result<bool> {
    let Some(word) = prompt(out, "Word: ")? else { return Ok(false) };

    let t = match engine.lookup(&word, source, target) {
        Ok(t) => t,
        Err(EngineError::HistoryNotSaved { translation, source: error }) => {
            writeln!(out, "{}", format!("[ERROR] history not saved: {}", error).red())?;
            *translation
        }
        Err(EngineError::Lookup(e)) => {
            writeln!(out, "{}", e.to_string().red())?;
            return Ok(true);
        }
    };

    print_translation(out, &t)?;
    if engine.ledger().is_favorite(&t.input) {
        writeln!(out, "{}", "* already a favorite".yellow())?;
        return Ok(true);
    }

    let Some(answer) = prompt(out, "Add to favorites? (y/n): ")? else { return Ok(false) };
    if answer.eq_ignore_ascii_case("y") {
        report(out, engine.favorite_last().map(|added| if added { "Added." } else { "Nothing to add." }))?;
    }
    Ok(true)
}

fn print_translation(out: &mut Stdout, t: &Translation) -> io::Result<()> {
    writeln!(out, "\n--- RESULT ---")?;
    writeln!(out, "Source        : {}", t.source)?;
    writeln!(out, "Target        : {}", t.output.as_str().bold().green())?;
    writeln!(out, "Pronunciation : {}", t.pronunciation)
}

/// Lists history or favorites. `N` recalls entry N, `d N` deletes it.
/// `false` on end of input.
fn browse<S: LedgerStore>(
    engine: &mut TranslateEngine<S>,
    out: &mut Stdout,
    kind: ListKind,
    recent: usize,
) -> io::Result<bool> {
    loop {
        let entries: Vec<LedgerEntry> = match kind {
            ListKind::History => engine.ledger().recent_history(recent).to_vec(),
            ListKind::Favorites => engine.ledger().favorites().to_vec(),
        };

        execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        let title = match kind {
            ListKind::History => format!("History (last {})", recent),
            ListKind::Favorites => "Favorites".to_string(),
        };
        writeln!(out, "{}", title.bold().cyan())?;
        if entries.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for (i, entry) in entries.iter().enumerate() {
            let star = if engine.ledger().is_favorite(&entry.input) { "*" } else { " " };
            writeln!(
                out,
                "  {:>2}{} {} -> {}  [{} -> {}]",
                i + 1,
                star,
                entry.input,
                entry.output,
                entry.from,
                entry.to
            )?;
        }
        writeln!(out, "\nN: show entry N   d N: delete entry N   Enter: back")?;

        let Some(cmd) = prompt(out, "> ")? else { return Ok(false) };
        if cmd.is_empty() {
            return Ok(true);
        }

        let (delete, number) = match cmd.strip_prefix('d') {
            Some(rest) => (true, rest.trim()),
            None => (false, cmd.as_str()),
        };
        let Some(entry) = number
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| entries.get(i))
        else {
            writeln!(out, "{}", "No such entry.".red())?;
            continue;
        };

        if delete {
            let result = match kind {
                ListKind::History => engine.remove_history(entry),
                ListKind::Favorites => engine.remove_favorite(entry),
            };
            report(out, result.map(|_| "Removed."))?;
        } else {
            writeln!(out, "\n{} -> {}", entry.input, entry.output.as_str().bold().green())?;
            writeln!(out, "Pronunciation : {}", entry.pronunciation)?;
            engine.recall(entry.clone());
            if !engine.ledger().is_favorite(&entry.input) {
                let Some(answer) = prompt(out, "Add to favorites? (y/n): ")? else { return Ok(false) };
                if answer.eq_ignore_ascii_case("y") {
                    report(out, engine.favorite_last().map(|_| "Added."))?;
                }
            } else if prompt(out, "Press Enter to continue")?.is_none() {
                return Ok(false);
            }
        }
    }
}

fn report<E: std::fmt::Display>(out: &mut Stdout, result: Result<&str, E>) -> io::Result<()> {
    match result {
        Ok(msg) => writeln!(out, "{}", msg.green()),
        Err(e) => writeln!(out, "{}", format!("[ERROR] could not save: {}", e).red()),
    }
}
