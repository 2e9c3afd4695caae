use contact_book::config::{Config, DisplayConfig};
use contact_book::logging::{init_shell_tracing, LogRingBuffer};
use contact_book::shell::{execute, ContactCompleter, ShellCommand, ShellOutput};
use contact_book::store::{lock_store, ContactStore};
use crossterm::style::Stylize;
use crossterm::{cursor, terminal};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
    MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline,
    ReedlineEvent, ReedlineMenu, Signal,
};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

const SHELL_HISTORY_SIZE: usize = 200;

struct ContactPrompt;

impl Prompt for ContactPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("contacts")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => "> ".into(),
            PromptEditMode::Vi(vi_mode) => match vi_mode {
                reedline::PromptViMode::Normal => "N> ".into(),
                reedline::PromptViMode::Insert => "I> ".into(),
            },
            PromptEditMode::Custom(str) => format!("{str}> ").into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

fn print_usage() {
    println!("{}", "Contact Book - in-memory contacts with undo/redo".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  contact-book [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}  - Load configuration from <path>", "--config <path>".green());
    println!("  {} - Write a commented config file", "--generate-config".green());
    println!("  {}        - Start without the sample contacts", "--no-seed".green());
    println!("  {}           - Show this help", "--help".green());
    println!();
}

fn generate_config() -> anyhow::Result<PathBuf> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    Ok(path)
}

fn load_config(args: &[String]) -> Config {
    let explicit = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|pos| args.get(pos + 1))
        .map(PathBuf::from);

    let loaded = match &explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    loaded.unwrap_or_else(|e| {
        eprintln!("{}", format!("Config error: {:#}. Using defaults.", e).yellow());
        Config::default()
    })
}

fn shell_history_file() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("contact-book");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("history.txt"))
}

fn print_output(output: &ShellOutput, display: &DisplayConfig, logs: &LogRingBuffer) {
    match output {
        ShellOutput::Logs(count) => {
            let entries = logs.get_recent(*count);
            if entries.is_empty() {
                println!("No log entries.");
            }
            for entry in entries {
                println!("{}", entry.format_for_display());
            }
        }
        ShellOutput::Clear => {
            let mut stdout = io::stdout();
            if let Err(e) = crossterm::execute!(
                stdout,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            ) {
                tracing::warn!(target: "shell", "Failed to clear screen: {}", e);
            }
        }
        other => {
            let Some(text) = other.render(display) else {
                return;
            };
            if !display.use_colors {
                println!("{}", text);
                return;
            }
            match other {
                ShellOutput::Error(_) => eprintln!("{}", text.red()),
                ShellOutput::NotFound { .. } | ShellOutput::NoQuery => {
                    println!("{}", text.yellow())
                }
                ShellOutput::Found(_) | ShellOutput::Message(_) => println!("{}", text.green()),
                _ => println!("{}", text),
            }
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        match generate_config() {
            Ok(path) => {
                println!("Configuration file created at: {:?}", path);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error writing config file: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    let mut config = load_config(&args);
    if args.contains(&"--no-seed".to_string()) {
        config.store.seed_defaults = false;
    }

    let logs = init_shell_tracing(&config.logging.level);
    let store = ContactStore::from_config(&config.store).into_shared();

    let completion_menu = Box::new(
        ColumnarMenu::default()
            .with_name("contact_completion")
            .with_columns(1)
            .with_column_width(None)
            .with_column_padding(2),
    );

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Menu("contact_completion".to_string()),
    );

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(ContactCompleter::new(store.clone())))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    if let Some(history_file) = shell_history_file() {
        match FileBackedHistory::with_file(SHELL_HISTORY_SIZE, history_file) {
            Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
            Err(e) => tracing::warn!(target: "shell", "Shell history unavailable: {}", e),
        }
    }

    println!("{}", "Contact Book".blue().bold());
    println!("Type 'help' for commands, Ctrl+D to exit.");
    println!();

    let prompt = ContactPrompt;

    loop {
        match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => {
                let command = ShellCommand::parse(&buffer);
                let output = execute(&mut lock_store(&store), command);
                if output == ShellOutput::Quit {
                    println!("Goodbye!");
                    break;
                }
                print_output(&output, &config.display, &logs);
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    Ok(())
}
