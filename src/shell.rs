use crate::config::DisplayConfig;
use crate::contact::ContactRecord;
use crate::store::{lock_store, ContactStore, SearchOutcome, SharedStore};
use crate::table_display::render_contacts;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use reedline::{Completer, Span, Suggestion};

const DEFAULT_LOG_LINES: usize = 20;
const MAX_SUGGESTIONS: usize = 3;

pub const COMMANDS: [&str; 11] = [
    "list", "add", "delete", "search", "undo", "redo", "history", "logs", "help", "clear", "quit",
];

pub const HELP_TEXT: &str = "\
Commands:
  list                  Show all contacts
  add <name> <email>    Add a contact (the last word is the email)
  delete <name>         Delete a contact by name
  search <name>         Find a contact by name (case-insensitive)
  undo                  Revert the last add or delete
  redo                  Reapply the last undone change
  history               Show undo/redo depth
  logs [n]              Show the last n log lines
  clear                 Clear the screen
  help                  Show this help
  quit                  Exit";

/// One parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add { name: String, email: String },
    Delete(String),
    Search(String),
    Undo,
    Redo,
    History,
    Logs(usize),
    Help,
    Clear,
    Quit,
    Empty,
    /// Unusable input, with the message to show
    Invalid(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "list" | "ls" => ShellCommand::List,
            "add" => Self::parse_add(rest),
            "delete" | "del" | "rm" => {
                if rest.is_empty() {
                    ShellCommand::Invalid("Usage: delete <name>".to_string())
                } else {
                    ShellCommand::Delete(rest.to_string())
                }
            }
            // An empty search is passed through; the store reports it as no query
            "search" | "find" => ShellCommand::Search(rest.to_string()),
            "undo" => ShellCommand::Undo,
            "redo" => ShellCommand::Redo,
            "history" => ShellCommand::History,
            "logs" => match rest {
                "" => ShellCommand::Logs(DEFAULT_LOG_LINES),
                count => match count.parse() {
                    Ok(n) => ShellCommand::Logs(n),
                    Err(_) => ShellCommand::Invalid("Usage: logs [n]".to_string()),
                },
            },
            "help" | "?" => ShellCommand::Help,
            "clear" => ShellCommand::Clear,
            "quit" | "exit" => ShellCommand::Quit,
            other => ShellCommand::Invalid(format!(
                "Unknown command '{}'. Type 'help' for a list of commands.",
                other
            )),
        }
    }

    fn parse_add(rest: &str) -> Self {
        match rest.rsplit_once(char::is_whitespace) {
            Some((name, email)) if !name.trim().is_empty() => ShellCommand::Add {
                name: name.trim().to_string(),
                email: email.to_string(),
            },
            _ => ShellCommand::Invalid("Usage: add <name> <email>".to_string()),
        }
    }
}

/// What a command produced, for the caller to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutput {
    Contacts(Vec<ContactRecord>),
    Message(String),
    Found(ContactRecord),
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },
    NoQuery,
    History {
        undo_depth: usize,
        redo_depth: usize,
    },
    Logs(usize),
    Help,
    Clear,
    Quit,
    Nothing,
    Error(String),
}

impl ShellOutput {
    /// Text for outputs that are plain text; screen control is left to the caller
    pub fn render(&self, display: &DisplayConfig) -> Option<String> {
        match self {
            ShellOutput::Contacts(records) => Some(render_contacts(records, display)),
            ShellOutput::Message(message) | ShellOutput::Error(message) => Some(message.clone()),
            ShellOutput::Found(record) => Some(record.to_string()),
            ShellOutput::NotFound { query, suggestions } => {
                let mut text = format!("No contact named '{}'.", query);
                if !suggestions.is_empty() {
                    text.push_str(&format!(" Did you mean: {}?", suggestions.join(", ")));
                }
                Some(text)
            }
            ShellOutput::NoQuery => Some("Usage: search <name>".to_string()),
            ShellOutput::History {
                undo_depth,
                redo_depth,
            } => Some(format!(
                "{} change(s) to undo, {} to redo",
                undo_depth, redo_depth
            )),
            ShellOutput::Help => Some(HELP_TEXT.to_string()),
            ShellOutput::Logs(_)
            | ShellOutput::Clear
            | ShellOutput::Quit
            | ShellOutput::Nothing => None,
        }
    }
}

pub fn execute(store: &mut ContactStore, command: ShellCommand) -> ShellOutput {
    match command {
        ShellCommand::List => ShellOutput::Contacts(store.list_all()),
        ShellCommand::Add { name, email } => {
            store.add(&name, &email);
            ShellOutput::Message(format!("Added {} <{}>", name, email))
        }
        ShellCommand::Delete(name) => {
            let before = store.len();
            store.delete(&name);
            if store.len() < before {
                ShellOutput::Message(format!("Deleted {}", name))
            } else {
                ShellOutput::Message(format!("No contact named '{}'", name))
            }
        }
        ShellCommand::Search(name) => match store.search(&name) {
            SearchOutcome::Found(record) => ShellOutput::Found(record),
            SearchOutcome::NotFound => ShellOutput::NotFound {
                suggestions: suggest_names(store, &name, MAX_SUGGESTIONS),
                query: name,
            },
            SearchOutcome::NoQuery => ShellOutput::NoQuery,
        },
        ShellCommand::Undo => {
            if store.undo() {
                ShellOutput::Contacts(store.list_all())
            } else {
                ShellOutput::Message("Nothing to undo".to_string())
            }
        }
        ShellCommand::Redo => {
            if store.redo() {
                ShellOutput::Contacts(store.list_all())
            } else {
                ShellOutput::Message("Nothing to redo".to_string())
            }
        }
        ShellCommand::History => ShellOutput::History {
            undo_depth: store.undo_depth(),
            redo_depth: store.redo_depth(),
        },
        ShellCommand::Logs(count) => ShellOutput::Logs(count),
        ShellCommand::Help => ShellOutput::Help,
        ShellCommand::Clear => ShellOutput::Clear,
        ShellCommand::Quit => ShellOutput::Quit,
        ShellCommand::Empty => ShellOutput::Nothing,
        ShellCommand::Invalid(message) => ShellOutput::Error(message),
    }
}

/// Names that fuzzily match `query`, best first
pub fn suggest_names(store: &ContactStore, query: &str, limit: usize) -> Vec<String> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, String)> = store
        .names()
        .into_iter()
        .filter_map(|name| matcher.fuzzy_match(&name, query).map(|score| (score, name)))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.dedup_by(|a, b| a.1.eq_ignore_ascii_case(&b.1));
    scored.into_iter().take(limit).map(|(_, name)| name).collect()
}

/// Tab completion for command verbs and, after delete/search, contact names
pub struct ContactCompleter {
    store: SharedStore,
}

impl ContactCompleter {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Completer for ContactCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let input = line.get(..pos).unwrap_or(line);
        let input_lower = input.to_lowercase();

        let Some((verb, partial)) = input.split_once(char::is_whitespace) else {
            return COMMANDS
                .iter()
                .filter(|command| command.starts_with(&input_lower))
                .map(|command| Suggestion {
                    value: command.to_string(),
                    description: None,
                    extra: None,
                    span: Span { start: 0, end: pos },
                    style: None,
                    append_whitespace: true,
                })
                .collect();
        };

        if !matches!(verb.to_lowercase().as_str(), "delete" | "del" | "rm" | "search" | "find") {
            return Vec::new();
        }

        let partial = partial.trim_start();
        let start = input.len() - partial.len();
        let partial_lower = partial.to_lowercase();

        lock_store(&self.store)
            .names()
            .into_iter()
            .filter(|name| name.to_lowercase().starts_with(&partial_lower))
            .map(|name| Suggestion {
                value: name,
                description: Some("contact".to_string()),
                extra: None,
                span: Span { start, end: pos },
                style: None,
                append_whitespace: false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_splits_email_from_name() {
        assert_eq!(
            ShellCommand::parse("add Mary Ann mary@example.com"),
            ShellCommand::Add {
                name: "Mary Ann".to_string(),
                email: "mary@example.com".to_string()
            }
        );
        assert!(matches!(
            ShellCommand::parse("add lonely"),
            ShellCommand::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_verbs_ignore_case() {
        assert_eq!(ShellCommand::parse("  LIST "), ShellCommand::List);
        assert_eq!(ShellCommand::parse("Undo"), ShellCommand::Undo);
        assert_eq!(ShellCommand::parse("exit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse(""), ShellCommand::Empty);
    }

    #[test]
    fn test_parse_logs_count() {
        assert_eq!(ShellCommand::parse("logs"), ShellCommand::Logs(DEFAULT_LOG_LINES));
        assert_eq!(ShellCommand::parse("logs 5"), ShellCommand::Logs(5));
        assert!(matches!(ShellCommand::parse("logs many"), ShellCommand::Invalid(_)));
    }

    #[test]
    fn test_search_without_name_is_no_query() {
        let mut store = ContactStore::new();
        let command = ShellCommand::parse("search");
        assert_eq!(command, ShellCommand::Search(String::new()));
        assert_eq!(execute(&mut store, command), ShellOutput::NoQuery);
    }

    #[test]
    fn test_search_miss_suggests_names() {
        let mut store = ContactStore::new();
        let output = execute(&mut store, ShellCommand::parse("search alc"));

        match output {
            ShellOutput::NotFound { query, suggestions } => {
                assert_eq!(query, "alc");
                assert_eq!(suggestions, vec!["Alice".to_string()]);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_clear_is_left_to_the_terminal() {
        let mut store = ContactStore::new();
        let output = execute(&mut store, ShellCommand::parse("clear"));
        assert_eq!(output, ShellOutput::Clear);
        assert_eq!(output.render(&DisplayConfig::default()), None);
    }

    #[test]
    fn test_completer_offers_contact_names() {
        let shared = ContactStore::new().into_shared();
        let mut completer = ContactCompleter::new(shared);

        let suggestions = completer.complete("delete al", 9);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "Alice");
        assert_eq!(suggestions[0].span.start, 7);

        let verbs = completer.complete("re", 2);
        assert_eq!(verbs.len(), 1);
        assert_eq!(verbs[0].value, "redo");
    }

    #[test]
    fn test_completer_cursor_inside_multibyte_char() {
        let shared = ContactStore::new().into_shared();
        let mut completer = ContactCompleter::new(shared);

        let line = "search zoë";
        // One byte short of the end lands inside 'ë'
        let suggestions = completer.complete(line, line.len() - 1);
        assert!(suggestions.is_empty());
    }
}
