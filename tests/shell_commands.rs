use contact_book::config::DisplayConfig;
use contact_book::shell::{execute, ShellCommand, ShellOutput};
use contact_book::{ContactRecord, ContactStore};

fn run(store: &mut ContactStore, line: &str) -> ShellOutput {
    execute(store, ShellCommand::parse(line))
}

#[test]
fn test_add_list_undo_redo_session() {
    let mut store = ContactStore::new();

    assert_eq!(
        run(&mut store, "add Carol Ann carol@example.com"),
        ShellOutput::Message("Added Carol Ann <carol@example.com>".to_string())
    );
    assert_eq!(
        run(&mut store, "search carol ann"),
        ShellOutput::Found(ContactRecord::new("Carol Ann", "carol@example.com"))
    );

    match run(&mut store, "undo") {
        ShellOutput::Contacts(records) => assert_eq!(records.len(), 2),
        other => panic!("unexpected output {:?}", other),
    }
    match run(&mut store, "redo") {
        ShellOutput::Contacts(records) => assert_eq!(records.len(), 3),
        other => panic!("unexpected output {:?}", other),
    }
    assert_eq!(
        run(&mut store, "redo"),
        ShellOutput::Message("Nothing to redo".to_string())
    );
}

#[test]
fn test_delete_reports_unknown_names() {
    let mut store = ContactStore::new();

    assert_eq!(
        run(&mut store, "delete Bob"),
        ShellOutput::Message("Deleted Bob".to_string())
    );
    assert_eq!(
        run(&mut store, "delete Bob"),
        ShellOutput::Message("No contact named 'Bob'".to_string())
    );
    assert_eq!(
        run(&mut store, "history"),
        ShellOutput::History {
            undo_depth: 1,
            redo_depth: 0
        }
    );
}

#[test]
fn test_invalid_input_is_reported_not_applied() {
    let mut store = ContactStore::new();

    assert!(matches!(run(&mut store, "frobnicate"), ShellOutput::Error(_)));
    assert!(matches!(run(&mut store, "delete"), ShellOutput::Error(_)));
    assert!(matches!(run(&mut store, "add"), ShellOutput::Error(_)));
    assert_eq!(store.len(), 2);
    assert!(!store.can_undo());
}

#[test]
fn test_render_not_found_with_suggestion() {
    let mut store = ContactStore::new();
    let output = run(&mut store, "search bb");
    let text = output.render(&DisplayConfig::default()).unwrap();

    assert_eq!(text, "No contact named 'bb'. Did you mean: Bob?");
}

#[test]
fn test_render_list_as_table() {
    let mut store = ContactStore::new();
    let display = DisplayConfig {
        use_colors: false,
        show_index_column: false,
    };

    let text = run(&mut store, "list").render(&display).unwrap();
    assert!(text.contains("alice@example.com"));
    assert!(text.contains("bob@example.com"));
    assert!(text.ends_with("2 contacts"));
}

#[test]
fn test_screen_control_outputs_have_no_text() {
    let mut store = ContactStore::new();
    let display = DisplayConfig::default();

    assert!(run(&mut store, "clear").render(&display).is_none());
    assert!(run(&mut store, "logs 3").render(&display).is_none());
    assert!(run(&mut store, "   ").render(&display).is_none());
    assert_eq!(run(&mut store, "quit"), ShellOutput::Quit);
}
