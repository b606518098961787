use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tildeterm::app::{Focus, TerminalApp};
use tildeterm::config::Config;
use tildeterm::runtime::TerminalEvent;

fn new_app() -> (TerminalApp, Instant) {
    let now = Instant::now();
    (TerminalApp::new(&Config::default(), now), now)
}

fn press(app: &mut TerminalApp, code: KeyCode, now: Instant) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
}

fn type_line(app: &mut TerminalApp, text: &str, now: Instant) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch), now);
    }
}

fn submit(app: &mut TerminalApp, text: &str, now: Instant) {
    type_line(app, text, now);
    press(app, KeyCode::Enter, now);
}

#[test]
fn empty_or_blank_submit_changes_nothing() {
    let (mut app, now) = new_app();
    let before = app.scrollback().len();

    press(&mut app, KeyCode::Enter, now);
    submit(&mut app, "    ", now);

    assert_eq!(app.scrollback().len(), before);
    assert!(app.history().is_empty());
    assert_eq!(app.input(), "");
}

#[test]
fn unknown_command_echoes_then_reports() {
    let (mut app, now) = new_app();
    let before = app.scrollback().len();

    submit(&mut app, "foobar", now);

    let entries = app.scrollback();
    assert_eq!(entries.len(), before + 2);
    assert_eq!(entries[before].text, "~ foobar");
    assert!(entries[before].is_command);
    assert_eq!(entries[before + 1].text, "Command not found");
    assert!(!entries[before + 1].is_command);
    assert_eq!(app.history().entries(), &["foobar".to_string()]);
}

#[test]
fn help_prints_registry_help_text() {
    let (mut app, now) = new_app();
    let before = app.scrollback().len();

    submit(&mut app, "help", now);

    let entries = app.scrollback();
    assert_eq!(entries.len(), before + 2);
    assert_eq!(entries[before].text, "~ help");
    assert_eq!(entries[before + 1].text, "Commands: help, about, socials, clear");
    assert_eq!(app.input(), "");
    assert_eq!(app.cursor(), 0);
}

#[test]
fn clear_leaves_no_entries_at_all() {
    let (mut app, now) = new_app();
    submit(&mut app, "about", now);
    submit(&mut app, "socials", now);
    submit(&mut app, "nope", now);

    submit(&mut app, "clear", now);

    assert!(app.scrollback().is_empty());
    assert_eq!(app.history().len(), 4);
}

#[test]
fn history_recall_clamps_and_restores_draft() {
    let (mut app, now) = new_app();
    for line in ["a", "b", "c"] {
        submit(&mut app, line, now);
    }
    type_line(&mut app, "dr", now);

    press(&mut app, KeyCode::Up, now);
    assert_eq!(app.input(), "c");
    press(&mut app, KeyCode::Up, now);
    assert_eq!(app.input(), "b");
    press(&mut app, KeyCode::Up, now);
    assert_eq!(app.input(), "a");
    press(&mut app, KeyCode::Up, now);
    assert_eq!(app.input(), "a");
    assert_eq!(app.cursor(), 1);

    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.input(), "b");
    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.input(), "c");
    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.input(), "dr");
    assert_eq!(app.cursor(), 2);
    assert!(!app.history().is_navigating());
}

#[test]
fn history_keys_are_noops_without_history() {
    let (mut app, now) = new_app();
    type_line(&mut app, "x", now);
    press(&mut app, KeyCode::Up, now);
    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.input(), "x");
}

#[test]
fn tab_completion_cycles_builtin_names() {
    let (mut app, now) = new_app();

    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.input(), "");
    assert!(!app.completion().is_active());

    type_line(&mut app, "s", now);
    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.input(), "socials");
    assert_eq!(app.cursor(), 7);

    press(&mut app, KeyCode::Enter, now);
    type_line(&mut app, "c", now);
    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.input(), "clear");
    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.input(), "clear");
    assert_eq!(app.completion().last_partial(), "c");
}

#[test]
fn tab_without_match_is_noop() {
    let (mut app, now) = new_app();
    type_line(&mut app, "zz", now);
    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.input(), "zz");
    assert_eq!(app.cursor(), 2);
}

#[test]
fn suggestion_only_when_caret_at_end_of_first_word() {
    let (mut app, now) = new_app();
    type_line(&mut app, "ab", now);
    assert_eq!(app.suggestion(), "out");

    press(&mut app, KeyCode::Left, now);
    assert_eq!(app.suggestion(), "");

    press(&mut app, KeyCode::End, now);
    assert_eq!(app.suggestion(), "out");

    type_line(&mut app, " x", now);
    assert_eq!(app.suggestion(), "");
}

#[test]
fn blur_stops_blinking_until_refocus() {
    let (mut app, now) = new_app();
    let interval = app.blink().interval();
    assert!(app.caret_visible());

    app.handle_event(TerminalEvent::FocusLost, now);
    assert_eq!(app.focus(), Focus::Detached);
    assert!(!app.caret_visible());
    for step in 1..6 {
        app.tick(now + interval * step);
        assert!(!app.caret_visible());
    }

    let refocused = now + Duration::from_secs(10);
    app.handle_event(TerminalEvent::FocusGained, refocused);
    assert!(app.caret_visible());
    app.tick(refocused + interval);
    assert!(!app.caret_visible());
}
