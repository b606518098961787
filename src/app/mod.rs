use crate::commands::{CommandEffect, CommandRegistry, COMMAND_NOT_FOUND};
use crate::config::Config;
use crate::runtime::event::TerminalEvent;
use crate::state::{
    CaretBlink, InvocationHistory, ScrollAction, ScrollState, Scrollback, ScrollbackEntry,
    TabCompletion,
};
use crate::ui::editor::{FirstToken, LineEditor};
use crate::ui::layout::{split_terminal_layout, HitTarget, TerminalLayout};
use crate::util::flatten_to_single_line;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::time::Instant;
use tracing::{debug, info};

const PAGE_SCROLL_ROWS: usize = 10;

/// Which part of the widget holds keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// The prompt line; keys edit the buffer.
    Input,
    /// The display around the prompt. Only Space does anything here.
    Surface,
    /// The host terminal window lost focus.
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorAction {
    None,
    Changed,
    Moved,
    Submit,
    Complete,
    HistoryUp,
    HistoryDown,
    Scroll(ScrollAction),
    Blur,
    Quit,
}

/// What a submitted line did to the scrollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Empty,
    Ran { name: String, effect: CommandEffect },
    NotFound { name: String },
}

pub struct TerminalApp {
    prompt: String,
    registry: CommandRegistry,
    editor: LineEditor,
    scrollback: Scrollback,
    history: InvocationHistory,
    completion: TabCompletion,
    blink: CaretBlink,
    scroll: ScrollState,
    focus: Focus,
    layout: Option<TerminalLayout>,
    seen_revision: u64,
    reload_hovered: bool,
    should_quit: bool,
}

impl TerminalApp {
    pub fn new(config: &Config, now: Instant) -> Self {
        Self::with_registry(config, CommandRegistry::builtin(config), now)
    }

    pub fn with_registry(config: &Config, registry: CommandRegistry, now: Instant) -> Self {
        let scrollback = Scrollback::new(config.welcome.clone());
        let seen_revision = scrollback.revision();
        let mut blink = CaretBlink::new(config.blink_interval(), now);
        blink.start(now);
        Self {
            prompt: config.prompt.clone(),
            registry,
            editor: LineEditor::new(),
            scrollback,
            history: InvocationHistory::new(),
            completion: TabCompletion::new(),
            blink,
            scroll: ScrollState::new(config.smooth_scroll),
            focus: Focus::Input,
            layout: None,
            seen_revision,
            reload_hovered: false,
            should_quit: false,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn input(&self) -> &str {
        self.editor.buffer()
    }

    pub fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    pub fn suggestion(&self) -> &str {
        self.editor.suggestion()
    }

    pub fn scrollback(&self) -> &[ScrollbackEntry] {
        self.scrollback.entries()
    }

    pub fn history(&self) -> &InvocationHistory {
        &self.history
    }

    pub fn completion(&self) -> &TabCompletion {
        &self.completion
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn caret_visible(&self) -> bool {
        self.blink.is_visible()
    }

    pub fn blink(&self) -> &CaretBlink {
        &self.blink
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn layout(&self) -> Option<TerminalLayout> {
        self.layout
    }

    pub fn reload_hovered(&self) -> bool {
        self.reload_hovered
    }

    pub fn quit_requested(&self) -> bool {
        self.should_quit
    }

    /// Applies one frontend event. Returns true when a redraw is needed.
    pub fn handle_event(&mut self, event: TerminalEvent, now: Instant) -> bool {
        match event {
            TerminalEvent::Key(key) => self.handle_key(key, now),
            TerminalEvent::Paste(text) => self.paste(&text),
            TerminalEvent::Click { column, row } => self.click(column, row, now),
            TerminalEvent::Hover { column, row } => self.hover(column, row),
            TerminalEvent::Scroll(action) => {
                self.scroll.apply(action);
                true
            }
            TerminalEvent::FocusGained => {
                self.focus_input(now);
                true
            }
            TerminalEvent::FocusLost => {
                self.blur(Focus::Detached);
                true
            }
            TerminalEvent::Resize { width, height } => {
                self.update_geometry(Rect::new(0, 0, width, height));
                true
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if self.focus != Focus::Input {
            return self.handle_surface_key(key, now);
        }

        let action = self.apply_key(key);
        if action != EditorAction::Complete {
            self.completion.reset();
        }

        match action {
            EditorAction::None => false,
            EditorAction::Changed => {
                self.history.stop_navigating();
                self.editor.sync_caret(&self.registry);
                true
            }
            EditorAction::Moved => {
                self.editor.sync_caret(&self.registry);
                true
            }
            EditorAction::Submit => {
                self.submit(now);
                true
            }
            EditorAction::Complete => self.complete(),
            EditorAction::HistoryUp => self.history_up(),
            EditorAction::HistoryDown => self.history_down(),
            EditorAction::Scroll(action) => {
                self.scroll.apply(action);
                true
            }
            EditorAction::Blur => {
                self.blur(Focus::Surface);
                true
            }
            EditorAction::Quit => {
                self.should_quit = true;
                true
            }
        }
    }

    fn apply_key(&mut self, key: KeyEvent) -> EditorAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => EditorAction::Quit,
            KeyCode::Char('d') if ctrl => {
                if self.editor.is_empty() {
                    EditorAction::Quit
                } else {
                    EditorAction::None
                }
            }
            KeyCode::Char('u') if ctrl => changed(self.editor.kill_to_start()),
            KeyCode::Char('k') if ctrl => changed(self.editor.kill_to_end()),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                EditorAction::None
            }
            KeyCode::Char(ch) => changed(self.editor.insert_char(ch)),
            KeyCode::Tab | KeyCode::BackTab => EditorAction::Complete,
            KeyCode::Enter => EditorAction::Submit,
            KeyCode::Up => EditorAction::HistoryUp,
            KeyCode::Down => EditorAction::HistoryDown,
            KeyCode::Backspace => changed(self.editor.backspace()),
            KeyCode::Delete => changed(self.editor.delete()),
            KeyCode::Left => {
                self.editor.move_left();
                EditorAction::Moved
            }
            KeyCode::Right => {
                self.editor.move_right();
                EditorAction::Moved
            }
            KeyCode::Home if ctrl => EditorAction::Scroll(ScrollAction::Home),
            KeyCode::End if ctrl => EditorAction::Scroll(ScrollAction::End),
            KeyCode::Home => {
                self.editor.move_home();
                EditorAction::Moved
            }
            KeyCode::End => {
                self.editor.move_end();
                EditorAction::Moved
            }
            KeyCode::PageUp => EditorAction::Scroll(ScrollAction::PageUp(PAGE_SCROLL_ROWS)),
            KeyCode::PageDown => EditorAction::Scroll(ScrollAction::PageDown(PAGE_SCROLL_ROWS)),
            KeyCode::Esc => EditorAction::Blur,
            _ => EditorAction::None,
        }
    }

    /// Keys reaching the display surface instead of the prompt. Space types a
    /// literal space at the remembered caret and hands focus back.
    fn handle_surface_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                true
            }
            KeyCode::Char(' ') if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.completion.reset();
                self.editor.insert_char(' ');
                self.history.stop_navigating();
                self.editor.sync_caret(&self.registry);
                self.focus_input(now);
                true
            }
            _ => false,
        }
    }

    fn submit(&mut self, now: Instant) {
        let line = self.editor.buffer().trim().to_string();
        let outcome = self.dispatch(&line);
        self.reset_line();
        self.focus_input(now);
        debug!(?outcome, "submitted line");
    }

    /// Runs one trimmed line against the registry and records it.
    pub fn dispatch(&mut self, line: &str) -> Dispatch {
        let line = line.trim();
        if line.is_empty() {
            return Dispatch::Empty;
        }

        let name = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        self.history.push(line);

        let mut appended = vec![ScrollbackEntry::command(&self.prompt, line)];
        let outcome = match self.registry.get(&name) {
            Some(command) => {
                let output = match command.effect {
                    CommandEffect::ListCommands => Some(self.registry.help_text()),
                    _ => command.invoke(),
                };
                if let Some(output) = output {
                    appended.push(ScrollbackEntry::output(output));
                }
                Dispatch::Ran {
                    name,
                    effect: command.effect,
                }
            }
            None => {
                appended.push(ScrollbackEntry::output(COMMAND_NOT_FOUND));
                Dispatch::NotFound { name }
            }
        };

        match &outcome {
            Dispatch::Ran {
                effect: CommandEffect::ClearScrollback,
                ..
            } => self.scrollback.clear(),
            _ => self.scrollback.extend(appended),
        }
        outcome
    }

    fn reset_line(&mut self) {
        self.editor.clear();
        self.completion.reset();
        self.history.stop_navigating();
    }

    /// Completes the first word from the registry, cycling on repeated Tab.
    fn complete(&mut self) -> bool {
        let line = self.editor.buffer().to_string();
        let token = FirstToken::scan(&line);
        let word = &line[token.start..token.end];

        let session_live = self.completion.current().is_some_and(|applied| applied == word);
        let next = if session_live {
            self.completion.advance().map(str::to_string)
        } else {
            let caret = self.editor.cursor().clamp(token.start, token.end);
            let partial = &line[token.start..caret];
            if partial.is_empty() {
                self.completion.reset();
                return false;
            }
            let matches = self.registry.matching(partial);
            self.completion.start(partial, matches).map(str::to_string)
        };
        let Some(name) = next else {
            return false;
        };

        let leading = &line[..token.start];
        let rest = &line[token.end..];
        let caret = leading.len() + name.len();
        self.editor.set(format!("{leading}{name}{rest}"), caret);
        self.history.stop_navigating();
        self.editor.sync_caret(&self.registry);
        self.editor.clear_suggestion();
        true
    }

    fn history_up(&mut self) -> bool {
        let Some(line) = self.history.up(self.editor.buffer()) else {
            return false;
        };
        self.editor.set_buffer_to_end(line);
        self.editor.sync_caret(&self.registry);
        true
    }

    fn history_down(&mut self) -> bool {
        let Some(line) = self.history.down() else {
            return false;
        };
        self.editor.set_buffer_to_end(line);
        self.editor.sync_caret(&self.registry);
        true
    }

    fn paste(&mut self, text: &str) -> bool {
        if self.focus != Focus::Input {
            return false;
        }
        self.completion.reset();
        if !self.editor.insert_str(&flatten_to_single_line(text)) {
            return false;
        }
        self.history.stop_navigating();
        self.editor.sync_caret(&self.registry);
        true
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let Some(layout) = self.layout else {
            return false;
        };
        match layout.hit_test(column, row) {
            HitTarget::Reload => {
                self.reload(now);
                true
            }
            HitTarget::Surface => {
                self.focus_input(now);
                true
            }
            HitTarget::Outside => false,
        }
    }

    fn hover(&mut self, column: u16, row: u16) -> bool {
        let hovered = self
            .layout
            .is_some_and(|layout| layout.hit_test(column, row) == HitTarget::Reload);
        let changed = hovered != self.reload_hovered;
        self.reload_hovered = hovered;
        changed
    }

    /// Restores the welcome banner. Invocation history and completion state
    /// are left alone.
    pub fn reload(&mut self, now: Instant) {
        self.scrollback.reset_to_welcome();
        self.focus_input(now);
        info!("terminal reset to welcome banner");
    }

    pub fn focus_input(&mut self, now: Instant) {
        let was_focused = self.focus == Focus::Input;
        self.focus = Focus::Input;
        if !was_focused || !self.blink.is_running() {
            self.blink.start(now);
        }
    }

    pub fn blur(&mut self, to: Focus) {
        self.focus = to;
        self.blink.stop();
    }

    /// Advances timers. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let blinked = self.blink.tick(now);
        let scrolled = self.scroll.step();
        blinked || scrolled
    }

    /// Records the frame size and re-measures the body for scrolling.
    pub fn update_geometry(&mut self, area: Rect) {
        let layout = split_terminal_layout(area);
        let width = layout.body.width as usize;
        let rows = crate::ui::render::body_rows(self, width);
        self.layout = Some(layout);
        self.scroll.set_extent(rows, layout.body.height as usize);

        let revision = self.scrollback.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.scroll.follow();
        }
    }
}

fn changed(did_change: bool) -> EditorAction {
    if did_change {
        EditorAction::Changed
    } else {
        EditorAction::None
    }
}
