//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::snapshot::MockTerminal;
use crate::ui::panes::{
    render_frames_pane, render_register_pane, render_source_pane, render_status_bar,
    render_terminal_pane, FramesRenderData, FramesScrollState, RegisterRenderData,
    RegisterScrollState, SourceRenderData, SourceScrollState, StatusRenderData,
    TerminalRenderData, TerminalScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Registers,
    Frames,
    Terminal,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> terminal -> registers -> frames)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Registers,
            FocusedPane::Registers => FocusedPane::Frames,
            FocusedPane::Frames => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Frames,
            FocusedPane::Terminal => FocusedPane::Source,
            FocusedPane::Registers => FocusedPane::Terminal,
            FocusedPane::Frames => FocusedPane::Registers,
        }
    }
}

/// The fatal error that ended the recorded run
#[derive(Debug, Clone)]
pub struct ErrorState {
    pub message: String,
    /// Where the failing operator stopped reading
    pub position: usize,
}

/// The main application state
pub struct App {
    /// The interpreter whose history is being browsed
    pub interpreter: Interpreter,

    /// Shared sink the program wrote to while it ran
    pub terminal: MockTerminal,

    pub error: Option<ErrorState>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub register_scroll: RegisterScrollState,
    pub frames_scroll: FramesScrollState,
    pub terminal_scroll: TerminalScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create an app over a finished run and rewind it to the first step
    pub fn new(mut interpreter: Interpreter, terminal: MockTerminal) -> Self {
        let error = interpreter.last_error().map(|e| ErrorState {
            message: e.to_string(),
            position: e.position().unwrap_or(interpreter.position()),
        });

        let status_message = match interpreter.rewind_to_start() {
            Ok(()) => String::from("Ready!"),
            Err(e) => format!("Cannot rewind: {}", e),
        };

        let now = Instant::now();
        App {
            interpreter,
            terminal,
            error,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState {
                offset: 0,
                target_line_row: None, // Will be set to center on first render
            },
            register_scroll: RegisterScrollState {
                offset: 0,
                prev_item_count: 0,
            },
            frames_scroll: FramesScrollState { offset: 0 },
            terminal_scroll: TerminalScrollState { offset: 0 },
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Whether the step being shown is the last one before the fatal error
    fn is_at_error(&self) -> bool {
        self.error.is_some()
            && self.interpreter.history_position() + 1 >= self.interpreter.total_snapshots()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.interpreter.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.terminal_scroll.offset = usize::MAX;
                } else {
                    // No more steps available
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let at_error = self.is_at_error();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Source (top) | Terminal (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Registers (top) | Frames (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let error_position = self
            .error
            .as_ref()
            .filter(|_| at_error)
            .map(|error| error.position);

        render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source: self.interpreter.source(),
                position: self.interpreter.position(),
                error_position,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        // The error report follows the program's own output
        let output_len = if at_error {
            self.terminal.len()
        } else {
            self.interpreter.output_len()
        };
        render_terminal_pane(
            frame,
            left_rows[1],
            TerminalRenderData {
                terminal: &self.terminal,
                output_len,
            },
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        render_register_pane(
            frame,
            right_rows[0],
            RegisterRenderData {
                register: self.interpreter.register(),
                slots: self.interpreter.slots(),
            },
            self.focused_pane == FocusedPane::Registers,
            &mut self.register_scroll,
        );

        let functions = self.interpreter.functions();
        render_frames_pane(
            frame,
            right_rows[1],
            FramesRenderData {
                source: self.interpreter.source(),
                loops: self.interpreter.loops(),
                calls: self.interpreter.calls(),
                functions: &functions,
            },
            self.focused_pane == FocusedPane::Frames,
            &mut self.frames_scroll,
        );

        let message = match (&self.error, at_error) {
            (Some(error), true) if !self.is_playing => error.message.as_str(),
            _ => self.status_message.as_str(),
        };
        render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message,
                current_step: self.interpreter.history_position(),
                total_steps: self.interpreter.total_snapshots(),
                is_error: at_error,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.terminal_scroll.offset = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Registers => {
                    self.register_scroll.offset = self.register_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Frames => {
                    self.frames_scroll.offset = self.frames_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll.offset = self.terminal_scroll.offset.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Registers => {
                    self.register_scroll.offset = self.register_scroll.offset.saturating_add(1);
                }
                FocusedPane::Frames => {
                    self.frames_scroll.offset = self.frames_scroll.offset.saturating_add(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll.offset = self.terminal_scroll.offset.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        let now = Instant::now();
                        self.last_play_time =
                            now.checked_sub(Duration::from_secs(1)).unwrap_or(now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of execution
                self.is_playing = false;
                self.status_message = match self.interpreter.fast_forward_to_end() {
                    Ok(()) => "Jumped to end".to_string(),
                    Err(e) => e.to_string(),
                };
                self.terminal_scroll.offset = usize::MAX;
            }
            KeyCode::Backspace => {
                // Jump to start of execution
                self.is_playing = false;
                self.status_message = match self.interpreter.rewind_to_start() {
                    Ok(()) => "Jumped to start".to_string(),
                    Err(e) => e.to_string(),
                };
                self.terminal_scroll.offset = usize::MAX;
            }
            _ => {}
        }
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.interpreter.step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
                // Auto-scroll terminal to bottom
                self.terminal_scroll.offset = usize::MAX;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.interpreter.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                // Auto-scroll terminal to bottom
                self.terminal_scroll.offset = usize::MAX;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::config::{RunConfig, Streams};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use std::io::Cursor;

    fn app_for(source: &str) -> App {
        let terminal = MockTerminal::new();
        let streams = Streams {
            input: Box::new(Cursor::new(Vec::new())),
            output: Box::new(terminal.clone()),
            error: Box::new(terminal.clone()),
        };
        let mut interpreter =
            Interpreter::with_streams(source, streams, RunConfig::debugger(1024 * 1024));
        let _ = interpreter.run();
        App::new(interpreter, terminal)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_app_starts_rewound() {
        let app = app_for("v1!v2!");
        assert_eq!(app.interpreter.history_position(), 0);
        assert_eq!(app.interpreter.output_len(), 0);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_keys_navigate_history() {
        let mut app = app_for("v1!v2!");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.interpreter.history_position(), 2);
        assert_eq!(app.terminal.get_output(app.interpreter.output_len()), vec!["1.0"]);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.interpreter.history_position(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.interpreter.history_position(), 4);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.status_message, "Stepped forward 0 step(s)");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.interpreter.history_position(), 0);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Terminal);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_error_is_shown_at_last_step() {
        let mut app = app_for("v1!#");
        let error = app.error.clone().unwrap();
        assert_eq!(error.message, "Got unexpected `#` at 3.");
        assert_eq!(error.position, 3);
        assert!(!app.is_at_error());

        press(&mut app, KeyCode::Enter);
        assert!(app.is_at_error());
    }

    #[test]
    fn test_render_does_not_panic() {
        let mut app = app_for("v0i>0{<0<=2{<0!+1i>0}\n(v'x:!)~v'a b:| ");
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        for _ in 0..app.interpreter.total_snapshots() {
            terminal.draw(|f| app.render(f)).unwrap();
            press(&mut app, KeyCode::Right);
        }
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
