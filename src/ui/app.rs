//! Viewer application state and event loop

use crate::errors::LessonError;
use crate::lessons::Lesson;
use crate::session::Session;
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
    Steps,
    Output,
    Stack,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: steps -> output -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Steps => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Steps,
        }
    }
}

/// The viewer state
pub struct App {
    /// Finished session being replayed
    pub session: Session,

    pub lesson: Lesson,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub steps_scroll: usize,
    pub stack_scroll: usize,
    pub output_scroll: usize,

    pub should_quit: bool,

    pub status_message: String,

    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session, lesson: Lesson) -> Self {
        App {
            session,
            lesson,
            focused_pane: FocusedPane::Steps,
            steps_scroll: 0,
            stack_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the event loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.session.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.output_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
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

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Steps (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        let captions = self.session.captions();
        super::panes::render_steps_pane(
            frame,
            left_rows[0],
            &format!("Lesson: {}", self.lesson),
            &captions,
            self.session.history_position(),
            self.focused_pane == FocusedPane::Steps,
            &mut self.steps_scroll,
        );

        super::panes::render_terminal_pane(
            frame,
            left_rows[1],
            self.session.terminal(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_stack_pane(
            frame,
            columns[1],
            self.session.stack(),
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.session.history_position(),
            self.session.total_snapshots(),
            self.is_playing,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n)
                    .take_while(|_| self.session.step_forward().is_ok())
                    .count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.output_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.session.step_backward();
                self.report(result, "Stepped backward");
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.session.step_forward();
                self.report(result, "Stepped forward");
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Steps => {
                    let result = self.session.step_backward();
                    self.report(result, "Stepped backward");
                }
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_sub(1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Steps => {
                    let result = self.session.step_forward();
                    self.report(result, "Stepped forward");
                }
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_add(1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_add(1),
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                let result = self.session.jump_to_end();
                self.report(result, "Jumped to end");
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                let result = self.session.rewind_to_start();
                self.report(result, "Jumped to start");
            }
            _ => {}
        }
    }

    fn report(&mut self, result: Result<(), LessonError>, success: &str) {
        match result {
            Ok(()) => {
                self.status_message = success.to_string();
                // Follow the newest output
                self.output_scroll = usize::MAX;
            }
            Err(LessonError::History { message }) => {
                self.status_message = format!("Cannot move: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}
