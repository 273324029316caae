//! Ratatui-based terminal UI.
//!
//! The TUI mirrors the billing workflow in three screens: an input form for
//! the target amount and rate range, the ranked options list, and the
//! receipt breakdown for a selected option. The search runs on a worker
//! thread so the "Calculating…" state renders before results apply; a new
//! request supersedes a pending one simply by dropping its receiver.

use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{self, RunOutput};
use crate::cli::TuiArgs;
use crate::domain::{Candidate, SearchRequest};
use crate::error::AppError;
use crate::report::{PERFECT_MATCH_EPS, format_receipt};

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(&args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Form,
    Options,
    Receipt,
}

struct App {
    screen: Screen,
    /// Form fields: target amount, minimum rate, maximum rate.
    inputs: [String; 3],
    selected_field: usize,
    target: f64,
    options: Vec<Candidate>,
    selected_option: usize,
    calculating: bool,
    worker: Option<Receiver<RunOutput>>,
    status: String,
}

impl App {
    fn new(args: &TuiArgs) -> Self {
        let prefill = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        Self {
            screen: Screen::Form,
            inputs: [
                prefill(args.amount),
                prefill(args.min_rate),
                prefill(args.max_rate),
            ],
            selected_field: 0,
            target: 0.0,
            options: Vec::new(),
            selected_option: 0,
            calculating: false,
            worker: None,
            status: "Enter the target amount and rate range.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.poll_worker() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply a finished search if the worker delivered one. Returns true when
    /// the UI needs a redraw.
    fn poll_worker(&mut self) -> bool {
        let Some(rx) = &self.worker else {
            return false;
        };
        match rx.try_recv() {
            Ok(run) => {
                self.worker = None;
                self.calculating = false;
                self.apply_run(run);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.worker = None;
                self.calculating = false;
                self.status = "Search worker exited unexpectedly.".to_string();
                true
            }
        }
    }

    fn apply_run(&mut self, run: RunOutput) {
        self.target = run.request.target;
        if run.candidates.is_empty() {
            self.options.clear();
            self.status =
                "No qualifying combinations found for this target and rate range.".to_string();
            return;
        }
        self.status = format!("Found {} option(s).", run.candidates.len());
        self.options = run.candidates;
        self.selected_option = 0;
        self.screen = Screen::Options;
    }

    /// Handle one key press; returns true to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.screen {
            Screen::Form => self.handle_form_key(code),
            Screen::Options => self.handle_options_key(code),
            Screen::Receipt => self.handle_receipt_key(code),
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 2 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Tab => {
                self.selected_field = (self.selected_field + 1) % 3;
            }
            KeyCode::Backspace => {
                self.inputs[self.selected_field].pop();
            }
            KeyCode::Enter => self.start_search(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.inputs[self.selected_field].push(c);
            }
            _ => {}
        }
        false
    }

    fn handle_options_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_option > 0 {
                    self.selected_option -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_option + 1 < self.options.len() {
                    self.selected_option += 1;
                }
            }
            KeyCode::Enter => {
                self.screen = Screen::Receipt;
            }
            KeyCode::Esc | KeyCode::Char('b') => {
                self.screen = Screen::Form;
                self.status = "Adjust the inputs and press Enter to recalculate.".to_string();
            }
            KeyCode::Char('n') => self.reset(),
            _ => {}
        }
        false
    }

    fn handle_receipt_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('b') => {
                self.screen = Screen::Options;
            }
            KeyCode::Char('n') => self.reset(),
            _ => {}
        }
        false
    }

    /// Validate the form and kick off a search on a worker thread.
    ///
    /// The handler returns before the search runs, so the next frame renders
    /// the calculating state first; results arrive via `poll_worker`.
    fn start_search(&mut self) {
        if self.calculating {
            return;
        }
        let request = match self.parse_inputs() {
            Ok(request) => request,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        self.worker = Some(rx);
        self.calculating = true;
        self.status = "Calculating…".to_string();
        thread::spawn(move || {
            let _ = tx.send(pipeline::run_search(&request));
        });
    }

    fn parse_inputs(&self) -> Result<SearchRequest, AppError> {
        let parse = |label: &str, raw: &str| -> Result<f64, AppError> {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AppError::new(2, format!("{label} is required.")));
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| AppError::new(2, format!("{label} is not a number: '{trimmed}'.")))
        };

        let target = parse("Target amount", &self.inputs[0])?;
        let min_rate = parse("Minimum rate", &self.inputs[1])?;
        let max_rate = parse("Maximum rate", &self.inputs[2])?;
        SearchRequest::new(target, min_rate, max_rate)
    }

    fn reset(&mut self) {
        self.inputs = [String::new(), String::new(), String::new()];
        self.selected_field = 0;
        self.target = 0.0;
        self.options.clear();
        self.selected_option = 0;
        self.calculating = false;
        self.worker = None;
        self.status = "Enter the target amount and rate range.".to_string();
        self.screen = Screen::Form;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.screen {
            Screen::Form => self.draw_form(frame, chunks[1]),
            Screen::Options => self.draw_options(frame, chunks[1]),
            Screen::Receipt => self.draw_receipt(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(vec![
            Span::styled("gst", Style::default().fg(Color::Yellow)),
            Span::raw(" — reverse gold billing search"),
        ])];

        if self.target > 0.0 {
            lines.push(Line::from(Span::styled(
                format!(
                    "target: ₹{:.2} | options: {}",
                    self.target,
                    self.options.len()
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let labels = [
            "Target amount (₹)",
            "Minimum rate (₹/gm)",
            "Maximum rate (₹/gm)",
        ];
        let items: Vec<ListItem> = labels
            .iter()
            .zip(self.inputs.iter())
            .map(|(label, value)| ListItem::new(format!("{label}: {value}")))
            .collect();

        let title = if self.calculating {
            "Enter details (calculating…)"
        } else {
            "Enter details"
        };
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_options(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let marker = if c.accuracy < PERFECT_MATCH_EPS {
                    "  perfect"
                } else {
                    ""
                };
                ListItem::new(format!(
                    "#{:<2} {:>8.3} gm × ₹{:>8.1}  value ₹{:>10.2}  GST ₹{:>7.2}  total ₹{:>10.2}{marker}",
                    idx + 1,
                    c.weight,
                    c.rate,
                    c.value,
                    c.total_gst,
                    c.final_total,
                ))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Best matches (target ₹{:.2})", self.target))
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_option));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_receipt(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Receipt").borders(Borders::ALL);

        let Some(candidate) = self.options.get(self.selected_option) else {
            let p = Paragraph::new("No option selected.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(p, area);
            return;
        };

        let text = format_receipt(candidate, self.target, self.selected_option + 1);
        let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.screen {
            Screen::Form => "↑/↓ select  type digits  Enter calculate  Esc/q quit",
            Screen::Options => "↑/↓ select  Enter receipt  b back  n new  q quit",
            Screen::Receipt => "b back  n new  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
