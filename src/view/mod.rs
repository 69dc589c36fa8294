//! Terminal display surface and event loop.
//!
//! The view owns the render side of the adapter: it draws the latest
//! published snapshot, derives viewport metrics from the terminal geometry
//! on every draw, re-runs the capacity estimator, and maps the clear gesture
//! (right-button double-click) onto the shared window. Ingestion runs on the
//! same loop at a fixed ~30 Hz tick, which satisfies the single-writer
//! contract by construction.

pub mod constants;
pub mod geometry;

use crate::model::SourceError;
use crate::sanitize::PolicyKind;
use crate::source::{ValueMode, ValueSource};
use crate::state::{IngestionScheduler, SharedDisplay};
use constants::{
    BASE_LINE_HEIGHT, CHAR_CELL_WIDTH, DOUBLE_CLICK_WINDOW, REFERENCE_DPI, STATUS_BAR_HEIGHT,
    TARGET_INTERVAL,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use geometry::{estimate_capacity, height_correction, ViewportMetrics};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

/// Errors that can occur while running the display surface.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal I/O failure.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Upstream source failure.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Runtime options for the display surface.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Sanitize policy to feed values through.
    pub policy: PolicyKind,
    /// Route every value through the immediate path instead of batching.
    pub immediate: bool,
    /// How polled lines are interpreted.
    pub mode: ValueMode,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            immediate: false,
            mode: ValueMode::default(),
        }
    }
}

/// The terminal application.
///
/// Generic over the ratatui backend so tests can drive it against
/// `TestBackend` without a real terminal.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    scheduler: IngestionScheduler,
    source: ValueSource,
    options: ViewOptions,
    /// Last rendered pane area, for mouse hit testing.
    last_pane_area: Option<Rect>,
    /// Time of the previous right-button press, for double-click detection.
    last_right_click: Option<Instant>,
    /// One-way height correction: once the pane has grown over the status
    /// bar it never shrinks back (until unload).
    pane_grown: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Load the surface: raw mode, alternate screen, mouse capture, and an
    /// empty zero-capacity window (capacity is unknown until the first
    /// geometry-driven estimate).
    pub fn load(source: ValueSource, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        info!(policy = options.policy.name(), immediate = options.immediate, "surface loaded");

        let display = Arc::new(SharedDisplay::new());
        let scheduler = IngestionScheduler::new(display, options.policy.build());

        Ok(Self {
            terminal,
            scheduler,
            source,
            options,
            last_pane_area: None,
            last_right_click: None,
            pane_grown: false,
        })
    }

    /// Run the event loop until the user quits.
    ///
    /// A fixed-cadence tick (~33 ms) drains the source into the ingestion
    /// scheduler; drawing happens whenever the redraw signal is raised.
    /// Input events are handled between ticks without disturbing the
    /// cadence.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // First draw establishes geometry so the first tick has a capacity.
        self.draw()?;

        let mut next_tick = Instant::now() + TARGET_INTERVAL;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if Self::is_quit(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(_, _) => {
                        // Capacity is re-estimated inside draw.
                        self.draw()?;
                    }
                    _ => {}
                }
                if self.scheduler.display().take_redraw() {
                    self.draw()?;
                }
                continue;
            }

            // Tick elapsed: one ingestion cycle.
            self.ingest_tick()?;
            if self.scheduler.display().take_redraw() {
                self.draw()?;
            }

            next_tick += TARGET_INTERVAL;
            let now = Instant::now();
            if next_tick < now {
                // Fell behind (slow draw); realign rather than burst.
                next_tick = now + TARGET_INTERVAL;
            }
        }
    }

    fn is_quit(key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Drain the source and route the batch through the scheduler.
    ///
    /// Batched mode hands the whole tick's worth to `batch_push`; immediate
    /// mode routes each value through `single_push` in arrival order.
    fn ingest_tick(&mut self) -> Result<(), TuiError> {
        let batch = self.source.poll(self.options.mode)?;
        if batch.is_empty() {
            return Ok(());
        }
        debug!(count = batch.len(), "ingestion tick");

        if self.options.immediate {
            for value in &batch {
                self.scheduler.single_push(value);
            }
        } else {
            self.scheduler.batch_push(&batch);
        }
        Ok(())
    }

    /// Map mouse input onto the clear gesture: a right-button
    /// double-activation inside the pane clears the window and publishes an
    /// empty snapshot.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Right) {
            return;
        }
        let inside = self
            .last_pane_area
            .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
        if !inside {
            self.last_right_click = None;
            return;
        }

        let now = Instant::now();
        if let Some(previous) = self.last_right_click.take() {
            if now.duration_since(previous) <= DOUBLE_CLICK_WINDOW {
                self.scheduler.clear();
                return;
            }
        }
        self.last_right_click = Some(now);
    }

    /// Render the latest snapshot and re-run the capacity estimator against
    /// the current geometry.
    fn draw(&mut self) -> Result<(), TuiError> {
        let snapshot = self.scheduler.display().snapshot();
        let area = {
            let size = self.terminal.size()?;
            Rect::new(0, 0, size.width, size.height)
        };
        let (pane_area, status_area) = self.layout(area);
        self.last_pane_area = Some(pane_area);

        // Geometry feedback: derive metrics from the pane's inner area and
        // retarget the window capacity for the next ingestion cycle.
        let inner = block().inner(pane_area);
        let metrics = cell_metrics(inner);
        let capacity = estimate_capacity(&metrics);
        self.scheduler.display().resize(capacity);

        // One-way growth when the text is wider than the pane: the original
        // surface grew its host to keep the horizontal scrollbar from
        // occluding the last line; here the pane reclaims the status row.
        let text_width = measured_text_width(&snapshot);
        let pane_height_px = f32::from(pane_area.height) * metrics.scaled_line_height();
        if !self.pane_grown
            && height_correction(&metrics, text_width, pane_height_px).is_some()
        {
            debug!("horizontal overflow: growing pane over status bar");
            self.pane_grown = true;
        }

        let status = self.status_line();
        let overflow = text_width > metrics.client_width;
        self.terminal.draw(|frame| {
            let paragraph = Paragraph::new(&*snapshot).block(block().title(title(overflow)));
            frame.render_widget(paragraph, pane_area);
            if !status_area.is_empty() {
                frame.render_widget(Paragraph::new(status.clone()), status_area);
            }
        })?;
        Ok(())
    }

    /// Split the terminal area into pane and status bar. Once the pane has
    /// grown over the status bar the split is gone for good.
    fn layout(&self, area: Rect) -> (Rect, Rect) {
        if self.pane_grown || area.height <= STATUS_BAR_HEIGHT {
            return (area, Rect::default());
        }
        let pane = Rect::new(area.x, area.y, area.width, area.height - STATUS_BAR_HEIGHT);
        let status = Rect::new(
            area.x,
            area.y + pane.height,
            area.width,
            STATUS_BAR_HEIGHT,
        );
        (pane, status)
    }

    fn status_line(&self) -> Line<'static> {
        let display = self.scheduler.display();
        let live = if self.source.is_live() { "LIVE" } else { "EOF" };
        Line::from(vec![
            Span::styled(
                format!(" {} ", self.scheduler.policy_name()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!("{}/{} ", display.len(), display.capacity())),
            Span::styled(
                live,
                Style::default().fg(if self.source.is_live() {
                    Color::Green
                } else {
                    Color::DarkGray
                }),
            ),
            Span::raw("  q quit · right double-click clears"),
        ])
    }

    /// The scheduler driving this surface.
    pub fn scheduler(&self) -> &IngestionScheduler {
        &self.scheduler
    }
}

/// Unload the surface for the stdout-backed app: empty the window, zero its
/// capacity and restore the terminal. Nothing persists into a later load.
pub fn run_with_source(source: ValueSource, options: ViewOptions) -> Result<(), TuiError> {
    let mut app = TuiApp::load(source, options)?;
    let result = app.run();

    app.scheduler().display().unload();
    restore_terminal()?;
    result
}

/// Restore the terminal to its normal state.
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// The bordered block around the text pane.
fn block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

fn title(overflow: bool) -> &'static str {
    if overflow {
        " textvis → "
    } else {
        " textvis "
    }
}

/// Viewport metrics for a cell-based area, using the reference font
/// metrics: 6x13 px cells at 96 DPI.
fn cell_metrics(inner: Rect) -> ViewportMetrics {
    ViewportMetrics {
        client_width: f32::from(inner.width) * CHAR_CELL_WIDTH,
        client_height: f32::from(inner.height) * BASE_LINE_HEIGHT,
        line_height: BASE_LINE_HEIGHT,
        dpi: REFERENCE_DPI,
    }
}

/// Measured pixel width of the widest snapshot line.
fn measured_text_width(snapshot: &str) -> f32 {
    let widest = snapshot.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    widest as f32 * CHAR_CELL_WIDTH
}
