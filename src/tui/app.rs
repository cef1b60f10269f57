//! Main TUI application.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::provider::MarkerProvider;
use crate::quickfix::QuickFixRegistry;
use crate::table::{MarkerTable, MarkersView};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::{AppState, ViewConfig};

/// Main TUI application.
pub struct App {
    provider: Box<dyn MarkerProvider>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App showing the provider's markers in `table`.
    pub fn new(provider: Box<dyn MarkerProvider>, table: MarkerTable, config: ViewConfig) -> Self {
        let mut quick_fixes = QuickFixRegistry::new(provider.quick_fixes().clone());
        quick_fixes.subscribe(|marker, enabled| {
            debug!(marker, enabled, "quick fix availability changed");
        });

        let mut state = AppState::new(table, quick_fixes, config);
        state.source_name = provider.name();
        state.loaded_at = provider.loaded_at();
        state.load(provider.groups().to_vec());
        state.table.dom_focus();
        state.process_table_events();

        Self {
            provider,
            state,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    if self.provider.has_changed() {
                        info!("markers source changed on disk");
                        self.reload();
                    }
                }
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Reload => self.reload(),
                    KeyAction::None => {}
                },
                Ok(Event::Mouse(mouse)) => handle_mouse(&mut self.state, mouse, Instant::now()),
                // Layout follows the frame size on the next draw.
                Ok(Event::Resize(..)) => {}
                Err(_) => {
                    self.should_quit = true;
                }
            }

            // Hover settles on the clock, whatever event woke us up.
            let state = &mut self.state;
            if state.table.tick(Instant::now(), &mut state.quick_fixes) {
                state.process_table_events();
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Reloads the source and feeds changed groups to the table.
    fn reload(&mut self) {
        match self.provider.reload() {
            Ok(changed) => {
                self.state
                    .quick_fixes
                    .set_available(self.provider.quick_fixes().clone());
                self.state.loaded_at = self.provider.loaded_at();
                let count = changed.len();
                if count > 0 {
                    self.state.update(changed);
                }
                self.state.status_message = Some(format!("Reloaded, {} files changed", count));
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.state.status_message = Some(e.to_string());
            }
        }
    }
}
