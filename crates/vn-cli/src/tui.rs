use vn_core::VnError;
use vn_runtime::VnEngine;

use crate::SessionContext;

#[cfg(coverage)]
pub(super) fn run_tui_ratatui_mode(
    context: &SessionContext<'_>,
    engine: VnEngine,
) -> Result<i32, VnError> {
    let mut engine = engine;
    super::run_tui_line_mode(context, &mut engine)
}

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::time::{Duration, Instant};

    use crossterm::event::{self, Event, KeyEventKind};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use ratatui::backend::CrosstermBackend;
    use ratatui::Terminal;
    use vn_core::VnError;
    use vn_runtime::{Player, VnEngine, TYPING_SPEED_MS};

    use crate::tui_actions::handle_key;
    use crate::tui_render::render_tui;
    use crate::tui_state::TuiUiState;
    use crate::{map_tui_io, SessionContext};

    struct TuiTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
    }

    impl TuiTerminal {
        fn new() -> Result<Self, VnError> {
            enable_raw_mode().map_err(map_tui_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_tui_io)?;
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_tui_io)?;
            Ok(Self { terminal })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for TuiTerminal {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(super) fn run_tui_ratatui_mode(
        context: &SessionContext<'_>,
        engine: VnEngine,
    ) -> Result<i32, VnError> {
        let mut terminal = TuiTerminal::new()?;
        let mut player = Player::new(engine);
        let mut ui = TuiUiState {
            status: "ready".to_string(),
            ..TuiUiState::default()
        };
        let first = player.start();
        ui.note_action(&first);

        let tick = Duration::from_millis(TYPING_SPEED_MS);
        let mut last_tick = Instant::now();

        loop {
            terminal
                .terminal_mut()
                .draw(|frame| render_tui(frame, &mut ui, &player, context))
                .map_err(map_tui_io)?;

            if last_tick.elapsed() >= tick {
                player.tick();
                last_tick = Instant::now();
            }

            let timeout = tick.saturating_sub(last_tick.elapsed());
            if !event::poll(timeout).map_err(map_tui_io)? {
                continue;
            }

            if let Event::Key(key) = event::read().map_err(map_tui_io)? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let should_quit = match handle_key(key, context, &mut player, &mut ui) {
                    Ok(should_quit) => should_quit,
                    Err(error) => {
                        tracing::warn!(code = %error.code, "tui action failed");
                        ui.status = error.message;
                        false
                    }
                };
                if should_quit {
                    break;
                }
            }
        }

        Ok(0)
    }
}

#[cfg(not(coverage))]
pub(super) fn run_tui_ratatui_mode(
    context: &SessionContext<'_>,
    engine: VnEngine,
) -> Result<i32, VnError> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        let mut engine = engine;
        return super::run_tui_line_mode(context, &mut engine);
    }
    rich::run_tui_ratatui_mode(context, engine)
}
