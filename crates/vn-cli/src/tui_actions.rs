use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vn_core::VnError;
use vn_runtime::Player;

use crate::tui_state::{Overlay, TuiUiState};
use crate::{
    create_engine_for_script, load_engine_from_state_for_script, save_engine_state, SessionContext,
};

/// Applies one key press. Returns true when the player should quit.
pub(crate) fn handle_key(
    key: KeyEvent,
    context: &SessionContext<'_>,
    player: &mut Player,
    ui: &mut TuiUiState,
) -> Result<bool, VnError> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match ui.overlay {
        Overlay::Chapters => return handle_chapter_menu_key(key, player, ui),
        Overlay::Log => {
            handle_log_key(key, player, ui);
            return Ok(false);
        }
        Overlay::None => {}
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let action = player.next();
            ui.note_action(&action);
        }
        KeyCode::Backspace | KeyCode::Char('b') => {
            let action = player.back();
            ui.note_action(&action);
        }
        KeyCode::Char('c') => ui.open_chapters(player.engine().chapters().len()),
        KeyCode::Char('g') => ui.open_log(),
        KeyCode::Char('h') => ui.help_visible = !ui.help_visible,
        KeyCode::Char('s') => {
            save_engine_state(
                Path::new(context.state_file),
                player.engine(),
                &context.script.id,
                &context.settings,
            )?;
            ui.status = format!("saved to {}", context.state_file);
        }
        KeyCode::Char('l') => {
            let (_state, resumed) =
                load_engine_from_state_for_script(Path::new(context.state_file), context.script)?;
            player.replace_engine(resumed);
            ui.reset_view();
            ui.status = format!("loaded from {}", context.state_file);
        }
        KeyCode::Char('r') => {
            let restarted = create_engine_for_script(context.script, &context.settings)?;
            player.replace_engine(restarted);
            let action = player.start();
            ui.reset_view();
            ui.note_action(&action);
            ui.status = "restarted".to_string();
        }
        _ => {}
    }

    Ok(false)
}

fn handle_chapter_menu_key(
    key: KeyEvent,
    player: &mut Player,
    ui: &mut TuiUiState,
) -> Result<bool, VnError> {
    let chapters = player.engine().chapters().to_vec();
    match key.code {
        KeyCode::Up => ui.move_up(chapters.len()),
        KeyCode::Down => ui.move_down(chapters.len()),
        KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => ui.close_overlay(),
        KeyCode::Enter => {
            let entry = chapters.get(ui.chapter_cursor).ok_or_else(|| {
                VnError::new("TUI_CHAPTER_PARSE", "No chapter selected")
            })?;
            let action = player.jump_to_chapter(entry.index)?;
            ui.close_overlay();
            ui.note_action(&action);
            ui.status = format!("jumped to {}", entry.title);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_log_key(key: KeyEvent, player: &Player, ui: &mut TuiUiState) {
    let log_len = player.engine().transcript().len();
    match key.code {
        KeyCode::Up => ui.move_up(log_len),
        KeyCode::Down => ui.move_down(log_len),
        KeyCode::Esc | KeyCode::Char('g') | KeyCode::Char('q') => ui.close_overlay(),
        _ => {}
    }
}

#[cfg(test)]
mod tui_actions_tests {
    use super::*;
    use crate::cli_test_support::*;
    use crate::{load_source_by_path, PlayerSettings};
    use vn_runtime::PlayerAction;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn started_player(script: &crate::LoadedScript) -> Player {
        let engine =
            create_engine_for_script(script, &PlayerSettings::default()).expect("engine");
        let mut player = Player::new(engine);
        assert!(matches!(player.start(), PlayerAction::Shown(_)));
        player
    }

    #[test]
    fn enter_finishes_typing_before_advancing() {
        let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
        let state_file = temp_path("tui-actions-enter.json");
        let context = SessionContext {
            state_file: state_file.to_str().expect("utf-8 path"),
            script: &script,
            settings: PlayerSettings::default(),
        };
        let mut player = started_player(&script);
        let mut ui = TuiUiState::default();

        assert!(player.is_typing());
        assert!(!handle_key(press(KeyCode::Enter), &context, &mut player, &mut ui).expect("key"));
        assert!(!player.is_typing());
        assert_eq!(player.engine().back_stack_len(), 1);

        handle_key(press(KeyCode::Char(' ')), &context, &mut player, &mut ui).expect("key");
        assert_eq!(player.engine().back_stack_len(), 2);

        handle_key(press(KeyCode::Char('b')), &context, &mut player, &mut ui).expect("key");
        assert_eq!(player.engine().back_stack_len(), 1);
        assert!(!player.is_typing());
    }

    #[test]
    fn chapter_menu_jumps_to_selected_chapter() {
        let script = load_source_by_path(&demo_script_dir()).expect("script");
        let state_file = temp_path("tui-actions-chapters.json");
        let context = SessionContext {
            state_file: state_file.to_str().expect("utf-8 path"),
            script: &script,
            settings: PlayerSettings::default(),
        };
        let mut player = started_player(&script);
        let mut ui = TuiUiState::default();
        let chapters = player.engine().chapters().to_vec();
        assert!(chapters.len() >= 2);

        handle_key(press(KeyCode::Char('c')), &context, &mut player, &mut ui).expect("open");
        assert_eq!(ui.overlay, Overlay::Chapters);
        handle_key(press(KeyCode::Down), &context, &mut player, &mut ui).expect("down");
        handle_key(press(KeyCode::Enter), &context, &mut player, &mut ui).expect("jump");

        assert_eq!(ui.overlay, Overlay::None);
        assert_eq!(
            player.current().map(|rendered| rendered.step.script_index),
            Some(chapters[1].index)
        );
        assert!(!player.engine().can_rewind());
    }

    #[test]
    fn save_load_and_restart_keys_swap_the_engine() {
        let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
        let state_file = temp_path("tui-actions-save.json");
        let context = SessionContext {
            state_file: state_file.to_str().expect("utf-8 path"),
            script: &script,
            settings: PlayerSettings::default(),
        };
        let mut player = started_player(&script);
        let mut ui = TuiUiState::default();

        player.next();
        player.next();
        let saved_index = player.engine().script_index();
        handle_key(press(KeyCode::Char('s')), &context, &mut player, &mut ui).expect("save");
        assert!(ui.status.starts_with("saved to"));

        handle_key(press(KeyCode::Char('r')), &context, &mut player, &mut ui).expect("restart");
        assert_eq!(player.engine().script_index(), 1);
        assert_eq!(ui.status, "restarted");

        handle_key(press(KeyCode::Char('l')), &context, &mut player, &mut ui).expect("load");
        assert_eq!(player.engine().script_index(), saved_index);
        assert!(!player.is_typing());
    }

    #[test]
    fn quit_keys_and_log_overlay() {
        let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
        let context = SessionContext {
            state_file: "unused.json",
            script: &script,
            settings: PlayerSettings::default(),
        };
        let mut player = started_player(&script);
        let mut ui = TuiUiState::default();

        handle_key(press(KeyCode::Char('g')), &context, &mut player, &mut ui).expect("log");
        assert_eq!(ui.overlay, Overlay::Log);
        assert!(!handle_key(press(KeyCode::Char('q')), &context, &mut player, &mut ui)
            .expect("close log"));
        assert_eq!(ui.overlay, Overlay::None);

        assert!(handle_key(press(KeyCode::Char('q')), &context, &mut player, &mut ui)
            .expect("quit"));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(ctrl_c, &context, &mut player, &mut ui).expect("ctrl-c"));
    }
}
