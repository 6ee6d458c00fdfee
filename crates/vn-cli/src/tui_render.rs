#![cfg(not(coverage))]

use std::str::FromStr;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use vn_core::Side;
use vn_runtime::Player;

use crate::tui_state::{Overlay, TuiUiState};
use crate::SessionContext;

const ELLIPSIS: &str = "…";
const KEY_HELP: &str =
    "keys: enter/space next | b back | c chapters | g log | s save | l load | r restart | h help | q quit";
const HELP_TEXT: &str =
    "enter while text is typing shows the whole page. back shows the previous page instantly. chapter jumps cannot be undone with back.";

pub(crate) fn render_tui(
    frame: &mut Frame<'_>,
    ui: &mut TuiUiState,
    player: &Player,
    context: &SessionContext<'_>,
) {
    let area = frame.area();
    let content_width = (area.width as usize).saturating_sub(2).max(16);
    let dialogue_rows = context.settings.rows as u16 + 2;
    let [header_area, body_area, dialogue_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(dialogue_rows),
        Constraint::Length(if ui.help_visible { 2 } else { 1 }),
    ])
    .areas(area);

    render_header(frame, header_area, ui, player, context, content_width);
    match ui.overlay {
        Overlay::None => render_scene(frame, body_area, player),
        Overlay::Log => render_log(frame, body_area, ui, player),
        Overlay::Chapters => render_chapters(frame, body_area, ui, player),
    }
    render_dialogue(frame, dialogue_area, ui, player, context);

    let mut footer = vec![Line::from(Span::styled(
        truncate_to_width(KEY_HELP, content_width),
        Style::default().fg(Color::Yellow),
    ))];
    if ui.help_visible {
        footer.push(Line::from(Span::styled(
            truncate_to_width(HELP_TEXT, content_width),
            Style::default().fg(Color::Magenta),
        )));
    }
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn render_header(
    frame: &mut Frame<'_>,
    area: Rect,
    ui: &TuiUiState,
    player: &Player,
    context: &SessionContext<'_>,
    width: usize,
) {
    let title = player
        .engine()
        .script()
        .title
        .clone()
        .unwrap_or_else(|| context.script.title.clone());
    let status = if ui.ended && ui.status.is_empty() {
        "end of script".to_string()
    } else {
        ui.status.clone()
    };
    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_to_width(&format!("state: {}", context.state_file), width),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            truncate_to_width(&format!("status: {}", status), width),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_scene(frame: &mut Frame<'_>, area: Rect, player: &Player) {
    let Some(rendered) = player.current() else {
        return;
    };
    let step = &rendered.step;
    let mut lines = Vec::new();
    for (label, value) in [("bg", &step.bg), ("scene", &step.scene), ("fx", &step.special)] {
        if let Some(value) = value {
            lines.push(Line::from(Span::styled(
                format!("[{}: {}]", label, value),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    if let Some(portrait) = player.engine().script().cast.portrait_for(step) {
        let label = format!("<{}>", portrait.sprite);
        let line = match portrait.side {
            Side::Left => Line::from(label),
            Side::Right => Line::from(label).right_aligned(),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_log(frame: &mut Frame<'_>, area: Rect, ui: &mut TuiUiState, player: &Player) {
    let transcript = player.engine().transcript();
    let visible = area.height.saturating_sub(2) as usize;
    ui.log_rows = visible;
    ui.log_scroll = ui.log_scroll.min(transcript.len().saturating_sub(visible));
    let end = transcript.len().saturating_sub(ui.log_scroll);
    let start = end.saturating_sub(visible);
    let lines = transcript[start..end]
        .iter()
        .map(|entry| {
            if entry.speaker.is_empty() {
                Line::from(entry.text.clone())
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", entry.speaker),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(entry.text.clone()),
                ])
            }
        })
        .collect::<Vec<_>>();
    let block = Block::bordered().title("log (up/down scroll, g close)");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_chapters(frame: &mut Frame<'_>, area: Rect, ui: &TuiUiState, player: &Player) {
    let lines = player
        .engine()
        .chapters()
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let selected = position == ui.chapter_cursor;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{}{}", prefix, entry.title), style))
        })
        .collect::<Vec<_>>();
    let block = Block::bordered().title("chapters (enter jump, c close)");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_dialogue(
    frame: &mut Frame<'_>,
    area: Rect,
    ui: &TuiUiState,
    player: &Player,
    context: &SessionContext<'_>,
) {
    let box_width = (context.settings.columns as u16 + 2).min(area.width);
    let area = Rect {
        width: box_width,
        ..area
    };

    let mut block = Block::bordered();
    if let Some(rendered) = player.current() {
        if let Some(name) = rendered.step.display_name() {
            let color = player
                .engine()
                .script()
                .cast
                .name_color(name)
                .and_then(|value| Color::from_str(value).ok())
                .unwrap_or(Color::Cyan);
            block = block.title(Span::styled(
                format!(" {} ", name),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        if rendered.pages_left > 0 && !player.is_typing() {
            block = block.title_bottom(Line::from(" ▼ ").right_aligned());
        }
    }
    if ui.ended && !player.is_typing() {
        block = block.title_bottom(Line::from(" [end] ").right_aligned());
    }

    // Rows are cut exactly like GridMeasure counts them so pages fit the box.
    let rows = player
        .visible_text()
        .split('\n')
        .flat_map(|segment| wrap_line_to_width(segment, context.settings.columns))
        .map(Line::from)
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(rows).block(block), area);
}

fn wrap_line_to_width(value: &str, width: usize) -> Vec<String> {
    let chars = value.chars().collect::<Vec<_>>();
    if width == 0 || chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn truncate_to_width(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars = value.chars().collect::<Vec<_>>();
    if chars.len() <= width {
        return value.to_string();
    }
    if width == 1 {
        return ELLIPSIS.to_string();
    }
    let mut out = chars.into_iter().take(width - 1).collect::<String>();
    out.push_str(ELLIPSIS);
    out
}
