use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::error::Result;
use crate::field::{Field, FieldKind};
use crate::group::OtpGroup;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

const BOX_WIDTH: u16 = 5;
const BOX_HEIGHT: u16 = 3;

pub enum EntryAction {
    Continue,
    Submit(String),
    Cancel,
}

/// Glyph shown inside one box.
fn cell_glyph(text: &str, kind: FieldKind, mask: bool) -> String {
    match text.chars().next() {
        None => " ".to_string(),
        Some(_) if mask || kind == FieldKind::Password => "\u{25cf}".to_string(),
        Some(c) => c.to_string(),
    }
}

/// Logical value with each digit hidden; empty cells keep the empty char.
fn masked_value(group: &OtpGroup) -> String {
    let empty = group.config().empty_char;
    group
        .cells()
        .iter()
        .map(|c| c.value().map_or(empty, |_| '\u{25cf}'))
        .collect()
}

/// Route one terminal event to the focused cell.
pub fn handle_event(group: &mut OtpGroup, event: Event) -> EntryAction {
    let focused = group.focused();
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return EntryAction::Cancel;
            }
            match code {
                KeyCode::Esc => EntryAction::Cancel,
                KeyCode::Enter => EntryAction::Submit(group.value()),
                _ => {
                    if let Some(index) = focused {
                        group.dispatch_key(index, code);
                    }
                    EntryAction::Continue
                }
            }
        }
        Event::Paste(text) => {
            if let Some(index) = focused {
                group.paste(index, &text);
            }
            EntryAction::Continue
        }
        _ => EntryAction::Continue,
    }
}

pub fn draw(frame: &mut Frame, group: &OtpGroup, title: &str, mask: bool) {
    let [header, row, value_area, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(BOX_HEIGHT),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(title.to_string(), HEADER_STYLE)),
        header,
    );

    let boxes = Layout::horizontal(vec![Constraint::Length(BOX_WIDTH); group.len()]).split(row);
    for (cell, area) in group.cells().iter().zip(boxes.iter()) {
        let field = cell.field();
        let is_focused = field.is_focused();
        let selected = is_focused && matches!(field.selection(), Some((s, e)) if s != e);
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let glyph = cell_glyph(field.text(), field.kind(), mask);
        let text_style = if selected {
            SELECTED_STYLE
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(glyph, text_style)).centered()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            ),
            *area,
        );
    }

    if let Some(index) = group.focused() {
        if let (Some(area), Some(cell)) = (boxes.get(index), group.cell(index)) {
            let caret = cell.field().caret().min(1) as u16;
            frame.set_cursor_position((area.x + 2 + caret, area.y + 1));
        }
    }

    let shown = if mask {
        masked_value(group)
    } else {
        group.value()
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Value: "),
            Span::styled(format!("[{shown}]"), Style::default().add_modifier(Modifier::BOLD)),
        ])),
        Rect { y: value_area.y + 1, height: 1, ..value_area },
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "digits type \u{2022} \u{2190}/\u{2192} move \u{2022} Del shift \u{2022} Enter submit \u{2022} Esc cancel",
            FOOTER_STYLE,
        )),
        footer,
    );
}

/// Run interactive entry. Returns the logical value on submit, `None` on
/// cancel. Restores the terminal on exit, including on panic.
pub fn run_entry(group: &mut OtpGroup, title: &str, mask: bool) -> Result<Option<String>> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableBracketedPaste)?;
    if !group.is_empty() {
        group.focus(0);
    }

    let result: Result<Option<String>> = loop {
        if let Err(e) = terminal.draw(|frame| draw(frame, group, title, mask)) {
            break Err(e.into());
        }
        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(ev) => match handle_event(group, ev) {
                EntryAction::Continue => {}
                EntryAction::Submit(value) => break Ok(Some(value)),
                EntryAction::Cancel => break Ok(None),
            },
        }
    };

    drop(terminal);
    let _ = execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}
