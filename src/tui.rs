use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::auth::AuthService;
use crate::navigation::Route;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(35, 33, 41))
    .add_modifier(Modifier::BOLD);

pub const ERROR_STYLE: Style = Style::new().fg(Color::Rgb(197, 48, 48));

/// Width of the centered column that holds a screen's form.
pub const FORM_WIDTH: u16 = 50;

/// Parse `#rrggbb` (leading `#` optional) into an RGB colour.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// A horizontally centered column of at most `width` cells inside `area`.
pub fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect::new(x, area.y, width, area.height)
}

// ---------------------------------------------------------------------------
// Screen infrastructure
// ---------------------------------------------------------------------------

/// A modal message with no field attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Something a screen asks its host to do. Applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Alert(Alert),
    Navigate(Route),
    GoBack,
    Quit,
}

pub trait Screen {
    fn route(&self) -> Route;
    fn draw(&mut self, frame: &mut Frame, area: Rect, accent: Color);
    /// Handle one key press. The remote service is passed in rather than owned
    /// so screens stay testable with a fake.
    fn handle_key(&mut self, code: KeyCode, auth: &dyn AuthService) -> Vec<Effect>;
}

/// Draw `alert` as a bordered box in the middle of `area`.
pub fn draw_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let width = 44u16.min(area.width.saturating_sub(2));
    let inner_width = width.saturating_sub(4) as usize;
    let (message, message_lines) = wrap_text(&alert.message, inner_width);
    // borders + blank + message + blank + button
    let height = (message_lines + 5).min(area.height);

    let [_top, row, _bottom] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let rect = centered_column(row, width);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", alert.title), HEADER_STYLE))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(40, 38, 46)));

    let mut lines = vec![Line::from("")];
    lines.extend(message.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ OK ]",
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        rect,
    );
}
