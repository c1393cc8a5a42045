use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use zeroize::Zeroize;

use crate::tui::{ERROR_STYLE, SELECTED_STYLE};
use crate::validation::FieldErrorMap;

/// Rows taken by one input: the value line and the error line under it.
pub const FIELD_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Mail,
    Lock,
    User,
}

impl Icon {
    fn glyph(self) -> &'static str {
        match self {
            Icon::Mail => "\u{2709}",
            Icon::Lock => "\u{26b7}",
            Icon::User => "\u{263a}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capitalize {
    None,
    Words,
}

/// What Enter does while the field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKey {
    Next,
    Send,
}

/// Static description of one input.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub icon: Icon,
    pub placeholder: &'static str,
    pub capitalize: Capitalize,
    pub secure: bool,
    pub return_key: ReturnKey,
}

struct FormField {
    spec: FieldSpec,
    value: String,
    error: Option<String>,
}

/// What the host screen should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Continue,
    Submit,
    /// A button below the inputs was pressed; the index is into `buttons`.
    Button(usize),
}

/// Inputs followed by buttons, one of which has focus.
pub struct FormState {
    fields: Vec<FormField>,
    buttons: &'static [&'static str],
    focused: usize,
    /// Char index into the focused field's value.
    cursor_pos: usize,
}

impl FormState {
    pub fn new(specs: &[FieldSpec], buttons: &'static [&'static str]) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| FormField {
                    spec: *spec,
                    value: String::new(),
                    error: None,
                })
                .collect(),
            buttons,
            focused: 0,
            cursor_pos: 0,
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.value.as_str()).unwrap_or("")
    }

    #[cfg(test)]
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.spec.name == name) {
            field.value.zeroize();
            field.value.push_str(value);
        }
        if self.focused < self.fields.len() {
            self.cursor_pos = self.fields[self.focused].value.chars().count();
        }
    }

    #[cfg(test)]
    pub fn error(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.error.as_deref())
    }

    /// Current errors, keyed by field name.
    #[cfg(test)]
    pub fn errors(&self) -> FieldErrorMap {
        self.fields
            .iter()
            .filter_map(|f| f.error.clone().map(|e| (f.spec.name.to_string(), e)))
            .collect()
    }

    /// Replace every field's error with the entry from `errors` (or none).
    /// Names with no matching field are ignored.
    pub fn set_errors(&mut self, errors: &FieldErrorMap) {
        for field in &mut self.fields {
            field.error = errors.get(field.spec.name).cloned();
        }
    }

    pub fn clear_errors(&mut self) {
        self.set_errors(&FieldErrorMap::new());
    }

    #[cfg(test)]
    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn focused_button(&self) -> Option<usize> {
        self.focused.checked_sub(self.fields.len())
    }

    pub fn focus(&mut self, idx: usize) {
        self.focused = idx.min(self.slot_count() - 1);
        if let Some(field) = self.fields.get(self.focused) {
            self.cursor_pos = field.value.chars().count();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus((self.focused + 1) % self.slot_count());
    }

    pub fn focus_prev(&mut self) {
        let count = self.slot_count();
        self.focus((self.focused + count - 1) % count);
    }

    fn slot_count(&self) -> usize {
        (self.fields.len() + self.buttons.len()).max(1)
    }

    fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.spec.name == name)
    }

    /// Convert the char-index cursor position to a byte offset in the focused value.
    fn cursor_byte_pos(&self, value: &str) -> usize {
        value
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(value.len())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormEvent {
        match code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormEvent::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return FormEvent::Continue;
            }
            _ => {}
        }

        if let Some(button) = self.focused_button() {
            return match code {
                KeyCode::Enter => FormEvent::Button(button),
                KeyCode::Left => {
                    self.focus_prev();
                    FormEvent::Continue
                }
                KeyCode::Right => {
                    self.focus_next();
                    FormEvent::Continue
                }
                _ => FormEvent::Continue,
            };
        }

        let idx = self.focused;
        let char_len = self.fields[idx].value.chars().count();
        match code {
            KeyCode::Enter => match self.fields[idx].spec.return_key {
                ReturnKey::Next => self.focus_next(),
                ReturnKey::Send => return FormEvent::Submit,
            },
            KeyCode::Char(c) => {
                let byte_pos = self.cursor_byte_pos(&self.fields[idx].value);
                let field = &mut self.fields[idx];
                let starts_word = field.value[..byte_pos]
                    .chars()
                    .last()
                    .map_or(true, char::is_whitespace);
                let mut inserted = 0;
                if field.spec.capitalize == Capitalize::Words && starts_word {
                    let mut offset = byte_pos;
                    for upper in c.to_uppercase() {
                        field.value.insert(offset, upper);
                        offset += upper.len_utf8();
                        inserted += 1;
                    }
                } else {
                    field.value.insert(byte_pos, c);
                    inserted = 1;
                }
                self.cursor_pos += inserted;
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let byte_pos = self.cursor_byte_pos(&self.fields[idx].value);
                    self.fields[idx].value.remove(byte_pos);
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < char_len {
                    let byte_pos = self.cursor_byte_pos(&self.fields[idx].value);
                    self.fields[idx].value.remove(byte_pos);
                }
            }
            KeyCode::Left => self.cursor_pos = self.cursor_pos.saturating_sub(1),
            KeyCode::Right => self.cursor_pos = (self.cursor_pos + 1).min(char_len),
            KeyCode::Home => self.cursor_pos = 0,
            KeyCode::End => self.cursor_pos = char_len,
            _ => {}
        }
        FormEvent::Continue
    }

    /// Rows needed by `draw_fields`.
    pub fn fields_height(&self) -> u16 {
        self.fields.len() as u16 * FIELD_HEIGHT
    }

    pub fn draw_fields(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let rows = Layout::vertical(vec![Constraint::Length(FIELD_HEIGHT); self.fields.len()])
            .split(area);
        for (idx, (field, row)) in self.fields.iter().zip(rows.iter()).enumerate() {
            self.draw_field(frame, *row, field, idx == self.focused, accent);
        }
    }

    fn draw_field(&self, frame: &mut Frame, area: Rect, field: &FormField, active: bool, accent: Color) {
        let [input_row, error_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        let [icon_area, input_area] =
            Layout::horizontal([Constraint::Length(3), Constraint::Fill(1)]).areas(input_row);

        let icon_style = if field.error.is_some() {
            ERROR_STYLE
        } else if active || !field.value.is_empty() {
            Style::default().fg(accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", field.spec.icon.glyph()), icon_style)),
            icon_area,
        );

        let width = input_area.width as usize;
        let (display, style) = if active {
            (
                insert_cursor(&field.value, self.cursor_pos, field.spec.secure),
                SELECTED_STYLE,
            )
        } else if field.value.is_empty() {
            (
                field.spec.placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (mask(&field.value, field.spec.secure), Style::default())
        };
        let padded = format!("{:<width$}", display, width = width);
        frame.render_widget(Paragraph::new(Span::styled(padded, style)), input_area);

        if let Some(error) = &field.error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("   {error}"), ERROR_STYLE)),
                error_row,
            );
        }
    }

    /// Button `idx` as a line, highlighted when it has focus.
    pub fn button_line(&self, idx: usize, accent: Color) -> Line<'static> {
        let label = self.buttons.get(idx).copied().unwrap_or("");
        let style = if self.focused_button() == Some(idx) {
            Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(Span::styled(format!("[ {label} ]"), style))
    }
}

impl Drop for FormState {
    fn drop(&mut self) {
        for field in &mut self.fields {
            if field.spec.secure {
                field.value.zeroize();
            }
        }
    }
}

fn mask(value: &str, secure: bool) -> String {
    if secure {
        "\u{25cf}".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}

/// Build a display string with a block cursor inserted at `cursor_pos`.
fn insert_cursor(value: &str, cursor_pos: usize, masked: bool) -> String {
    let mut display = mask(value, masked);
    let byte_pos = display
        .char_indices()
        .nth(cursor_pos)
        .map(|(i, _)| i)
        .unwrap_or(display.len());
    display.insert(byte_pos, '\u{2588}');
    display
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing;

    const SPECS: &[FieldSpec] = &[
        FieldSpec {
            name: "name",
            icon: Icon::User,
            placeholder: "Name",
            capitalize: Capitalize::Words,
            secure: false,
            return_key: ReturnKey::Next,
        },
        FieldSpec {
            name: "password",
            icon: Icon::Lock,
            placeholder: "Password",
            capitalize: Capitalize::None,
            secure: true,
            return_key: ReturnKey::Send,
        },
    ];

    const BUTTONS: &[&str] = &["Go", "Cancel"];

    fn make_form() -> FormState {
        FormState::new(SPECS, BUTTONS)
    }

    fn type_str(form: &mut FormState, s: &str) {
        for c in s.chars() {
            form.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut form = make_form();
        form.focus(1);
        type_str(&mut form, "abc");
        assert_eq!(form.value("password"), "abc");
        assert_eq!(form.value("name"), "");
    }

    #[test]
    fn capitalize_words_uppercases_word_starts() {
        let mut form = make_form();
        type_str(&mut form, "ana maria");
        assert_eq!(form.value("name"), "Ana Maria");
    }

    #[test]
    fn secure_field_is_not_capitalized() {
        let mut form = make_form();
        form.focus(1);
        type_str(&mut form, "abc def");
        assert_eq!(form.value("password"), "abc def");
    }

    #[test]
    fn enter_on_next_field_moves_focus() {
        let mut form = make_form();
        assert_eq!(form.handle_key(KeyCode::Enter), FormEvent::Continue);
        assert_eq!(form.focused(), 1);
    }

    #[test]
    fn enter_on_send_field_submits() {
        let mut form = make_form();
        form.focus(1);
        assert_eq!(form.handle_key(KeyCode::Enter), FormEvent::Submit);
    }

    #[test]
    fn enter_on_button_reports_its_index() {
        let mut form = make_form();
        form.focus(3);
        assert_eq!(form.focused_button(), Some(1));
        assert_eq!(form.handle_key(KeyCode::Enter), FormEvent::Button(1));
    }

    #[test]
    fn tab_wraps_around_all_slots() {
        let mut form = make_form();
        for expected in [1, 2, 3, 0] {
            form.handle_key(KeyCode::Tab);
            assert_eq!(form.focused(), expected);
        }
        form.handle_key(KeyCode::BackTab);
        assert_eq!(form.focused(), 3);
    }

    #[test]
    fn backspace_and_delete_edit_at_cursor() {
        let mut form = make_form();
        form.focus(1);
        type_str(&mut form, "abcd");
        form.handle_key(KeyCode::Backspace);
        assert_eq!(form.value("password"), "abc");
        form.handle_key(KeyCode::Home);
        form.handle_key(KeyCode::Delete);
        assert_eq!(form.value("password"), "bc");
        form.handle_key(KeyCode::End);
        form.handle_key(KeyCode::Left);
        form.handle_key(KeyCode::Char('x'));
        assert_eq!(form.value("password"), "bxc");
    }

    #[test]
    fn multibyte_input_is_edited_by_char() {
        let mut form = make_form();
        form.focus(1);
        type_str(&mut form, "çã");
        form.handle_key(KeyCode::Left);
        form.handle_key(KeyCode::Backspace);
        assert_eq!(form.value("password"), "ã");
    }

    #[test]
    fn set_errors_replaces_previous_errors() {
        let mut form = make_form();
        let mut first = FieldErrorMap::new();
        first.insert("name".into(), "Name is required.".into());
        first.insert("password".into(), "short".into());
        form.set_errors(&first);
        assert_eq!(form.errors().len(), 2);

        let mut second = FieldErrorMap::new();
        second.insert("password".into(), "still short".into());
        form.set_errors(&second);
        assert_eq!(form.error("name"), None);
        assert_eq!(form.error("password"), Some("still short"));
    }

    #[test]
    fn set_errors_ignores_unknown_fields() {
        let mut form = make_form();
        let mut errors = FieldErrorMap::new();
        errors.insert("nickname".into(), "nope".into());
        form.set_errors(&errors);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn clear_errors_empties_map() {
        let mut form = make_form();
        let mut errors = FieldErrorMap::new();
        errors.insert("name".into(), "x".into());
        form.set_errors(&errors);
        form.clear_errors();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn secure_values_render_masked() {
        let mut form = make_form();
        form.set_value("password", "hunter2");
        form.set_value("name", "Ana");
        form.focus(2);
        let rows = testing::render(40, 4, |f| form.draw_fields(f, f.area(), Color::Yellow));
        assert!(testing::contains(&rows, "Ana"));
        assert!(!testing::contains(&rows, "hunter2"));
        assert!(testing::contains(&rows, &"\u{25cf}".repeat(7)));
    }

    #[test]
    fn errors_render_under_their_field() {
        let mut form = make_form();
        let mut errors = FieldErrorMap::new();
        errors.insert("password".into(), "Minimum 6 characters.".into());
        form.set_errors(&errors);
        let rows = testing::render(40, 4, |f| form.draw_fields(f, f.area(), Color::Yellow));
        assert!(rows[3].contains("Minimum 6 characters."));
        assert!(!rows[1].contains("Minimum"));
    }

    #[test]
    fn empty_unfocused_field_shows_placeholder() {
        let mut form = make_form();
        form.focus(2);
        let rows = testing::render(40, 4, |f| form.draw_fields(f, f.area(), Color::Yellow));
        assert!(rows[0].contains("Name"));
        assert!(rows[2].contains("Password"));
    }

    #[test]
    fn insert_cursor_places_block_at_position() {
        assert_eq!(insert_cursor("abc", 1, false), "a\u{2588}bc");
        assert_eq!(insert_cursor("abc", 3, true), "\u{25cf}\u{25cf}\u{25cf}\u{2588}");
    }
}
