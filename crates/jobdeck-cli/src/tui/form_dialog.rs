//! Add/edit overlay for the terminal browser.
//!
//! The draft values live in [`FormSession`]; this module only tracks which
//! field has focus and where the cursor is, and draws the overlay.
//!
//! - **Tab / Shift+Tab** move between fields
//! - **Enter** moves to the next field, **Ctrl+S** (or Enter on the last
//!   field) submits
//! - **Esc** cancels

use super::text::{char_len, edit_single_line, with_cursor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jobdeck_core::form::{FlashKind, FormSession};
use jobdeck_core::model::{FormField, JobForm};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// What the dialog wants the caller to do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

/// Focus and cursor state for the form overlay.
#[derive(Debug, Clone)]
pub struct FormDialog {
    focus: FormField,
    cursor: usize,
}

impl FormDialog {
    /// Start on the first field with the cursor at the end of its text.
    pub fn new(draft: &JobForm) -> Self {
        let focus = FormField::Title;
        Self {
            focus,
            cursor: char_len(draft.get(focus)),
        }
    }

    pub const fn focus(&self) -> FormField {
        self.focus
    }

    fn move_focus(&mut self, draft: &JobForm, field: FormField) {
        self.focus = field;
        self.cursor = char_len(draft.get(field));
    }

    pub fn handle_key(&mut self, draft: &mut JobForm, key: KeyEvent) -> FormAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Esc => FormAction::Cancel,
            KeyCode::Char('s') if ctrl => FormAction::Submit,
            KeyCode::BackTab => {
                self.move_focus(draft, self.focus.prev());
                FormAction::None
            }
            KeyCode::Tab if shift => {
                self.move_focus(draft, self.focus.prev());
                FormAction::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(draft, self.focus.next());
                FormAction::None
            }
            KeyCode::Up => {
                self.move_focus(draft, self.focus.prev());
                FormAction::None
            }
            KeyCode::Enter => {
                if self.focus == FormField::ALL[FormField::ALL.len() - 1] {
                    FormAction::Submit
                } else {
                    self.move_focus(draft, self.focus.next());
                    FormAction::None
                }
            }
            _ => {
                edit_single_line(draft.text_mut(self.focus), &mut self.cursor, key);
                FormAction::None
            }
        }
    }
}

pub fn render_form_modal(frame: &mut Frame<'_>, form: &FormSession, dialog: &FormDialog, area: Rect) {
    let field_count = u16::try_from(FormField::ALL.len()).unwrap_or(u16::MAX);
    let modal_width = area.width.saturating_sub(4).min(72);
    let modal_height = (field_count + 4).min(area.height);
    let x = area.x + area.width.saturating_sub(modal_width) / 2;
    let y = area.y + area.height.saturating_sub(modal_height) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let heading = if form.editing().is_some() {
        " Edit Job --- Press <ctrl+s> to save "
    } else {
        " Add Job --- Press <ctrl+s> to add "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(heading)
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let label_width = FormField::ALL
        .iter()
        .map(|f| f.label().chars().count())
        .max()
        .unwrap_or(0);
    let draft = form.draft();
    let mut lines: Vec<Line<'static>> = FormField::ALL
        .iter()
        .map(|field| {
            let focused = *field == dialog.focus;
            let required = FormField::REQUIRED.contains(field);
            let label = format!(
                "{}{:<label_width$} ",
                if required { "*" } else { " " },
                field.label()
            );
            let value = if focused {
                with_cursor(draft.get(*field), dialog.cursor)
            } else {
                draft.get(*field).to_string()
            };
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    if let Some(flash) = form.flash() {
        let color = match flash.kind {
            FlashKind::Success => Color::Green,
            FlashKind::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            flash.text.clone(),
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(dialog: &mut FormDialog, draft: &mut JobForm, code: KeyCode) -> FormAction {
        dialog.handle_key(draft, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(dialog: &mut FormDialog, draft: &mut JobForm, text: &str) {
        for c in text.chars() {
            press(dialog, draft, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut draft = JobForm::blank();
        let mut dialog = FormDialog::new(&draft);
        type_text(&mut dialog, &mut draft, "Actuary");
        press(&mut dialog, &mut draft, KeyCode::Tab);
        type_text(&mut dialog, &mut draft, "Acme");
        assert_eq!(draft.get(FormField::Title), "Actuary");
        assert_eq!(draft.get(FormField::Company), "Acme");
        assert_eq!(dialog.focus(), FormField::Company);
    }

    #[test]
    fn editing_starts_with_cursor_at_end() {
        let mut draft = JobForm::blank();
        draft.set(FormField::Title, "Analyst");
        let mut dialog = FormDialog::new(&draft);
        press(&mut dialog, &mut draft, KeyCode::Backspace);
        assert_eq!(draft.get(FormField::Title), "Analys");
    }

    #[test]
    fn enter_advances_then_submits_on_last_field() {
        let mut draft = JobForm::blank();
        let mut dialog = FormDialog::new(&draft);
        for _ in 0..FormField::ALL.len() - 1 {
            assert_eq!(press(&mut dialog, &mut draft, KeyCode::Enter), FormAction::None);
        }
        assert_eq!(dialog.focus(), FormField::Posted);
        assert_eq!(press(&mut dialog, &mut draft, KeyCode::Enter), FormAction::Submit);
    }

    #[test]
    fn ctrl_s_submits_and_esc_cancels() {
        let mut draft = JobForm::blank();
        let mut dialog = FormDialog::new(&draft);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(dialog.handle_key(&mut draft, ctrl_s), FormAction::Submit);
        assert_eq!(draft.get(FormField::Title), "");
        assert_eq!(press(&mut dialog, &mut draft, KeyCode::Esc), FormAction::Cancel);
    }

    #[test]
    fn back_tab_wraps_to_last_field() {
        let mut draft = JobForm::blank();
        let mut dialog = FormDialog::new(&draft);
        press(&mut dialog, &mut draft, KeyCode::BackTab);
        assert_eq!(dialog.focus(), FormField::Posted);
    }
}
