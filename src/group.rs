//! The OTP box group: N single-digit cells kept consistent as one value.

use std::fmt::Display;

use crossterm::event::KeyCode;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::error::{OtpError, Result};
use crate::field::{Field, InputField};
use crate::form::Form;
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Rendered in place of an empty cell by [`OtpGroup::value`].
    pub empty_char: char,
    pub allow_programmatic_set: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            empty_char: ' ',
            allow_programmatic_set: true,
        }
    }
}

impl OtpConfig {
    /// Restore-only behaviour: blank padding, no `set_value`.
    pub fn strict() -> Self {
        Self {
            empty_char: ' ',
            allow_programmatic_set: false,
        }
    }
}

/// Where a group finds its cells.
pub enum Target<F> {
    Selector(String),
    Fields(Vec<F>),
}

/// Where a group mirrors its value.
pub enum SinkTarget {
    Selector(String),
    Handle(Box<dyn Sink>),
}

/// Whether a key handler suppressed the field's own editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Default,
    Prevented,
}

pub struct Cell<F> {
    index: usize,
    field: F,
    committed: Option<char>,
}

impl<F: Field> Cell<F> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Last value that passed validation; the rollback target.
    pub fn committed(&self) -> Option<char> {
        self.committed
    }

    pub fn value(&self) -> Option<char> {
        self.field.text().chars().next()
    }
}

fn is_numeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

pub struct OtpGroup<F: Field = InputField> {
    cells: Vec<Cell<F>>,
    sink: Option<Box<dyn Sink>>,
    config: OtpConfig,
    focused: Option<usize>,
    bound: bool,
}

impl OtpGroup<InputField> {
    /// Bind to a container and optional sink, resolving locators against
    /// `form`. An unresolvable container yields an unbound group with no
    /// cells; an unresolvable sink is dropped.
    pub fn bind(
        form: &Form,
        container: Target<InputField>,
        sink: Option<SinkTarget>,
        config: OtpConfig,
    ) -> Self {
        let fields = match container {
            Target::Fields(fields) => fields,
            Target::Selector(locator) => match form.resolve_cells(&locator) {
                Some(fields) => fields,
                None => {
                    warn!("{}", OtpError::UnresolvableTarget(locator));
                    return Self::unbound(config);
                }
            },
        };
        let sink: Option<Box<dyn Sink>> = match sink {
            None => None,
            Some(SinkTarget::Handle(handle)) => Some(handle),
            Some(SinkTarget::Selector(locator)) => match form.resolve_sink(&locator) {
                Some(field) => Some(Box::new(field)),
                None => {
                    warn!("{}", OtpError::UnresolvableTarget(locator));
                    None
                }
            },
        };
        Self::new(fields, sink, config)
    }
}

impl<F: Field> OtpGroup<F> {
    pub fn new(fields: Vec<F>, sink: Option<Box<dyn Sink>>, config: OtpConfig) -> Self {
        let cells = fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| {
                let committed = field.text().chars().next().filter(char::is_ascii_digit);
                Cell {
                    index,
                    field,
                    committed,
                }
            })
            .collect();
        Self {
            cells,
            sink,
            config,
            focused: None,
            bound: true,
        }
    }

    fn unbound(config: OtpConfig) -> Self {
        Self {
            cells: Vec::new(),
            sink: None,
            config,
            focused: None,
            bound: false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn config(&self) -> OtpConfig {
        self.config
    }

    pub fn cells(&self) -> &[Cell<F>] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell<F>> {
        self.cells.get(index)
    }

    /// Mutable access to a cell's field for front ends applying the
    /// field's own editing. Changes must be followed by [`Self::handle_input`].
    pub fn field_mut(&mut self, index: usize) -> Option<&mut F> {
        self.cells.get_mut(index).map(|c| &mut c.field)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// The logical value: one character per cell, `empty_char` for
    /// empty cells.
    pub fn value(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.value().unwrap_or(self.config.empty_char))
            .collect()
    }

    /// Takes effect on the next [`Self::value`]; the sink is not touched.
    pub fn set_empty_char(&mut self, ch: char) {
        self.config.empty_char = ch;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(OtpError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
        }
    }

    pub fn focus(&mut self, index: usize) {
        if let Err(e) = self.check_index(index) {
            error!("{e}");
            return;
        }
        if let Some(prev) = self.focused.filter(|&p| p != index) {
            self.cells[prev].field.blur();
        }
        self.focused = Some(index);
        self.cells[index].field.focus();
    }

    fn focus_and_select(&mut self, index: usize) {
        self.focus(index);
        if let Some(cell) = self.cells.get_mut(index) {
            cell.field.select_all();
        }
    }

    fn refresh_sink(&mut self) {
        if self.sink.is_none() {
            return;
        }
        let value = self.value();
        if let Some(sink) = self.sink.as_mut() {
            sink.write(&value);
        }
    }

    /// Validated write of at most one digit into a cell. Longer values are
    /// truncated to their first character. Does not refresh the sink.
    fn commit(&mut self, index: usize, value: &str) -> Result<()> {
        self.check_index(index)?;
        if !is_numeric(value) {
            return Err(OtpError::InvalidDigit(value.to_string()));
        }
        let digit = value.chars().next();
        let cell = &mut self.cells[index];
        cell.field.set_text(&digit.map(String::from).unwrap_or_default());
        cell.committed = digit;
        Ok(())
    }

    fn commit_or_log(&mut self, index: usize, value: &str) {
        if let Err(e) = self.commit(index, value) {
            error!("{e}");
        }
    }

    /// React to cell `index`'s displayed text having changed.
    pub fn handle_input(&mut self, index: usize) {
        if let Err(e) = self.check_index(index) {
            error!("{e}");
            return;
        }
        let raw = self.cells[index].field.text().to_string();
        let last = self.cells.len() - 1;

        if !is_numeric(&raw) {
            let cell = &mut self.cells[index];
            let restore = cell.committed.map(String::from).unwrap_or_default();
            debug!("cell {index}: rejected {raw:?}, restoring {restore:?}");
            cell.field.set_text(&restore);
            self.refresh_sink();
            return;
        }

        match raw.chars().count() {
            0 => {
                self.cells[index].committed = None;
                self.refresh_sink();
            }
            1 => {
                self.commit_or_log(index, &raw);
                self.refresh_sink();
                if index < last {
                    self.focus(index + 1);
                }
            }
            _ if index == last => {
                self.commit_or_log(index, &raw);
                self.refresh_sink();
            }
            count => {
                debug!("cell {index}: distributing {count} characters");
                for (pos, ch) in raw.chars().enumerate() {
                    if index + pos > last {
                        break;
                    }
                    self.commit_or_log(index + pos, ch.encode_utf8(&mut [0u8; 4]));
                }
                self.focus_and_select(last.min(index + count));
                self.refresh_sink();
            }
        }
    }

    /// React to a navigation/editing key pressed in cell `index`, before
    /// the field applies its own editing.
    pub fn handle_key(&mut self, index: usize, code: KeyCode) -> KeyAction {
        if let Err(e) = self.check_index(index) {
            error!("{e}");
            return KeyAction::Default;
        }
        let last = self.cells.len() - 1;
        let selection = self.cells[index].field.selection();

        match code {
            KeyCode::Backspace if index != 0 && self.cells[index].field.text().is_empty() => {
                self.commit_or_log(index - 1, "");
                self.focus(index - 1);
                self.refresh_sink();
                KeyAction::Default
            }
            KeyCode::Delete if index != last => {
                // Unknown caret counts as offset 0.
                let start = selection.map_or(0, |(start, _)| start);
                for pos in (index + start)..last {
                    let next = self.cells[pos + 1].field.text().to_string();
                    self.commit_or_log(pos, &next);
                }
                self.commit_or_log(last, "");
                self.cells[index].field.set_caret(start);
                self.refresh_sink();
                KeyAction::Prevented
            }
            KeyCode::Left if selection.is_none_or(|(start, _)| start == 0) => {
                if index > 0 {
                    self.focus_and_select(index - 1);
                    return KeyAction::Prevented;
                }
                KeyAction::Default
            }
            KeyCode::Right
                if selection
                    .is_none_or(|(_, end)| end == self.cells[index].field.text().chars().count()) =>
            {
                if index < last {
                    self.focus_and_select(index + 1);
                    return KeyAction::Prevented;
                }
                KeyAction::Default
            }
            _ => KeyAction::Default,
        }
    }

    /// Write `value` across the cells from the first, clearing cells past
    /// its end. The sink is refreshed after each cell.
    pub fn set_value(&mut self, value: impl Display) -> Result<()> {
        if !self.config.allow_programmatic_set {
            error!("{}", OtpError::ProgrammaticSetDisabled);
            return Err(OtpError::ProgrammaticSetDisabled);
        }
        let value = value.to_string();
        if !is_numeric(&value) {
            let e = OtpError::InvalidDigit(value);
            error!("{e}");
            return Err(e);
        }
        let chars: Vec<char> = value.chars().collect();
        for k in 0..self.cells.len() {
            let ch = chars.get(k).map(|c| c.to_string()).unwrap_or_default();
            self.commit_or_log(k, &ch);
            self.refresh_sink();
        }
        Ok(())
    }
}

impl OtpGroup<InputField> {
    /// Full keystroke in cell `index`: group key handling, then the field's
    /// own editing unless prevented, then input handling if the text
    /// changed.
    pub fn dispatch_key(&mut self, index: usize, code: KeyCode) {
        if self.handle_key(index, code) == KeyAction::Prevented {
            return;
        }
        let changed = match self.field_mut(index) {
            Some(field) => field.apply_key(code),
            None => false,
        };
        if changed {
            self.handle_input(index);
        }
    }

    /// Paste `text` at the caret of cell `index`.
    pub fn paste(&mut self, index: usize, text: &str) {
        let Some(field) = self.field_mut(index) else {
            error!(
                "{}",
                OtpError::IndexOutOfRange {
                    index,
                    len: self.len()
                }
            );
            return;
        };
        field.insert_str(text);
        self.handle_input(index);
    }
}
