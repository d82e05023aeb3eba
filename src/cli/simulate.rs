use colored::Colorize;
use comfy_table::{Cell, Table};
use crossterm::event::KeyCode;
use otpbox::error::{OtpError, Result};
use otpbox::field::{Field, FieldKind, InputField};
use otpbox::form::Form;
use otpbox::group::{OtpGroup, SinkTarget, Target};
use otpbox::settings::load_settings;

use super::{with_overrides, CONTAINER_ID, SINK_ID};

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Key(KeyCode),
    Paste(String),
    Set(String),
    Focus(usize),
    Caret(usize),
}

fn parse_index(kind: &str, raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| OtpError::Other(format!("Bad {kind} step: {raw:?}")))
}

fn parse_step(token: &str) -> Result<Vec<Step>> {
    if let Some(text) = token.strip_prefix("paste:") {
        return Ok(vec![Step::Paste(text.to_string())]);
    }
    if let Some(value) = token.strip_prefix("set:") {
        return Ok(vec![Step::Set(value.to_string())]);
    }
    if let Some(index) = token.strip_prefix("focus:") {
        return Ok(vec![Step::Focus(parse_index("focus", index)?)]);
    }
    if let Some(offset) = token.strip_prefix("caret:") {
        return Ok(vec![Step::Caret(parse_index("caret", offset)?)]);
    }
    if token.starts_with('<') && token.ends_with('>') {
        let code = match token {
            "<bs>" => KeyCode::Backspace,
            "<del>" => KeyCode::Delete,
            "<left>" => KeyCode::Left,
            "<right>" => KeyCode::Right,
            _ => return Err(OtpError::Other(format!("Unknown step: {token}"))),
        };
        return Ok(vec![Step::Key(code)]);
    }
    Ok(token.chars().map(|c| Step::Key(KeyCode::Char(c))).collect())
}

fn apply(group: &mut OtpGroup<InputField>, step: Step) -> Result<()> {
    let focused = group.focused();
    match step {
        Step::Key(code) => {
            if let Some(index) = focused {
                group.dispatch_key(index, code);
            }
        }
        Step::Paste(text) => {
            if let Some(index) = focused {
                group.paste(index, &text);
            }
        }
        Step::Set(value) => group.set_value(value)?,
        Step::Focus(index) => group.focus(index),
        Step::Caret(offset) => {
            if let Some(field) = focused.and_then(|i| group.field_mut(i)) {
                field.set_caret(offset);
            }
        }
    }
    Ok(())
}

fn print_table(group: &OtpGroup<InputField>) {
    let mut table = Table::new();
    table.set_header(vec!["Cell", "Shown", "Committed", "Focus"]);
    for cell in group.cells() {
        let focus = if group.focused() == Some(cell.index()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(cell.index()),
            Cell::new(cell.field().text()),
            Cell::new(cell.committed().map(String::from).unwrap_or_default()),
            Cell::new(focus),
        ]);
    }
    println!("{table}");
}

pub fn run(
    cells: Option<usize>,
    empty_char: Option<char>,
    strict: bool,
    table: bool,
    tokens: &[String],
) -> Result<()> {
    let steps = tokens
        .iter()
        .map(|t| parse_step(t))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten();

    let settings = with_overrides(load_settings(), cells, empty_char, strict);
    let form = Form::single(CONTAINER_ID, FieldKind::Text, settings.cells, Some(SINK_ID));
    let mut group = OtpGroup::bind(
        &form,
        Target::Selector(CONTAINER_ID.to_string()),
        Some(SinkTarget::Selector(SINK_ID.to_string())),
        settings.otp_config(),
    );
    if !group.is_empty() {
        group.focus(0);
    }

    for step in steps {
        apply(&mut group, step)?;
    }

    let sink = form
        .resolve_sink(SINK_ID)
        .map(|s| s.value())
        .unwrap_or_default();
    println!("{} {:?}", "value:".bold(), group.value());
    println!("{} {:?}", "sink: ".bold(), sink);
    match group.focused() {
        Some(i) => println!("{} {i}", "focus:".bold()),
        None => println!("{} none", "focus:".bold()),
    }
    if table {
        print_table(&group);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tokens_type_each_char() {
        assert_eq!(
            parse_step("1x").unwrap(),
            vec![Step::Key(KeyCode::Char('1')), Step::Key(KeyCode::Char('x'))]
        );
    }

    #[test]
    fn prefixed_tokens() {
        assert_eq!(parse_step("paste:123").unwrap(), vec![Step::Paste("123".into())]);
        assert_eq!(parse_step("set:42").unwrap(), vec![Step::Set("42".into())]);
        assert_eq!(parse_step("focus:3").unwrap(), vec![Step::Focus(3)]);
        assert_eq!(parse_step("caret:0").unwrap(), vec![Step::Caret(0)]);
        assert_eq!(parse_step("<del>").unwrap(), vec![Step::Key(KeyCode::Delete)]);
    }

    #[test]
    fn unknown_key_step_is_error() {
        assert!(parse_step("<tab>").is_err());
        assert!(parse_step("focus:x").is_err());
    }

    #[test]
    fn caret_step_feeds_delete() {
        let form = Form::single("otp", FieldKind::Text, 4, None);
        let mut group = OtpGroup::bind(
            &form,
            Target::Selector("otp".into()),
            None,
            Default::default(),
        );
        group.focus(0);
        for step in ["1234", "focus:0", "caret:0", "<del>"] {
            for s in parse_step(step).unwrap() {
                apply(&mut group, s).unwrap();
            }
        }
        assert_eq!(group.value(), "234 ");
        assert_eq!(group.focused(), Some(0));
    }
}
