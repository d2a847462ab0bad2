//! Turning the fields of one expanded line into a [`Command`].
//!
//! Field positions are fixed per command kind (see
//! [`CommandKind::required_fields`]). Required fields must be present;
//! optional trailing fields fall back to the defaults defined in
//! [`easel_core::command`]. Fields beyond the last one a kind uses are
//! ignored.

use std::time::Duration;

use easel_core::{
    command::{
        Command, CommandKind, DEFAULT_SHAPE_COLOR, DEFAULT_SHAPE_KIND, DEFAULT_STICKY_COLOR,
        DEFAULT_TEXT_SIZE, Frame, Link, Print, SetVar, Shape, Sleep, Sticky, Text,
    },
    geometry::{Point, Size},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    fields::{self, Field},
    span::Span,
    variables::VariableStore,
};

const NUMBER_HELP: &str = "numeric fields accept decimal values such as `10`, `-4` or `12.5`";

/// Positional access to the fields that follow the command keyword.
struct Fields<'a, 'src> {
    kind: CommandKind,
    keyword: Field<'src>,
    args: &'a [Field<'src>],
}

impl<'src> Fields<'_, 'src> {
    /// The required field at `index` (0-based, after the keyword).
    ///
    /// Presence is checked up front by [`build_command`].
    fn text(&self, index: usize) -> &'src str {
        self.args[index].text()
    }

    /// The optional field at `index`, or `default` when absent or blank.
    fn optional(&self, index: usize, default: &str) -> String {
        self.args
            .get(index)
            .map(Field::text)
            .filter(|text| !text.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    fn number(&self, index: usize) -> Result<f64, Diagnostic> {
        let field = &self.args[index];
        let name = self.kind.required_fields()[index];
        match field.text().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(invalid_number(field, name, "not a finite number")),
        }
    }

    fn point(&self, x: usize, y: usize) -> Result<Point, Diagnostic> {
        Ok(Point::new(self.number(x)?, self.number(y)?))
    }

    fn size(&self, width: usize, height: usize) -> Result<Size, Diagnostic> {
        Ok(Size::new(self.number(width)?, self.number(height)?))
    }

    fn duration(&self, index: usize) -> Result<Duration, Diagnostic> {
        let seconds = self.number(index)?;
        Duration::try_from_secs_f64(seconds).map_err(|_| {
            invalid_number(
                &self.args[index],
                self.kind.required_fields()[index],
                "not a valid duration",
            )
            .with_help("durations are a non-negative number of seconds, e.g. `0.5`")
        })
    }
}

fn invalid_number(field: &Field<'_>, name: &str, label: &str) -> Diagnostic {
    Diagnostic::error(format!("invalid number `{}` for `{name}`", field.text()))
        .with_code(ErrorCode::E102)
        .with_label(field.span(), label)
        .with_help(NUMBER_HELP)
}

fn unknown_command(keyword: &Field<'_>) -> Diagnostic {
    let keywords: Vec<&str> = CommandKind::ALL.iter().map(|kind| kind.keyword()).collect();
    Diagnostic::error(format!("unknown command `{}`", keyword.text()))
        .with_code(ErrorCode::E100)
        .with_label(keyword.span(), "not a command")
        .with_help(format!("expected one of {}", keywords.join(", ")))
}

fn missing_fields(
    kind: CommandKind,
    keyword: &Field<'_>,
    args: &[Field<'_>],
    line: &str,
) -> Diagnostic {
    let required = kind.required_fields();
    let missing = &required[args.len()..];
    let missing_list = missing
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ");

    let end = Span::new(line.len()..line.len());
    Diagnostic::error(format!(
        "`{kind}` needs {} field(s), found {}",
        required.len(),
        args.len()
    ))
    .with_code(ErrorCode::E101)
    .with_label(end, format!("missing {missing_list}"))
    .with_secondary_label(keyword.span(), "command")
    .with_help(format!("usage: {}", kind.usage()))
}

/// Build a command from an expanded, non-blank, non-comment line.
///
/// A `SET` line writes into `variables` before returning, so the next
/// line already sees the new value.
pub(crate) fn build_command(
    line: &str,
    variables: &mut VariableStore,
) -> Result<Command, Diagnostic> {
    let all = fields::split(line);
    let Some((keyword, args)) = all.split_first() else {
        return Err(Diagnostic::error("empty instruction").with_code(ErrorCode::E100));
    };

    let kind = keyword
        .text()
        .parse::<CommandKind>()
        .map_err(|_| unknown_command(keyword))?;

    if args.len() < kind.required_fields().len() {
        return Err(missing_fields(kind, keyword, args, line));
    }

    let fields = Fields {
        kind,
        keyword: *keyword,
        args,
    };

    let command = match kind {
        CommandKind::Set => {
            let name = fields.text(0);
            if name.is_empty() {
                return Err(Diagnostic::error("variable name is empty")
                    .with_code(ErrorCode::E103)
                    .with_label(fields.args[0].span(), "expected a name")
                    .with_secondary_label(fields.keyword.span(), "command")
                    .with_help("usage: SET|name|value, then refer to it as `$name`"));
            }
            let value = fields.text(1);
            variables.set(name, value);
            Command::SetVar(SetVar::new(name, value))
        }
        CommandKind::Frame => Command::Frame(Frame::new(
            fields.text(0),
            fields.point(1, 2)?,
            fields.size(3, 4)?,
        )),
        CommandKind::Shape => Command::Shape(
            Shape::new(fields.text(0), fields.point(1, 2)?, fields.size(3, 4)?)
                .with_color(fields.optional(5, DEFAULT_SHAPE_COLOR))
                .with_shape(fields.optional(6, DEFAULT_SHAPE_KIND)),
        ),
        CommandKind::Sticky => Command::Sticky(
            Sticky::new(fields.text(0), fields.point(1, 2)?)
                .with_color(fields.optional(3, DEFAULT_STICKY_COLOR)),
        ),
        CommandKind::Text => Command::Text(
            Text::new(fields.text(0), fields.point(1, 2)?)
                .with_font_size(fields.optional(3, DEFAULT_TEXT_SIZE)),
        ),
        CommandKind::Link => Command::Link(
            Link::new(fields.text(0), fields.text(1)).with_label(fields.optional(2, "")),
        ),
        CommandKind::Sleep => Command::Sleep(Sleep::new(fields.duration(0)?)),
        CommandKind::Print => Command::Print(Print::new(fields.text(0))),
    };

    Ok(command)
}
