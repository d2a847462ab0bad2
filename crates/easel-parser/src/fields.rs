//! Splitting an expanded instruction line into `|`-delimited fields.

use winnow::{
    Parser as _,
    combinator::separated,
    error::{ContextError, ErrMode},
    stream::LocatingSlice,
    token::take_till,
};

use crate::span::Span;

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// One trimmed field with its location in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field<'src> {
    text: &'src str,
    span: Span,
}

impl<'src> Field<'src> {
    fn new(raw: &'src str, range: std::ops::Range<usize>) -> Self {
        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        let start = range.start + leading;
        Self {
            text,
            span: Span::new(start..start + text.len()),
        }
    }

    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    /// Location of the trimmed text. Empty fields get an empty span at
    /// their position.
    pub(crate) fn span(&self) -> Span {
        self.span
    }
}

/// Parse raw field text up to the next delimiter
fn raw_field<'src>(input: &mut Input<'src>) -> IResult<(&'src str, std::ops::Range<usize>)> {
    take_till(0.., '|').with_span().parse_next(input)
}

/// Parse one or more fields separated by `|`
fn fields<'src>(input: &mut Input<'src>) -> IResult<Vec<(&'src str, std::ops::Range<usize>)>> {
    separated(1.., raw_field, '|').parse_next(input)
}

/// Split `line` on `|` into trimmed fields.
///
/// Every line has at least one field; a line without delimiters is a single
/// field, and consecutive delimiters produce empty fields.
pub(crate) fn split(line: &str) -> Vec<Field<'_>> {
    let mut input = LocatingSlice::new(line);
    match fields.parse_next(&mut input) {
        Ok(raw) => raw
            .into_iter()
            .map(|(text, range)| Field::new(text, range))
            .collect(),
        // Fields accept any text, so this cannot fail; fall back to one field.
        Err(_) => vec![Field::new(line, 0..line.len())],
    }
}
