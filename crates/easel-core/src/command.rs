//! The board instruction model.
//!
//! A [`Command`] is one well-formed instruction, produced by the parser and
//! consumed by the executor. Each variant wraps a small payload struct so
//! that the board client can take exactly the data it needs by reference.
//!
//! Commands are immutable once built. Optional fields are filled with the
//! documented defaults at construction time ([`DEFAULT_SHAPE_COLOR`] and
//! friends), so a command never carries "missing" values.

use std::{fmt, str::FromStr, time::Duration};

use thiserror::Error;

use crate::geometry::{Point, Size};

/// Fill color of a shape when the instruction omits one.
pub const DEFAULT_SHAPE_COLOR: &str = "#4169E1";
/// Geometry of a shape when the instruction omits one.
pub const DEFAULT_SHAPE_KIND: &str = "rectangle";
/// Fill color of a sticky note when the instruction omits one.
pub const DEFAULT_STICKY_COLOR: &str = "#FFFF99";
/// Font size of a text item when the instruction omits one.
pub const DEFAULT_TEXT_SIZE: &str = "14";

/// Instruction keywords, one per [`Command`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Set,
    Frame,
    Shape,
    Sticky,
    Text,
    Link,
    Sleep,
    Print,
}

impl CommandKind {
    /// Every kind, in the order they are documented.
    pub const ALL: [CommandKind; 8] = [
        CommandKind::Set,
        CommandKind::Frame,
        CommandKind::Shape,
        CommandKind::Sticky,
        CommandKind::Text,
        CommandKind::Link,
        CommandKind::Sleep,
        CommandKind::Print,
    ];

    /// The upper-case keyword that introduces this kind in an instruction file.
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Set => "SET",
            CommandKind::Frame => "FRAME",
            CommandKind::Shape => "SHAPE",
            CommandKind::Sticky => "STICKY",
            CommandKind::Text => "TEXT",
            CommandKind::Link => "LINK",
            CommandKind::Sleep => "SLEEP",
            CommandKind::Print => "PRINT",
        }
    }

    /// Names of the required fields following the keyword, in order.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            CommandKind::Set => &["name", "value"],
            CommandKind::Frame => &["title", "x", "y", "width", "height"],
            CommandKind::Shape => &["name", "x", "y", "width", "height"],
            CommandKind::Sticky => &["text", "x", "y"],
            CommandKind::Text => &["content", "x", "y"],
            CommandKind::Link => &["start", "end"],
            CommandKind::Sleep => &["seconds"],
            CommandKind::Print => &["message"],
        }
    }

    /// Names of the optional trailing fields, in order.
    pub fn optional_fields(self) -> &'static [&'static str] {
        match self {
            CommandKind::Shape => &["color", "shape"],
            CommandKind::Sticky => &["color"],
            CommandKind::Text => &["size"],
            CommandKind::Link => &["label"],
            _ => &[],
        }
    }

    /// A one-line usage string, e.g. `LINK|start|end[|label]`.
    pub fn usage(self) -> String {
        let mut usage = self.keyword().to_string();
        for field in self.required_fields() {
            usage.push('|');
            usage.push_str(field);
        }
        for field in self.optional_fields() {
            usage.push_str("[|");
            usage.push_str(field);
            usage.push(']');
        }
        usage
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A keyword that does not name any [`CommandKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command `{0}`")]
pub struct UnknownCommand(pub String);

impl FromStr for CommandKind {
    type Err = UnknownCommand;

    /// Keywords are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == upper)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// The kinds of item a run creates on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Frame,
    Shape,
    Sticky,
    Connector,
    Text,
}

impl ElementKind {
    /// Singular, lower-case display name.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Frame => "frame",
            ElementKind::Shape => "shape",
            ElementKind::Sticky => "sticky note",
            ElementKind::Connector => "connector",
            ElementKind::Text => "text",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A titled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    title: String,
    position: Point,
    size: Size,
}

impl Frame {
    pub fn new(title: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            title: title.into(),
            position,
            size,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// A named shape. Shapes are the only items connectors can reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    name: String,
    position: Point,
    size: Size,
    color: String,
    shape: String,
}

impl Shape {
    /// Create a shape with the default color and geometry.
    pub fn new(name: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            color: DEFAULT_SHAPE_COLOR.to_string(),
            shape: DEFAULT_SHAPE_KIND.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = shape.into();
        self
    }

    /// The user-chosen name, also the text rendered inside the shape.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// The service-side geometry name (`rectangle`, `circle`, ...).
    pub fn shape(&self) -> &str {
        &self.shape
    }
}

/// A sticky note.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticky {
    text: String,
    position: Point,
    color: String,
}

impl Sticky {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            text: text.into(),
            position,
            color: DEFAULT_STICKY_COLOR.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// A free-standing text item.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    position: Point,
    font_size: String,
}

impl Text {
    pub fn new(content: impl Into<String>, position: Point) -> Self {
        Self {
            content: content.into(),
            position,
            font_size: DEFAULT_TEXT_SIZE.to_string(),
        }
    }

    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = font_size.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Kept as text; the service accepts the size as a string.
    pub fn font_size(&self) -> &str {
        &self.font_size
    }
}

/// A connector between two previously created shapes, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    start: String,
    end: String,
    label: String,
}

impl Link {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Caption text; empty when the connector has no caption.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A wall-clock pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sleep {
    duration: Duration,
}

impl Sleep {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// A message for the run's output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Print {
    message: String,
}

impl Print {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A variable definition. Applied while parsing; a no-op when executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVar {
    name: String,
    value: String,
}

impl SetVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One parsed, well-formed instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Frame(Frame),
    Shape(Shape),
    Sticky(Sticky),
    Text(Text),
    Link(Link),
    Sleep(Sleep),
    Print(Print),
    SetVar(SetVar),
}

impl Command {
    /// The keyword kind this command was parsed from.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Frame(_) => CommandKind::Frame,
            Command::Shape(_) => CommandKind::Shape,
            Command::Sticky(_) => CommandKind::Sticky,
            Command::Text(_) => CommandKind::Text,
            Command::Link(_) => CommandKind::Link,
            Command::Sleep(_) => CommandKind::Sleep,
            Command::Print(_) => CommandKind::Print,
            Command::SetVar(_) => CommandKind::Set,
        }
    }

    /// The kind of board item this command creates, if any.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            Command::Frame(_) => Some(ElementKind::Frame),
            Command::Shape(_) => Some(ElementKind::Shape),
            Command::Sticky(_) => Some(ElementKind::Sticky),
            Command::Text(_) => Some(ElementKind::Text),
            Command::Link(_) => Some(ElementKind::Connector),
            Command::Sleep(_) | Command::Print(_) | Command::SetVar(_) => None,
        }
    }
}

impl fmt::Display for Command {
    /// A short human-readable description used in run notifications.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Frame(frame) => write!(f, "frame '{}'", frame.title()),
            Command::Shape(shape) => write!(f, "shape '{}'", shape.name()),
            Command::Sticky(_) => write!(f, "sticky note"),
            Command::Text(_) => write!(f, "text"),
            Command::Link(link) => write!(f, "link '{}' -> '{}'", link.start(), link.end()),
            Command::Sleep(sleep) => write!(f, "sleep {:?}", sleep.duration()),
            Command::Print(_) => write!(f, "print"),
            Command::SetVar(set) => write!(f, "set ${}", set.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kind_from_str_case_insensitive() {
        assert_eq!("shape".parse::<CommandKind>(), Ok(CommandKind::Shape));
        assert_eq!("Link".parse::<CommandKind>(), Ok(CommandKind::Link));
        assert_eq!("SET".parse::<CommandKind>(), Ok(CommandKind::Set));
    }

    #[test]
    fn test_command_kind_unknown() {
        let err = "CIRCLE".parse::<CommandKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command `CIRCLE`");
    }

    #[test]
    fn test_command_kind_usage() {
        assert_eq!(CommandKind::Link.usage(), "LINK|start|end[|label]");
        assert_eq!(
            CommandKind::Shape.usage(),
            "SHAPE|name|x|y|width|height[|color][|shape]"
        );
        assert_eq!(CommandKind::Print.usage(), "PRINT|message");
    }

    #[test]
    fn test_shape_defaults() {
        let shape = Shape::new("Box", Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert_eq!(shape.color(), DEFAULT_SHAPE_COLOR);
        assert_eq!(shape.shape(), DEFAULT_SHAPE_KIND);
    }

    #[test]
    fn test_sticky_and_text_defaults() {
        let sticky = Sticky::new("note", Point::default());
        assert_eq!(sticky.color(), "#FFFF99");

        let text = Text::new("hello", Point::default());
        assert_eq!(text.font_size(), "14");

        let link = Link::new("a", "b");
        assert_eq!(link.label(), "");
    }

    #[test]
    fn test_element_kind_mapping() {
        let link = Command::Link(Link::new("a", "b"));
        assert_eq!(link.element_kind(), Some(ElementKind::Connector));
        assert_eq!(link.kind(), CommandKind::Link);

        let print = Command::Print(Print::new("hi"));
        assert_eq!(print.element_kind(), None);
    }

    #[test]
    fn test_command_display() {
        let link = Command::Link(Link::new("A", "B").with_label("flows"));
        assert_eq!(link.to_string(), "link 'A' -> 'B'");
    }
}
