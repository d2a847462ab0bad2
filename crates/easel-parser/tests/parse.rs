use std::io::Write;

use float_cmp::approx_eq;
use proptest::prelude::*;

use easel_core::{
    command::{Command, Frame, Link, Print, SetVar, Shape, Sleep, Sticky, Text},
    geometry::{Point, Size},
};
use easel_parser::{InstructionParser, error::ErrorCode};

#[test]
fn test_documented_example_file() {
    let source = "\
SET|W|200
SHAPE|Box1|0|0|$W|100|#4169E1|rectangle
SHAPE|Box2|300|0|$W|100
LINK|Box1|Box2|flows to
STICKY|Hello|0|200
";

    let mut parser = InstructionParser::new();
    let commands = parser.parse_strict(source).expect("Failed to parse");

    assert_eq!(
        commands,
        vec![
            Command::SetVar(SetVar::new("W", "200")),
            Command::Shape(Shape::new(
                "Box1",
                Point::new(0.0, 0.0),
                Size::new(200.0, 100.0)
            )),
            Command::Shape(Shape::new(
                "Box2",
                Point::new(300.0, 0.0),
                Size::new(200.0, 100.0)
            )),
            Command::Link(Link::new("Box1", "Box2").with_label("flows to")),
            Command::Sticky(Sticky::new("Hello", Point::new(0.0, 200.0))),
        ]
    );
}

#[test]
fn test_every_kind_with_all_fields() {
    let source = "\
FRAME|Stage 1|-10.5|20|800|600
SHAPE|Db|1|2|3|4|#FF0000|circle
STICKY|todo|5|6|#E0E0E0
TEXT|Title|7|8|32
LINK|Db|Api|reads
SLEEP|0.25
PRINT|done
";
    let mut parser = InstructionParser::new();
    let commands = parser.parse_strict(source).expect("Failed to parse");

    assert_eq!(
        commands,
        vec![
            Command::Frame(Frame::new(
                "Stage 1",
                Point::new(-10.5, 20.0),
                Size::new(800.0, 600.0)
            )),
            Command::Shape(
                Shape::new("Db", Point::new(1.0, 2.0), Size::new(3.0, 4.0))
                    .with_color("#FF0000")
                    .with_shape("circle")
            ),
            Command::Sticky(Sticky::new("todo", Point::new(5.0, 6.0)).with_color("#E0E0E0")),
            Command::Text(Text::new("Title", Point::new(7.0, 8.0)).with_font_size("32")),
            Command::Link(Link::new("Db", "Api").with_label("reads")),
            Command::Sleep(Sleep::new(std::time::Duration::from_millis(250))),
            Command::Print(Print::new("done")),
        ]
    );
}

#[test]
fn test_defaults_for_omitted_optional_fields() {
    let mut parser = InstructionParser::new();

    let Some(Command::Text(text)) = parser.parse_line("TEXT|hi|0|0").unwrap() else {
        panic!("Expected text");
    };
    assert_eq!(text.font_size(), "14");

    let Some(Command::Link(link)) = parser.parse_line("LINK|a|b").unwrap() else {
        panic!("Expected link");
    };
    assert_eq!(link.label(), "");

    let Some(Command::Sticky(sticky)) = parser.parse_line("sticky|x|1|1").unwrap() else {
        panic!("Expected sticky");
    };
    assert_eq!(sticky.color(), "#FFFF99");
}

#[test]
fn test_malformed_lines_never_produce_commands() {
    let cases = [
        ("BOX|a|1|2", ErrorCode::E100),
        ("|a|b", ErrorCode::E100),
        ("FRAME|t|0|0|100", ErrorCode::E101),
        ("SHAPE|a|0|0|10", ErrorCode::E101),
        ("STICKY|a|0", ErrorCode::E101),
        ("TEXT|a", ErrorCode::E101),
        ("LINK|a", ErrorCode::E101),
        ("SLEEP", ErrorCode::E101),
        ("PRINT", ErrorCode::E101),
        ("SET|x", ErrorCode::E101),
        ("SHAPE|a|zero|0|10|10", ErrorCode::E102),
        ("SLEEP|soon", ErrorCode::E102),
        ("SET||1", ErrorCode::E103),
    ];

    let mut parser = InstructionParser::new();
    for (line, code) in cases {
        let err = parser
            .parse_line(line)
            .expect_err(&format!("Expected `{line}` to be rejected"));
        assert_eq!(err.code(), Some(code), "wrong code for `{line}`");
    }
}

#[test]
fn test_blank_and_comment_lines_are_skipped() {
    let mut parser = InstructionParser::new();
    for line in ["", "   ", "\t", "# comment", "   #indented comment"] {
        assert_eq!(parser.parse_line(line), Ok(None), "`{line}`");
    }
}

#[test]
fn test_set_redefinition_applies_from_that_line_on() {
    let source = "\
SET|x|1
PRINT|$x
SET|x|2
PRINT|$x
";
    let mut parser = InstructionParser::new();
    let commands = parser.parse_strict(source).expect("Failed to parse");

    assert_eq!(commands[1], Command::Print(Print::new("1")));
    assert_eq!(commands[3], Command::Print(Print::new("2")));
    assert_eq!(parser.variables().get("x"), Some("2"));
    assert_eq!(parser.variables().len(), 1);
}

#[test]
fn test_variables_do_not_apply_retroactively() {
    let source = "\
PRINT|$later
SET|later|now
PRINT|$later
";
    let mut parser = InstructionParser::new();
    let commands = parser.parse_strict(source).expect("Failed to parse");

    assert_eq!(commands[0], Command::Print(Print::new("$later")));
    assert_eq!(commands[2], Command::Print(Print::new("now")));
}

#[test]
fn test_variables_persist_across_sources() {
    let mut parser = InstructionParser::new();
    parser.parse_source("SET|gap|40");
    let instructions = parser.parse_source("FRAME|F|$gap|$gap|10|10");

    let Command::Frame(frame) = &instructions.commands()[0] else {
        panic!("Expected frame");
    };
    assert!(approx_eq!(f64, frame.position().x(), 40.0));
    assert!(approx_eq!(f64, frame.position().y(), 40.0));
}

#[test]
fn test_escape_expansion() {
    let mut parser = InstructionParser::new();

    let Some(Command::Sticky(sticky)) = parser.parse_line(r"STICKY|line one\nline two|0|0").unwrap()
    else {
        panic!("Expected sticky");
    };
    assert_eq!(sticky.text(), "line one\nline two");
}

#[test]
fn test_escape_in_variable_value_is_expanded() {
    let mut parser = InstructionParser::new();
    parser.parse_line(r"SET|title|A\nB").unwrap();

    let Some(Command::Text(text)) = parser.parse_line("TEXT|$title|0|0").unwrap() else {
        panic!("Expected text");
    };
    assert_eq!(text.content(), "A\nB");
}

#[test]
fn test_literal_newline_is_kept_as_is() {
    let mut parser = InstructionParser::new();

    let command = parser.parse_line("PRINT|a\nb").unwrap();

    assert_eq!(command, Some(Command::Print(Print::new("a\nb"))));
}

#[test]
fn test_trailing_escape_is_trimmed_with_its_field() {
    let mut parser = InstructionParser::new();

    let Some(Command::Sticky(sticky)) = parser.parse_line(r"STICKY|a\n|0|0").unwrap() else {
        panic!("Expected sticky");
    };
    assert_eq!(sticky.text(), "a");
}

#[test]
fn test_parse_source_continues_after_rejected_lines() {
    let source = "\
SHAPE|A|0|0|10|10
WIBBLE|x
SHAPE|B|0|zero|10|10
LINK|A|B
";
    let mut parser = InstructionParser::new();
    let instructions = parser.parse_source(source);

    assert_eq!(instructions.len(), 2);
    assert!(matches!(instructions.commands()[0], Command::Shape(_)));
    assert!(matches!(instructions.commands()[1], Command::Link(_)));

    let lines: Vec<usize> = instructions.rejected().iter().map(|r| r.line()).collect();
    assert_eq!(lines, vec![2, 3]);
    assert_eq!(instructions.rejected()[1].source(), "SHAPE|B|0|zero|10|10");
}

#[test]
fn test_rejected_line_source_is_expanded_text() {
    let mut parser = InstructionParser::new();
    let instructions = parser.parse_source("SET|w|wide\nSHAPE|A|0|0|$w|10");

    let rejected = &instructions.rejected()[0];
    assert_eq!(rejected.source(), "SHAPE|A|0|0|wide|10");

    let span = rejected.diagnostic().labels()[0].span();
    assert_eq!(&rejected.source()[span.start()..span.end()], "wide");
}

#[test]
fn test_parse_strict_reports_all_rejected_lines() {
    let mut parser = InstructionParser::new();
    let err = parser
        .parse_strict("NOPE\nPRINT|ok\nFRAME|x")
        .expect_err("Expected strict parse to fail");

    assert_eq!(err.rejected().len(), 2);
    assert!(err.to_string().starts_with("line 1: error[E100]"));
}

#[test]
fn test_crlf_and_bom_are_tolerated() {
    let mut parser = InstructionParser::new();
    let commands = parser
        .parse_strict("\u{feff}PRINT|one\r\nPRINT|two\r\n")
        .expect("Failed to parse");

    assert_eq!(
        commands,
        vec![
            Command::Print(Print::new("one")),
            Command::Print(Print::new("two")),
        ]
    );
}

#[test]
fn test_parse_file_reads_lines_in_order() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "SHAPE|A|0|0|10|10").unwrap();
    writeln!(file, "# comment").unwrap();
    writeln!(file, "SHAPE|B|20|0|10|10").unwrap();
    writeln!(file, "LINK|A|B").unwrap();

    let mut parser = InstructionParser::new();
    let instructions = parser.parse_file(file.path());

    let kinds: Vec<_> = instructions
        .commands()
        .iter()
        .map(|c| c.kind().keyword())
        .collect();
    assert_eq!(kinds, vec!["SHAPE", "SHAPE", "LINK"]);
}

#[test]
fn test_unreadable_file_yields_no_instructions() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.txt");

    let mut parser = InstructionParser::new();
    assert!(parser.parse_file(&missing).is_empty());

    let err = parser.load_file(&missing).expect_err("Expected load to fail");
    assert_eq!(err.path(), missing.as_path());
}

#[test]
fn test_non_utf8_file_yields_no_instructions() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(&[0x50, 0x52, 0xff, 0xfe, 0x0a]).unwrap();

    let mut parser = InstructionParser::new();
    assert!(parser.parse_file(file.path()).is_empty());
}

proptest! {
    #[test]
    fn prop_comment_lines_are_skipped(body in "[^\r\n]*") {
        let mut parser = InstructionParser::new();
        let line = format!("#{body}");
        prop_assert_eq!(parser.parse_line(&line), Ok(None));
    }

    #[test]
    fn prop_finite_coordinates_are_recovered(x in -1.0e9f64..1.0e9, y in -1.0e9f64..1.0e9) {
        let mut parser = InstructionParser::new();
        let line = format!("STICKY|note|{x}|{y}");
        let Some(Command::Sticky(sticky)) = parser.parse_line(&line).unwrap() else {
            panic!("Expected sticky");
        };
        prop_assert_eq!(sticky.position(), Point::new(x, y));
    }

    #[test]
    fn prop_print_message_is_trimmed_field(message in "[^|$\\\\\r\n]*") {
        let mut parser = InstructionParser::new();
        let line = format!("PRINT|{message}");
        let Some(Command::Print(print)) = parser.parse_line(&line).unwrap() else {
            panic!("Expected print");
        };
        prop_assert_eq!(print.message(), message.trim());
    }
}
