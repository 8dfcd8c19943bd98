use anyhow::Result;
use labsexpr::chain::{Cell, ChainSink};
use labsexpr::cursor::Cursor;
use labsexpr::flat::{Elem, FlatSexpr};
use labsexpr::parse::{parse_flat, parse_sexpr, Outcome, ParseError, Parsed};
use labsexpr::pos::Pos;
use labsexpr::settings::LABTEXT_SETTINGS;
use labsexpr::value::{Kind, Token};

fn flat(src: &str) -> (FlatSexpr<'_>, Parsed<'_>) {
    let mut sexpr = FlatSexpr::new();
    let parsed = parse_sexpr(Cursor::new(src), &mut sexpr, 0, &LABTEXT_SETTINGS);
    (sexpr, parsed)
}

fn chain(src: &str) -> (Vec<Token<'_>>, Parsed<'_>) {
    let mut head = Cell::sentinel();
    let parsed = parse_sexpr(Cursor::new(src), &mut ChainSink::new(&mut head),
                             0, &LABTEXT_SETTINGS);
    (head.tokens().collect(), parsed)
}

fn kinds(tokens: &[Token]) -> Vec<Kind> {
    tokens.iter().map(|t| t.kind()).collect()
}

#[test]
fn atoms() {
    let (s, p) = flat("(a b c)");
    assert_eq!(p.balance, 0);
    assert_eq!(s.balance(), 0);
    assert_eq!(s.elements(), &[
        Elem { kind: Kind::PushList, index: 0 },
        Elem { kind: Kind::Atom, index: 0 },
        Elem { kind: Kind::Atom, index: 1 },
        Elem { kind: Kind::Atom, index: 2 },
        Elem { kind: Kind::PopList, index: 0 },
    ]);
    assert_eq!(s.strings(), &["a", "b", "c"]);
    let (c, _) = chain("(a b c)");
    assert_eq!(c, s.tokens().collect::<Vec<_>>());
}

#[test]
fn literals_go_to_side_tables() {
    let (s, p) = flat("(1 2.5 \"hi\")");
    assert!(p.is_complete());
    assert_eq!(s.integers(), &[1]);
    assert_eq!(s.floats(), &[2.5]);
    assert_eq!(s.strings(), &["hi"]);
    let (c, _) = chain("(1 2.5 \"hi\")");
    assert_eq!(c, vec![Token::PushList, Token::Integer(1), Token::Float(2.5),
                       Token::String("hi"), Token::PopList]);
}

#[test]
fn nested_lists_only_add_markers() {
    let (s, _) = flat("(a (b c) d)");
    let (c, _) = chain("(a (b c) d)");
    let expected = vec![Kind::PushList, Kind::Atom, Kind::PushList, Kind::Atom,
                        Kind::Atom, Kind::PopList, Kind::Atom, Kind::PopList];
    assert_eq!(s.elements().iter().map(|e| e.kind).collect::<Vec<_>>(), expected);
    assert_eq!(kinds(&c), expected);
    assert_eq!(s.strings(), &["a", "b", "c", "d"]);
}

#[test]
fn comments_are_not_tokens() {
    let (a, _) = flat("(a ; trailing comment\n b)");
    let (b, _) = flat("(a b)");
    assert_eq!(a, b);
}

#[test]
fn unmatched_close_is_malformed() {
    for (s, p) in [flat(")"), flat("  \n)")] {
        assert!(s.is_empty());
        assert_eq!(p.balance, 0);
        match p.outcome {
            Outcome::Malformed(e) => assert_eq!(e.err, ParseError::MissingOpenParen(')')),
            o => panic!("unexpected {:?}", o),
        }
    }
    let (c, p) = chain(")");
    assert!(c.is_empty());
    assert_eq!(p.balance, 0);
}

#[test]
fn missing_close_is_truncated() {
    let mut sexpr = FlatSexpr::with_balance(5);
    let p = parse_sexpr(Cursor::new("(a b"), &mut sexpr, 5, &LABTEXT_SETTINGS);
    assert_eq!(p.balance, 6);
    assert_eq!(sexpr.balance(), 6);
    assert_eq!(p.outcome, Outcome::Truncated { open: Pos { line: 0, col: 0 } });
    let (_, p) = chain("(a b");
    assert_eq!(p.balance, 1);
    assert!(matches!(p.outcome, Outcome::Truncated { .. }));
}

#[test]
fn strict_helpers_report_errors() {
    let e = parse_flat("(ok)\n(a (b", &LABTEXT_SETTINGS).unwrap_err();
    assert_eq!(e.err, ParseError::PrematureEof);
    assert_eq!(e.pos, Pos { line: 1, col: 3 });
    assert_eq!(e.to_string(),
               "premature EOF while expecting closing character ')' for '(' @2.3");
}

#[test]
fn results_borrow_from_the_buffer() -> Result<()> {
    let buf = String::from("(name \"value\")");
    let s = parse_flat(&buf, &LABTEXT_SETTINGS)?;
    let name = s.strings()[0];
    assert_eq!(name, "name");
    assert!(std::ptr::eq(name.as_ptr(), buf[1..].as_ptr()));
    Ok(())
}
