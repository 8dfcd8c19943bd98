use anyhow::Result;
use labsexpr::chain::Cell;
use labsexpr::parse::parse_chain;
use labsexpr::read::{read_all, write_all};
use labsexpr::settings::LABTEXT_SETTINGS;

const INPUT: &[u8] = include_bytes!("t-input.sexpr");
const EXPECTED: &[u8] = include_bytes!("t-expected.sexpr");

#[test]
fn t1() -> Result<()> {
    let sexpr = read_all(INPUT, &LABTEXT_SETTINGS)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, sexpr.tokens())?;
    assert_eq!(out, EXPECTED);
    Ok(())
}

#[test]
fn t1_chain() -> Result<()> {
    let input = std::str::from_utf8(INPUT)?;
    let mut head = Cell::sentinel();
    parse_chain(input, &mut head, &LABTEXT_SETTINGS)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, head.tokens())?;
    assert_eq!(out, EXPECTED);
    Ok(())
}
