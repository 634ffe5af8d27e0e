//! Interactive card entry for `new-deck`

use std::io::{BufRead, Write};

use clnki_core::Deck;

/// Finish entry; the card being typed is discarded
pub const FINISH: &str = ":f";
/// Abort entry; nothing is created
pub const ABORT: &str = ":e";

enum Field {
    Text(String),
    Finish,
    Abort,
}

fn read_field<R: BufRead, W: Write>(label: &str, input: &mut R, out: &mut W) -> std::io::Result<Field> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Field::Finish);
    }
    let line = line.trim_end_matches(['\r', '\n']);
    Ok(match line.trim() {
        FINISH => Field::Finish,
        ABORT => Field::Abort,
        _ => Field::Text(line.to_string()),
    })
}

/// Read front/back pairs until `:f` (or end of input); `None` on `:e`
pub fn enter_cards<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> std::io::Result<Option<Deck>> {
    let mut deck = Deck::new();
    loop {
        writeln!(out, "Card {}", deck.len() + 1)?;
        let front = match read_field("Front", input, out)? {
            Field::Text(text) => text,
            Field::Finish => break,
            Field::Abort => return Ok(None),
        };
        let back = match read_field("Back", input, out)? {
            Field::Text(text) => text,
            Field::Finish => break,
            Field::Abort => return Ok(None),
        };
        deck.add_card(front, back);
    }
    Ok(Some(deck))
}
