// SPDX-License-Identifier: Apache-2.0

//! Walks a document with the raw tokenizer and prints every event.

use modjson::{Error, Event, TokenOptions, Tokenizer};

fn main() -> Result<(), Error> {
    let text = r#"
        {
            "name": "sensor-7",
            "online": true,
            "readings": [20.5, 21, 19.75],
            "meta": {"site": "north", "tags": []}
        }"#;

    println!("tokenizing: {}", text.trim());
    println!();

    let mut tok = Tokenizer::new(TokenOptions::default());
    let mut sink = |depth: usize, event: Event<'_>| {
        let indent = "  ".repeat(depth);
        match event {
            Event::ObjectBegin => println!("{indent}object {{"),
            Event::ObjectEnd => println!("{indent}}}"),
            Event::ArrayBegin => println!("{indent}array ["),
            Event::ArrayEnd => println!("{indent}]"),
            Event::Field(key) => println!("{indent}key: {}", String::from_utf8_lossy(key)),
            Event::String(s) => println!("{indent}string: {}", String::from_utf8_lossy(s)),
            Event::Null => println!("{indent}null"),
            Event::Boolean(b) => println!("{indent}boolean: {b}"),
            Event::Integer(n) => println!("{indent}integer: {n}"),
            Event::Float(f) => println!("{indent}float: {f}"),
        }
        true
    };
    tok.parse(text, &mut sink)?;

    println!();
    println!(
        "done; ceilings were {} objects / {} arrays",
        tok.max_object_depth(),
        tok.max_array_depth()
    );
    Ok(())
}
