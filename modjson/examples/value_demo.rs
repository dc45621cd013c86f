// SPDX-License-Identifier: Apache-2.0

//! Parses two documents, merges one into the other, and dumps the result.

use modjson::{dump, parse, Error, JsonValue};

fn main() -> Result<(), Error> {
    let base = parse(r#"{"host":"example.com","port":80,"tls":{"enabled":false}}"#)?;
    let overlay = parse(r#"{"port":8443,"tls":{"enabled":true,"cert":"/etc/cert.pem"}}"#)?;

    println!("base:    {}", dump(&base));
    println!("overlay: {}", dump(&overlay));

    // clones share storage until written, so keeping the original is free
    let mut merged = base.clone();
    merged.merge(&overlay);

    println!("merged:  {}", dump(&merged));
    println!("base is untouched: {}", dump(&base));

    if let Some(port) = merged.as_object().and_then(|o| o.get("port")) {
        println!("port coerces to integer {}", port.to_integer());
    }

    let roundtrip = parse(dump(&merged).as_bytes())?;
    assert_eq!(roundtrip, merged);
    println!("round trip holds: {}", roundtrip == merged);
    Ok(())
}
