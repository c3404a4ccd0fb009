//! Building properties in code and printing them as spec text.
//!
//! Run with: cargo run --example macro

use gestalt::{from_str, properties, to_string};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let props = properties!({
        "service.name": "billing",
        "log.level": "INFO ",
        "hosts[]": ["alpha", "beta"],
        "env[:]": {"region": "eu", "tier": "gold"}
    });

    let text = to_string(&props)?;
    println!("Spec output:\n{}", text);

    let parsed = from_str(&text)?;
    assert_eq!(parsed, props);
    println!("✓ Round-trip successful");

    Ok(())
}
