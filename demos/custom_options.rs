//! Choosing the table suffix convention and the error policy.
//!
//! Run with: cargo run --example custom_options

use gestalt::{from_str, from_str_with_options, SpecOptions, TableSuffix};
use std::error::Error;

const LEGACY: &str = "
a map[] = a:1, b:2
hosts[] = x, y
this line is broken
";

fn main() -> Result<(), Box<dyn Error>> {
    // Default: `[:]` tables and fail-fast parsing.
    match from_str(LEGACY) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("strict parse failed: {}", e),
    }

    // `map[]` tables, skipping the malformed line.
    let options = SpecOptions::lenient().with_table_suffix(TableSuffix::Map);
    let props = from_str_with_options(LEGACY, &options)?;
    println!("a map[] => {:?}", props.get_table("a map[]")?);
    println!("hosts[] => {:?}", props.get_list("hosts[]")?);

    Ok(())
}
