//! Layering a local property file over shared defaults.
//!
//! Run with: cargo run --example inherit

use gestalt::from_str;
use std::error::Error;

const DEFAULTS: &str = "
port = 80
hosts[] = shared-a, shared-b
env[:] = region:eu, tier:bronze
";

const LOCAL: &str = "
hosts[] = local, shared-a
env[:] = tier:gold
";

fn main() -> Result<(), Box<dyn Error>> {
    let defaults = from_str(DEFAULTS)?;
    let mut local = from_str(LOCAL)?;

    local.inherit(Some(&defaults));

    println!("port:  {}", local.get_string("port")?);
    println!("hosts: {:?}", local.get_list("hosts[]")?);
    println!("env:   {:?}", local.get_table("env[:]")?);

    let mut overrides = from_str("port = 8080")?;
    overrides.merge(&local, false);
    println!("\nMerged:\n{}", overrides);

    Ok(())
}
