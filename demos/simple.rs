//! Parsing a property spec and reading typed values.
//!
//! Run with: cargo run --example simple

use gestalt::from_str;
use std::error::Error;

const SPEC: &str = r#"
# billing service
service.name = billing
banner = "  welcome  "                 # quotes keep the padding
hosts[] = alpha.internal, \
          beta.internal
limits[:] = cpu:2, memory:4G
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let props = from_str(SPEC)?;

    println!("name:   {}", props.get_string("service.name")?);
    println!("banner: {:?}", props.get_string("banner")?);
    println!("hosts:  {:?}", props.get_list("hosts[]")?);
    for (resource, limit) in props.get_table("limits[:]")? {
        println!("limit:  {} = {}", resource, limit);
    }

    props.verify_must(&["service.name", "hosts[]"])?;
    println!("port:   {}", props.get_string_or("port", "8080"));

    Ok(())
}
