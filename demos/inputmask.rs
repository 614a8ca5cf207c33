//! Rendering a text field with an Inputmask configuration.
//!
//! Run with: RUST_LOG=admin_text_field=debug cargo run --example inputmask

use admin_text_field::{
    encode_with_options, jsopts, placeholder, JsCode, JsOptions, TextField,
};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = jsopts!({
        "mask": "9999-9999",
        "clearIncomplete": true,
        "onincomplete": (JsCode::new("function(){ $(this).addClass('is-invalid'); }")),
        "definitions": {
            "h": { "validator": (JsCode::new("function(c){ return /[0-9a-f]/i.test(c); }")) }
        }
    });

    let mut field = TextField::new("customer.phone", "Phone");
    field
        .value("1234-5678")
        .validation_error("Enter a full phone number")
        .inputmask(&options);

    println!("=== Rendered field ===");
    println!("{}\n", field.render());

    println!("=== Pretty options ===");
    println!("{}\n", encode_with_options(&options, &JsOptions::pretty()));

    // Callbacks written as plain strings, as older configuration files do
    let legacy = jsopts!({
        "mask": "99/99/9999",
        "oncomplete": "function(){ validateDate(this); }"
    });
    println!("=== Legacy detection ===");
    println!("{}\n", encode_with_options(&legacy, &JsOptions::legacy()));

    let prepared = placeholder::prepare(&options);
    println!("=== Placeholders ({}) ===", prepared.len());
    for (marker, source) in prepared.replacements() {
        println!("{} -> {}", marker, source);
    }
    println!("{}", prepared.encode());

    Ok(())
}
