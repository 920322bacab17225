use std::error::Error;

use qrforge::{generate, ECLevel, MaskSelection, Mode, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Set RUST_LOG=debug to follow each generation stage
    env_logger::init();

    // Simplest usage - provide only data, all other settings are automatically chosen
    let symbol = QRBuilder::new("Hello, World!").build()?;
    println!("{}", symbol.metadata());
    println!("{symbol}");

    // One call with explicit settings
    let symbol = generate("HELLO WORLD", Mode::Alphanumeric, ECLevel::Q, MaskSelection::Auto)?;
    let pen = symbol.penalty();
    println!("{} with penalty {} ({pen:?})", symbol.metadata(), pen.total());
    println!("{symbol}");

    Ok(())
}
