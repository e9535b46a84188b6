//! Entry banner for the ski jump engine

fn main() {
    println!("Ski Jump Engine v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Slide and flight calculator for airbag ski jumps.");
    println!("The library is designed to be used from Rust or through the CLI.");
    println!();
    println!("To run a simulation:");
    println!("  skijump-cli simulate --inrun-angle 40 --inrun-length 43 --kicker-angle 30 --kicker-length 11");
    println!();
    println!("To use as a Rust library:");
    println!("  Add to Cargo.toml: skijump-engine = \"0.1\"");
}
