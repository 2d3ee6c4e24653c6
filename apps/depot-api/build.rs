//! Build script for compiling Protocol Buffer definitions.
//!
//! The generated code is placed in `$OUT_DIR` and included via
//! `tonic::include_proto!` in `src/proto.rs`.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=../../proto/depot_inventory.proto");
    println!("cargo:rerun-if-changed=../../proto");

    // Server only; clients are generated by consumers from the same proto.
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile_protos(&["../../proto/depot_inventory.proto"], &["../../proto"])?;

    Ok(())
}
