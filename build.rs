use std::error::Error;

/// Stamps the binary with its build time, sent to the donation API with every request.
fn main() -> Result<(), Box<dyn Error>> {
    let build_timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_millis()
        .to_string();
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
