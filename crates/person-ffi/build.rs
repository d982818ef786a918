//! Regenerates `include/person.h` when the `headers` feature is enabled.
//!
//! Without the feature the checked-in header is used as is.

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    #[cfg(feature = "headers")]
    generate_header();
}

#[cfg(feature = "headers")]
fn generate_header() {
    use std::env;
    use std::path::PathBuf;

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {e}");
            return;
        }
    };

    let config = match cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(config) => config,
        Err(e) => {
            println!("cargo:warning=failed to read cbindgen.toml: {e}");
            return;
        }
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(crate_dir.join("include").join("person.h"));
        }
        Err(e) => println!("cargo:warning=header generation failed: {e}"),
    }
}
