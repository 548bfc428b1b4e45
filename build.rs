// CLASSIFICATION: COMMUNITY
// Filename: build.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

fn main() {
    use std::{env, path::Path};

    println!("cargo:rerun-if-env-changed=IOP_FIRMWARE_DIR");

    if env::var("CARGO_FEATURE_EMBEDDED_FIRMWARE").is_err() {
        return;
    }

    match env::var("IOP_FIRMWARE_DIR") {
        Ok(dir) if Path::new(&dir).is_dir() => {
            println!("cargo:rerun-if-changed={dir}");
        }
        Ok(dir) => {
            println!("cargo:warning=IOP_FIRMWARE_DIR={dir} is not a directory");
        }
        Err(_) => {
            println!("cargo:warning=embedded-firmware enabled but IOP_FIRMWARE_DIR is unset");
        }
    }
}
