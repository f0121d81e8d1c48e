//! Build script for storefront crate.
//!
//! Computes a content hash of the client script so the page can reference it
//! with a cache-busting query string.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_script();
}

/// Hash `static/js/storefront.js`.
///
/// Sets `SCRIPT_HASH` environment variable for use with `env!("SCRIPT_HASH")`.
fn hash_script() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let script_path = Path::new(&manifest_dir).join("static/js/storefront.js");

    println!("cargo:rerun-if-changed={}", script_path.display());

    let content = match fs::read(&script_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read storefront.js: {e}");
            println!("cargo:rustc-env=SCRIPT_HASH=dev");
            return;
        }
    };

    // First 8 hex chars of SHA256
    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest);

    println!("cargo:rustc-env=SCRIPT_HASH={short_hash}");
}
