// Copies static assets to `dist/`, running wasm-pack first when building
// for the browser.
use std::env;
use std::path::Path;
use std::process::Command;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");
    println!("cargo:rerun-if-changed=assets");

    let target = env::var("TARGET").unwrap_or_default();
    if target == "wasm32-unknown-unknown" {
        match Command::new("wasm-pack").args(["build", "--release", "--target", "web"]).status() {
            Ok(st) if st.success() => {}
            Ok(_) => println!("cargo:warning=wasm-pack build failed"),
            Err(_) => println!("cargo:warning=wasm-pack not installed, skipping"),
        }
    }

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }
    let out_dir = Path::new("dist");
    if out_dir.exists() {
        if let Err(e) = fs_extra::dir::remove(out_dir) {
            println!("cargo:warning=could not clear dist/: {e}");
        }
    }
    if let Err(e) = fs_extra::dir::create_all(out_dir, false) {
        println!("cargo:warning=could not create dist/: {e}");
        return;
    }
    let options = CopyOptions { content_only: true, overwrite: true, ..CopyOptions::new() };
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ failed: {e}");
    }
}
