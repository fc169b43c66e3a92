// Copies the static site (page, shaders, assets, wasm pkg) into `dist/static/`,
// so `dist/` serves the same URLs as the crate root (`/static/faces/1.jpg`).
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir).ok();
    }
    if let Err(e) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=unable to create dist/: {e}");
        return;
    }

    let options = CopyOptions::new().overwrite(true);
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/static/ failed: {e}");
    }
}
