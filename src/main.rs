//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves the crate root on http://127.0.0.1:8000, so the page lives at
//! `/static/` and the default image resolves to `static/faces/1.jpg`.

use std::process::{Command, Stdio};

fn main() {
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); serving existing static/pkg.");
        }
    }

    if !std::path::Path::new("static/faces/1.jpg").exists() {
        eprintln!("static/faces/1.jpg is missing; the page will fail to load its image.");
    }

    println!("Serving at http://127.0.0.1:8000/static/ …");
    let status = Command::new("python3")
        .args(["-m", "http.server", "8000", "--directory", "."])
        .stdout(Stdio::null())
        .status();
    match status {
        Ok(st) if st.success() => {}
        Ok(st) => eprintln!("http server exited with {st}"),
        Err(e) => {
            eprintln!("failed to start http server: {e}");
            std::process::exit(1);
        }
    }
}
