use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_gallery-ll")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "gallery-ll.exe"
            } else {
                "gallery-ll"
            });
            p
        })
}

#[test]
fn cli_simulate_prints_surface_json() {
    let layout = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("page_layout.json");

    let out = std::process::Command::new(exe())
        .args(["simulate", "--frames", "10", "--settle-ms", "2500", "--layout"])
        .arg(&layout)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let surface: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(surface.is_object());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("gallery-title"));
}

#[test]
fn cli_catalog_lists_sample_content() {
    let out = std::process::Command::new(exe())
        .arg("catalog")
        .output()
        .unwrap();
    assert!(out.status.success());

    let catalog: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(catalog["artworks"].as_array().map(Vec::len), Some(6));
    assert_eq!(catalog["messages"].as_array().map(Vec::len), Some(5));
    assert!(catalog["profile"].is_object());
}

#[test]
fn cli_simulate_rejects_missing_layout() {
    let status = std::process::Command::new(exe())
        .args(["simulate", "--layout", "does/not/exist.json"])
        .status()
        .unwrap();
    assert!(!status.success());
}
