use std::path::{Path, PathBuf};

pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

pub fn read_demo(name: &str) -> String {
    let path = workspace_root().join("demos").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("failed to read demos/{name} at {}: {e}", path.display())
    })
}
