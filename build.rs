use std::env;
use std::fs;
use std::path::PathBuf;

// Emits COMPILED_FEATURES for `staffdb info`.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    let mut features: Vec<String> = env::vars()
        .filter_map(|(k, _)| k.strip_prefix("CARGO_FEATURE_").map(|n| n.to_ascii_lowercase().replace('_', "-")))
        .collect();
    features.sort();
    let list = features.iter().map(|s| format!("{s:?}")).collect::<Vec<_>>().join(", ");
    fs::write(out.join("compiled_features.rs"), format!("pub static COMPILED_FEATURES: &[&str] = &[{list}];\n"))
        .expect("write compiled_features.rs");
}
