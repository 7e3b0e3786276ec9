// Shared build script helper that turns a crate README into its rustdoc front page.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Copy `README.md` into `OUT_DIR/README_GENERATED.md` with links rewritten for rustdoc.
///
/// - `](src/foo.rs)` becomes `](foo)` so intra-doc links resolve to modules
/// - `](../../README.md` becomes the workspace repository URL
///
/// A crate without a README gets an empty page so `include_str!` still resolves.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let readme = fs::read_to_string(Path::new(crate_dir).join("README.md")).unwrap_or_default();

    let mut page = readme.replace("](src/", "](").replace(".rs)", ")");
    if let Some(url) = workspace_repository_url(crate_dir) {
        page = page.replace("](../../README.md", &format!("]({url}"));
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(Path::new(&out_dir).join("README_GENERATED.md"), page).unwrap();
}

/// Read `repository = "..."` from the workspace manifest two levels up.
fn workspace_repository_url(crate_dir: &str) -> Option<String> {
    let manifest = Path::new(crate_dir).parent()?.parent()?.join("Cargo.toml");
    let content = fs::read_to_string(manifest).ok()?;

    content.lines().map(str::trim).find_map(|line| {
        let value = line.strip_prefix("repository")?.trim_start().strip_prefix('=')?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}
