use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/disease_markers.txt");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the marker catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let marker_count = count_marker_lines(&catalog_contents);

    assert!(
        marker_count > 0,
        "\n\nCATALOG BUILD ERROR: No markers found\n\
         Path: {}\n\
         Hint: every marker line needs exactly two tokens: <disease-name> <marker-pattern>\n",
        catalog_path.display()
    );

    println!("cargo:warning=Validated marker catalog: {marker_count} markers");
}

fn count_marker_lines(contents: &str) -> usize {
    let mut count = 0;

    for (i, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() == 2 {
            count += 1;
        } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
            println!(
                "cargo:warning=Marker catalog line {} ignored: expected 2 tokens, found {}",
                i + 1,
                tokens.len()
            );
        }
    }

    count
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/disease_markers.txt");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
