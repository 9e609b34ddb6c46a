use assert_cmd::cargo::cargo_bin_cmd;

fn demo_path(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join(file)
}

/// Columns are padded with spaces; compare cell by cell.
fn cells(stdout: &[u8]) -> Vec<Vec<String>> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .map(|l| l.split_whitespace().map(str::to_string).collect())
        .collect()
}

#[test]
fn inspect_lists_primary_and_included_resources() {
    let document = demo_path("article.document.json");

    let mut cmd = cargo_bin_cmd!("japi");
    cmd.args(["inspect", document.to_str().unwrap()]);

    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(
        cells(&out),
        vec![
            vec!["section", "type", "id", "attributes", "relationships"],
            vec!["data", "articles", "1", "title", "author,comments"],
            vec!["included", "people", "9", "first-name,last-name", "-"],
        ]
    );
}

#[test]
fn inspect_marks_absent_sections() {
    let document = demo_path("people.document.json");

    let mut cmd = cargo_bin_cmd!("japi");
    cmd.args(["inspect", document.to_str().unwrap()]);

    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(
        cells(&out),
        vec![
            vec!["section", "type", "id", "attributes", "relationships"],
            vec!["data", "people", "9", "first-name", "-"],
        ]
    );
}
