use crate::common::command::{Workspace, workspace};
use rstest::rstest;

#[rstest]
fn write_report_to_output_file(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    workspace.write_source(&[("a.xml", b"<a/>")]);
    workspace.write_target(&[("a.xml", b"<b/>")]);

    workspace
        .diff(&["--output", "result.diff"])
        .assert()
        .code(1)
        .stdout("");

    let report = std::fs::read_to_string(workspace.path("result.diff"))?;
    pretty_assertions::assert_eq!(
        report,
        "diff a/a.xml b/a.xml\n--- a/a.xml\n+++ b/a.xml\n@@ -1 +1 @@\n-<a/>\n+<b/>\n"
    );

    Ok(())
}

#[rstest]
fn equal_trees_write_no_output_file(workspace: Workspace) {
    workspace.write_source(&[("a.xml", b"<a></a>")]);
    workspace.write_target(&[("a.xml", b"<a/>")]);

    workspace
        .diff(&["--output", "result.diff"])
        .assert()
        .success()
        .stdout("files are equal\n");

    assert!(!workspace.path("result.diff").exists());
}
