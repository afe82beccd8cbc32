use crate::common::command::{Workspace, stdout_of, workspace};
use predicates::prelude::predicate;
use rstest::{fixture, rstest};

#[fixture]
fn broken_workspace(workspace: Workspace) -> Workspace {
    workspace.write_source(&[("broken.xml", b"<a><b></a>"), ("fine.xml", b"<a/>")]);
    workspace.write_target(&[("broken.xml", b"<a/>"), ("fine.xml", b"<b/>")]);
    workspace
}

#[rstest]
fn skip_malformed_files_by_default(broken_workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    let expected_output = "diff a/fine.xml b/fine.xml\n--- a/fine.xml\n+++ b/fine.xml\n@@ -1 +1 @@\n-<a/>\n+<b/>\n";
    let actual_output = stdout_of(&mut broken_workspace.diff(&[]));

    pretty_assertions::assert_eq!(actual_output, expected_output);
    broken_workspace
        .diff(&[])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("skipping file"));

    Ok(())
}

#[rstest]
fn warn_when_only_skipped_files_differ(workspace: Workspace) {
    workspace.write_source(&[("broken.xml", b"<a><b></a>"), ("fine.xml", b"<a/>")]);
    workspace.write_target(&[("broken.xml", b"<a/>"), ("fine.xml", b"<a></a>")]);

    workspace
        .diff(&[])
        .assert()
        .code(0)
        .stdout("files are equal\n")
        .stderr(predicate::str::contains("skipping file"))
        .stderr(predicate::str::contains("some files could not be compared"));
}

#[rstest]
fn fail_on_malformed_files_when_strict(broken_workspace: Workspace) {
    broken_workspace
        .diff(&["--strict"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("failed to canonicalize"))
        .stderr(predicate::str::contains("broken.xml"));
}

#[rstest]
fn missing_tree_is_fatal(workspace: Workspace) {
    let mut cmd = crate::common::command::run_office_diff(workspace.dir.path(), &["source", "nowhere"]);

    cmd.assert().code(2).stdout("");
}
