use crate::common::command::{Workspace, run_office_diff, stdout_of, workspace};
use crate::common::file::write_files;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn compare_single_pair_of_files(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    write_files(
        workspace.dir.path(),
        &[
            ("before.xml", b"<list><item>1</item><item>2</item></list>"),
            ("after.xml", b"<list>\n  <item>1</item>\n  <item>3</item>\n</list>\n"),
        ],
    );

    let expected_output = "diff a/before.xml b/after.xml\n\
        --- a/before.xml\n\
        +++ b/after.xml\n\
        @@ -1,4 +1,4 @@\n \
        <list>\n   \
        <item>1</item>\n\
        -  <item>2</item>\n\
        +  <item>3</item>\n \
        </list>\n";
    let actual_output = stdout_of(&mut run_office_diff(
        workspace.dir.path(),
        &["before.xml", "after.xml"],
    ));

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn malformed_single_file_is_fatal(workspace: Workspace) {
    write_files(
        workspace.dir.path(),
        &[("before.xml", b"<a/>"), ("after.xml", b"<a>")],
    );

    run_office_diff(workspace.dir.path(), &["before.xml", "after.xml"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("unclosed element"));
}
