use crate::common::command::{Workspace, run_office_diff, workspace};
use crate::common::file::write_files;
use fake::Fake;
use fake::faker::lorem::en::Words;
use rstest::rstest;

#[rstest]
fn compare_files_byte_for_byte(workspace: Workspace) {
    let content = Words(50..100).fake::<Vec<String>>().join(" ");
    let longer = format!("{content}!");
    write_files(
        workspace.dir.path(),
        &[
            ("a.bin", content.as_bytes()),
            ("b.bin", content.as_bytes()),
            ("c.bin", longer.as_bytes()),
        ],
    );

    run_office_diff(workspace.dir.path(), &["cmp", "a.bin", "b.bin"])
        .assert()
        .success()
        .stdout("");
    run_office_diff(workspace.dir.path(), &["cmp", "a.bin", "c.bin"])
        .assert()
        .code(1)
        .stdout("");
    run_office_diff(workspace.dir.path(), &["cmp", "c.bin", "a.bin"])
        .assert()
        .code(1);
}

#[rstest]
fn whitespace_only_xml_changes_still_differ_byte_for_byte(workspace: Workspace) {
    write_files(
        workspace.dir.path(),
        &[("a.xml", b"<a/>"), ("b.xml", b"<a></a>")],
    );

    run_office_diff(workspace.dir.path(), &["cmp", "a.xml", "b.xml"])
        .assert()
        .code(1);
}

#[rstest]
fn missing_operand_is_an_error(workspace: Workspace) {
    write_files(workspace.dir.path(), &[("a.bin", b"a")]);

    run_office_diff(workspace.dir.path(), &["cmp", "a.bin", "missing.bin"])
        .assert()
        .code(2);
}
