use crate::common::command::{Workspace, document_files, run_office_diff, stdout_of, workspace};
use crate::common::file::{FileSpec, write_zip};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn compare_office_archives(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    let files = document_files();
    let entries = files.iter().map(FileSpec::as_entry).collect::<Vec<_>>();
    write_zip(&workspace.path("before.docx"), &entries);

    let mut changed = files.clone();
    changed[2].content = changed[2].content.replace("Hello", "Goodbye");
    let changed_entries = changed.iter().map(FileSpec::as_entry).collect::<Vec<_>>();
    write_zip(&workspace.path("after.docx"), &changed_entries);

    let expected_output = "diff a/word/document.xml b/word/document.xml\n\
        --- a/word/document.xml\n\
        +++ b/word/document.xml\n\
        @@ -2,7 +2,7 @@\n   \
        <w:body>\n     \
        <w:p>\n       \
        <w:r>\n\
        -        <w:t>Hello</w:t>\n\
        +        <w:t>Goodbye</w:t>\n       \
        </w:r>\n     \
        </w:p>\n   \
        </w:body>\n";
    let actual_output = stdout_of(&mut run_office_diff(
        workspace.dir.path(),
        &["before.docx", "after.docx"],
    ));

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn identical_archives_are_equal(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    let files = document_files();
    let entries = files.iter().map(FileSpec::as_entry).collect::<Vec<_>>();
    write_zip(&workspace.path("a.xlsx"), &entries);
    let mut reordered = entries.clone();
    reordered.reverse();
    write_zip(&workspace.path("b.xlsx"), &reordered);

    run_office_diff(workspace.dir.path(), &["a.xlsx", "b.xlsx"])
        .assert()
        .success()
        .stdout("files are equal\n");

    Ok(())
}

#[rstest]
fn archive_with_escaping_entry_is_rejected(workspace: Workspace) {
    write_zip(&workspace.path("good.docx"), &[("word/document.xml", b"<a/>")]);
    write_zip(&workspace.path("evil.docx"), &[("../evil.xml", b"<a/>")]);

    run_office_diff(workspace.dir.path(), &["good.docx", "evil.docx"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid archive"));
    assert!(!workspace.path("evil.xml").exists());
}
