use crate::common::command::{Workspace, stdout_of, workspace};
use rstest::rstest;

#[rstest]
fn report_added_xml_file_as_pure_insertion(
    workspace: Workspace,
) -> Result<(), Box<dyn std::error::Error>> {
    workspace.write_target(&[("new.xml", b"<a/>")]);

    let expected_output = "diff /dev/null b/new.xml\n--- /dev/null\n+++ b/new.xml\n@@ -0,0 +1 @@\n+<a/>\n";
    let actual_output = stdout_of(&mut workspace.diff(&[]));

    pretty_assertions::assert_eq!(actual_output, expected_output);
    workspace.diff(&[]).assert().code(1);

    Ok(())
}

#[rstest]
fn report_added_nested_document_with_canonical_layout(
    workspace: Workspace,
) -> Result<(), Box<dyn std::error::Error>> {
    workspace.write_target(&[("word/document.xml", b"<doc><p>one</p><p/></doc>")]);

    let expected_output = "diff /dev/null b/word/document.xml\n\
        --- /dev/null\n\
        +++ b/word/document.xml\n\
        @@ -0,0 +1,4 @@\n\
        +<doc>\n\
        +  <p>one</p>\n\
        +  <p/>\n\
        +</doc>\n";
    let actual_output = stdout_of(&mut workspace.diff(&[]));

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}
