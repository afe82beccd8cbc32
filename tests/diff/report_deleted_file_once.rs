use crate::common::command::{Workspace, document_workspace, stdout_of};
use crate::common::file::delete_path;
use rstest::rstest;

#[rstest]
fn report_deleted_file_once(document_workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    delete_path(&document_workspace.target().join("word/_rels/document.xml.rels"));

    let expected_output = "diff a/word/_rels/document.xml.rels /dev/null\n\
        --- a/word/_rels/document.xml.rels\n\
        +++ /dev/null\n\
        @@ -1 +0,0 @@\n\
        -<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\"/>\n";
    let actual_output = stdout_of(&mut document_workspace.diff(&[]));

    pretty_assertions::assert_eq!(actual_output, expected_output);
    assert_eq!(actual_output.matches("diff ").count(), 1);

    Ok(())
}
