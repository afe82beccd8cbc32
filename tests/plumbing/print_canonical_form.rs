use crate::common::command::{Workspace, run_office_diff, stdout_of, workspace};
use crate::common::file::write_files;
use rstest::rstest;

#[rstest]
#[case(&[], "<?xml version=\"1.0\"?>\n<a>\n  <b x=\"1\"/>\n  <c>text</c>\n</a>\n")]
#[case(&["--indent", "\t"], "<?xml version=\"1.0\"?>\n<a>\n\t<b x=\"1\"/>\n\t<c>text</c>\n</a>\n")]
fn print_canonical_form(
    workspace: Workspace,
    #[case] args: &[&str],
    #[case] expected_output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    write_files(
        workspace.dir.path(),
        &[("doc.xml", b"<?xml version=\"1.0\"?>\n<a>   <b x=\"1\"></b>\n<c>text</c></a>")],
    );

    let mut cmd = run_office_diff(workspace.dir.path(), &["fmt", "doc.xml"]);
    cmd.args(args);

    pretty_assertions::assert_eq!(stdout_of(&mut cmd), expected_output);

    Ok(())
}

#[rstest]
fn extra_suffix_is_formatted_as_xml(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    write_files(workspace.dir.path(), &[("chart.vml", b"<v><w/></v>")]);

    let plain = stdout_of(&mut run_office_diff(workspace.dir.path(), &["fmt", "chart.vml"]));
    let formatted = stdout_of(&mut run_office_diff(
        workspace.dir.path(),
        &["fmt", "chart.vml", "--xml-suffix", "vml"],
    ));

    pretty_assertions::assert_eq!(plain, "<v><w/></v>");
    pretty_assertions::assert_eq!(formatted, "<v>\n  <w/>\n</v>\n");

    Ok(())
}

#[rstest]
fn missing_file_is_an_error(workspace: Workspace) {
    run_office_diff(workspace.dir.path(), &["fmt", "missing.xml"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("failed to read"));
}
