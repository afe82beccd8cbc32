use crate::common::file::{FileSpec, write_files};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

/// A scratch directory holding a `source/` and a `target/` tree
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn source(&self) -> PathBuf {
        self.dir.path().join("source")
    }

    pub fn target(&self) -> PathBuf {
        self.dir.path().join("target")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_source(&self, files: &[(&str, &[u8])]) {
        write_files(&self.source(), files);
    }

    pub fn write_target(&self, files: &[(&str, &[u8])]) {
        write_files(&self.target(), files);
    }

    /// Run `office-diff source target <args>` inside the workspace
    pub fn diff(&self, args: &[&str]) -> Command {
        let mut cmd = run_office_diff(self.dir.path(), &["source", "target"]);
        cmd.args(args);
        cmd
    }
}

#[fixture]
pub fn workspace() -> Workspace {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir_all(dir.path().join("source")).expect("Failed to create source tree");
    std::fs::create_dir_all(dir.path().join("target")).expect("Failed to create target tree");

    Workspace { dir }
}

/// A workspace whose two trees look like an unpacked word document
#[fixture]
pub fn document_workspace(workspace: Workspace) -> Workspace {
    let files = document_files();
    workspace.write_source(&files.iter().map(FileSpec::as_entry).collect::<Vec<_>>());
    workspace.write_target(&files.iter().map(FileSpec::as_entry).collect::<Vec<_>>());

    workspace
}

pub fn document_files() -> Vec<FileSpec> {
    vec![
        FileSpec::new(
            "[Content_Types].xml".into(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#.into(),
        ),
        FileSpec::new(
            "_rels/.rels".into(),
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Target="word/document.xml"/></Relationships>"#.into(),
        ),
        FileSpec::new(
            "word/document.xml".into(),
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"#.into(),
        ),
        FileSpec::new(
            "word/_rels/document.xml.rels".into(),
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#.into(),
        ),
    ]
}

pub fn run_office_diff(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("office-diff").expect("Failed to find office-diff binary");
    cmd.current_dir(dir).env_remove("RUST_LOG").args(args);
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run office-diff");
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}
