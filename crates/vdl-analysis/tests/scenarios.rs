//! Cross-crate integration tests for the concrete scenarios described
//! in the project's testable-properties catalog: a full `analyze()`
//! run over a virtual filesystem, exercised only through the public
//! `vdl-analysis` API.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use vdl_fs::{FileSystem, ReadError};

struct FakeFs(Mutex<HashMap<PathBuf, String>>);

impl FakeFs {
    fn new(files: &[(&str, &str)]) -> Self {
        let mut map = HashMap::new();
        for (path, contents) in files {
            map.insert(PathBuf::from(*path), contents.to_string());
        }
        Self(Mutex::new(map))
    }
}

impl FileSystem for FakeFs {
    fn read(&self, path: &Path) -> Result<String, ReadError> {
        self.0
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ReadError::NotFound(path.to_path_buf()))
    }
}

#[test]
fn simple_include_has_no_diagnostics_and_links_the_spread() {
    let fs = FakeFs::new(&[
        (
            "/main.vdl",
            "include \"./models.vdl\"\ntype User {\n  ...BaseEntity\n  name: string\n}",
        ),
        ("/models.vdl", "type BaseEntity { id: string }"),
    ]);
    let (program, diags) = vdl_analysis::analyze(&fs, Path::new("/main.vdl"));
    assert!(diags.is_empty());
    assert!(program.types.contains_key("User"));
    assert!(program.types.contains_key("BaseEntity"));
    assert_eq!(program.types["User"].spreads[0].name, "BaseEntity");
    assert_eq!(program.files.len(), 2);
}

#[test]
fn circular_include_reports_e002_but_still_returns_a_program() {
    let fs = FakeFs::new(&[("/a.vdl", "include \"./b.vdl\""), ("/b.vdl", "include \"./a.vdl\"")]);
    let (program, diags) = vdl_analysis::analyze(&fs, Path::new("/a.vdl"));
    assert!(diags.iter().any(|d| d.code == vdl_diagnostic::E002_CIRCULAR_INCLUDE));
    assert!(!program.files.is_empty());
}

#[test]
fn optional_self_recursion_is_allowed() {
    let fs = FakeFs::new(&[("/test.vdl", "type Node {\n  value: string\n  children?: Node[]\n}")]);
    let (_, diags) = vdl_analysis::analyze(&fs, Path::new("/test.vdl"));
    assert!(diags.is_empty());
}

#[test]
fn required_self_recursion_is_forbidden() {
    let fs = FakeFs::new(&[("/test.vdl", "type Node { child: Node }")]);
    let (_, diags) = vdl_analysis::analyze(&fs, Path::new("/test.vdl"));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, vdl_diagnostic::E601_CIRCULAR_TYPE_DEPENDENCY);
    assert!(diags[0].message.contains("Node -> Node"));
}

#[test]
fn unresolved_field_type_suggests_the_closest_declared_name() {
    let fs = FakeFs::new(&[("/test.vdl", "type User { name: string }\ntype Profile { user: Usr }")]);
    let (_, diags) = vdl_analysis::analyze(&fs, Path::new("/test.vdl"));
    let e201 = diags.iter().find(|d| d.code == vdl_diagnostic::E201_TYPE_NOT_DECLARED).expect("E201");
    assert!(e201.message.contains("did you mean"));
    assert!(e201.message.contains("User"));
}

#[test]
fn enum_with_mixed_explicit_value_kinds_reports_e301() {
    let fs = FakeFs::new(&[("/test.vdl", "enum Status {\n  Active = 1\n  Paused = \"paused\"\n}")]);
    let (_, diags) = vdl_analysis::analyze(&fs, Path::new("/test.vdl"));
    assert!(diags.iter().any(|d| d.code == vdl_diagnostic::E301_ENUM_MIXED_TYPES));
}

#[test]
fn missing_entry_file_yields_an_empty_program_and_one_e001() {
    let fs = FakeFs::new(&[]);
    let (program, diags) = vdl_analysis::analyze(&fs, Path::new("/missing.vdl"));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, vdl_diagnostic::E001_FILE_NOT_FOUND);
    assert_eq!(program.entry_point, PathBuf::from("/missing.vdl"));
    assert!(program.files.is_empty());
}

#[test]
fn reincluding_an_already_included_file_adds_no_new_files_or_diagnostics() {
    let fs = FakeFs::new(&[
        ("/main.vdl", "include \"./a.vdl\"\ninclude \"./b.vdl\""),
        ("/a.vdl", "include \"./shared.vdl\""),
        ("/b.vdl", "include \"./shared.vdl\""),
        ("/shared.vdl", "type Shared { id: string }"),
    ]);
    let (program, diags) = vdl_analysis::analyze(&fs, Path::new("/main.vdl"));
    assert!(diags.is_empty());
    assert_eq!(program.files.len(), 4);
}

#[test]
fn every_included_path_is_present_as_a_file_key() {
    let fs = FakeFs::new(&[
        ("/main.vdl", "include \"./models.vdl\"\ntype User { name: string }"),
        ("/models.vdl", "type BaseEntity { id: string }"),
    ]);
    let (program, _) = vdl_analysis::analyze(&fs, Path::new("/main.vdl"));
    for file in program.files.values() {
        for included in &file.includes {
            assert!(program.files.contains_key(included));
        }
    }
}

#[test]
fn analyzing_the_same_symbol_table_twice_is_deterministic() {
    let fs = FakeFs::new(&[("/test.vdl", "type User { name: string }\ntype Profile { user: Usr }")]);
    let (_, first) = vdl_analysis::analyze(&fs, Path::new("/test.vdl"));
    let (_, second) = vdl_analysis::analyze(&fs, Path::new("/test.vdl"));
    let codes = |diags: &[vdl_diagnostic::Diagnostic]| diags.iter().map(|d| d.code).collect::<Vec<_>>();
    assert_eq!(codes(&first), codes(&second));
}
