//! Pipeline tests with shell scripts standing in for `tsc`
#![cfg(unix)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tsdeclare_core::LayoutConfig;
use tsdeclare_emit::{
    generate_type_declaration, CompilerCommand, EmitError, EmitOptions, Emitter,
};

/// Writes index.d.ts/index.js the way tsc would for a package called `pkg`.
const FAKE_TSC: &str = r#"for last; do :; done
base="${last%.ts}"
cp "$last" "$base.seen"
printf 'declare module pkg {\n    module a {\n        var a: number;\n    }\n}\nexport = pkg;\n' > "$base.d.ts"
printf 'var pkg;\n' > "$base.js"
"#;

const FAILING_TSC: &str = r#"echo "index.ts(3,5): error TS2304: Cannot find name 'x'."
echo "compiler crashed" >&2
exit 2
"#;

/// Succeeds but writes a declaration without the expected header.
const ODD_TSC: &str = r#"printf 'declare namespace other {\n}\n' > index.d.ts
"#;

/// Declares the package `index`, whose artifact shares its path with index.d.ts.
const INDEX_TSC: &str = r#"printf 'declare module index {\n    var a: number;\n}\nexport = index;\n' > index.d.ts
"#;

/// Has the module header but no export assignment.
const HEADER_ONLY_TSC: &str = r#"printf 'declare module pkg {\n}\n' > index.d.ts
"#;

fn setup(script: &str) -> (tempfile::TempDir, EmitOptions) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tsc.sh"), script).unwrap();
    fs::write(
        dir.path().join("fileA.ts"),
        "import foo = require('foo');\nimport bar = require('./bar');\nexport var a = 1;",
    )
    .unwrap();
    let options =
        EmitOptions::new(dir.path()).with_compiler(CompilerCommand::new("sh").arg("tsc.sh"));
    (dir, options)
}

fn config() -> LayoutConfig {
    LayoutConfig::new().source("a", "fileA")
}

fn exists(dir: &Path, file: &str) -> bool {
    dir.join(file).exists()
}

#[tokio::test]
async fn test_successful_emit_writes_artifact_and_cleans_up() {
    let (dir, options) = setup(FAKE_TSC);

    let output = generate_type_declaration("pkg", &config(), options)
        .await
        .unwrap();

    assert_eq!(output.declaration_path, dir.path().join("pkg.d.ts"));
    assert!(output.report.is_complete());
    assert_eq!(
        fs::read_to_string(dir.path().join("pkg.d.ts")).unwrap(),
        "declare module \"pkg\" {\n    module a {\n        var a: number;\n    }\n}\n"
    );
    assert!(!exists(dir.path(), "index.ts"));
    assert!(!exists(dir.path(), "index.d.ts"));
    assert!(exists(dir.path(), "index.js"));

    // The compiler saw the percolated unit
    assert_eq!(
        fs::read_to_string(dir.path().join("index.seen")).unwrap(),
        "import foo = require('foo');\nmodule pkg {\n  export module a {\n    export var a = 1;\n  }\n}\nexport = pkg;"
    );
}

#[tokio::test]
async fn test_compiler_failure_keeps_intermediates() {
    let (dir, options) = setup(FAILING_TSC);

    let err = generate_type_declaration("pkg", &config(), options)
        .await
        .unwrap_err();

    match &err {
        EmitError::CompilerFailed {
            status,
            stdout,
            stderr,
        } => {
            assert_eq!(*status, Some(2));
            assert!(stdout.contains("error TS2304"));
            assert_eq!(stderr, "compiler crashed\n");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.exit_code(), 2);
    assert!(exists(dir.path(), "index.ts"));
    assert!(!exists(dir.path(), "pkg.d.ts"));
}

#[tokio::test]
async fn test_missing_leaf_writes_nothing() {
    let (dir, options) = setup(FAKE_TSC);
    let config = config().source("gone", "missing");

    let err = generate_type_declaration("pkg", &config, options)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EmitError::Core(tsdeclare_core::CoreError::SourceNotFound { .. })
    ));
    assert!(!exists(dir.path(), "index.ts"));
    assert!(!exists(dir.path(), "pkg.d.ts"));
}

#[tokio::test]
async fn test_rewrite_miss_warns_by_default() {
    let (dir, options) = setup(ODD_TSC);

    let output = generate_type_declaration("pkg", &config(), options)
        .await
        .unwrap();

    assert!(!output.report.header_rewritten);
    assert_eq!(output.declaration, "declare namespace other {\n}\n");
    assert!(exists(dir.path(), "pkg.d.ts"));
}

#[tokio::test]
async fn test_rewrite_miss_fails_in_strict_mode() {
    let (dir, options) = setup(ODD_TSC);

    let err = generate_type_declaration("pkg", &config(), options.strict(true))
        .await
        .unwrap_err();

    assert!(matches!(err, EmitError::DeclarationHeaderNotFound { .. }));
    assert!(!exists(dir.path(), "pkg.d.ts"));
    assert!(exists(dir.path(), "index.ts"));
}

#[tokio::test]
async fn test_compiler_without_declaration_output() {
    let (dir, options) = setup("exit 0\n");
    let emitter = Emitter::new(options);
    let root = emitter.assemble("pkg", &config()).unwrap();

    let err = emitter.emit(&root).await.unwrap_err();
    match err {
        EmitError::MissingDeclarationOutput { path } => {
            assert_eq!(path, dir.path().join("index.d.ts"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_sources_can_live_outside_work_dir() {
    let (work, options) = setup(FAKE_TSC);
    let sources = tempfile::tempdir().unwrap();
    fs::write(sources.path().join("lib.ts"), "export var a = 1;").unwrap();

    let config = LayoutConfig::new().source("a", "lib");
    generate_type_declaration("pkg", &config, options.with_base_dir(sources.path()))
        .await
        .unwrap();

    assert!(exists(work.path(), "pkg.d.ts"));
    assert!(!exists(sources.path(), "pkg.d.ts"));
}

#[tokio::test]
async fn test_package_named_index_keeps_its_artifact() {
    let (dir, options) = setup(INDEX_TSC);

    let output = generate_type_declaration("index", &config(), options)
        .await
        .unwrap();

    assert_eq!(output.declaration_path, dir.path().join("index.d.ts"));
    assert!(output.report.is_complete());
    assert_eq!(
        fs::read_to_string(&output.declaration_path).unwrap(),
        "declare module \"index\" {\n    var a: number;\n}\n"
    );
    assert!(!exists(dir.path(), "index.ts"));
}

#[tokio::test]
async fn test_missing_export_assignment_fails_in_strict_mode() {
    let (dir, options) = setup(HEADER_ONLY_TSC);

    let err = generate_type_declaration("pkg", &config(), options.strict(true))
        .await
        .unwrap_err();

    match err {
        EmitError::ExportAssignmentNotFound { name } => assert_eq!(name, "pkg"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(exists(dir.path(), "index.ts"));
    assert!(exists(dir.path(), "index.d.ts"));
    assert!(!exists(dir.path(), "pkg.d.ts"));
}
