mod common;

use common::{fixture, list_files};
use govcookiecutter::error::Error;
use govcookiecutter::processor::{
    find_project_template, is_binary_content, is_project_template_name, is_rendered_path_valid,
    render_and_create_dir, uses_crlf, Processor,
};
use govcookiecutter::renderer::MiniJinjaRenderer;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn basic_context() -> Value {
    json!({
        "cookiecutter": {
            "project_name": "Demo Project",
            "repo_name": "demo_project",
            "license": "MIT",
            "version": "1",
            "use_ci": true,
            "meta": {"owner": "Demo Project"},
            "_copy_without_render": ["raw/*"]
        }
    })
}

fn basic_project_template() -> PathBuf {
    fixture("basic").join("{{ cookiecutter.repo_name }}")
}

#[test]
fn test_project_template_name() {
    assert!(is_project_template_name("{{ cookiecutter.repo_name }}"));
    assert!(is_project_template_name("{{cookiecutter.name}}-app"));
    assert!(!is_project_template_name("cookiecutter"));
    assert!(!is_project_template_name("{{ other }}"));
}

#[test]
fn test_find_project_template() {
    assert_eq!(find_project_template(fixture("basic")).unwrap(), basic_project_template());
    assert!(matches!(
        find_project_template(fixture("no_project_dir")),
        Err(Error::TemplateNotFoundError { .. })
    ));
}

#[test]
fn test_rendered_path_validation() {
    assert!(is_rendered_path_valid("demo"));
    assert!(is_rendered_path_valid("docs/demo.md"));
    assert!(!is_rendered_path_valid(""));
    assert!(!is_rendered_path_valid("   "));
    assert!(!is_rendered_path_valid("/etc/passwd"));
    assert!(!is_rendered_path_valid("docs//demo.md"));
    assert!(!is_rendered_path_valid("../escape"));
}

#[test]
fn test_content_sniffing() {
    assert!(is_binary_content(b"PNG\0\x01"));
    assert!(is_binary_content(&[0xff, 0xfe, 0x41]));
    assert!(!is_binary_content("plain {{ text }}\n".as_bytes()));

    assert!(uses_crlf("a\r\nb\r\n"));
    assert!(!uses_crlf("a\nb\r\n"));
    assert!(!uses_crlf("no newline"));
}

#[test]
fn test_render_and_create_dir() {
    let output = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = basic_context();

    let (dir, created) = render_and_create_dir(
        "{{ cookiecutter.repo_name }}",
        output.path(),
        &context,
        &engine,
        false,
    )
    .unwrap();
    assert_eq!(dir, output.path().join("demo_project"));
    assert!(created && dir.is_dir());

    let err = render_and_create_dir(
        "{{ cookiecutter.repo_name }}",
        output.path(),
        &context,
        &engine,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::OutputDirectoryExistsError { .. }));

    let (_, created) = render_and_create_dir(
        "{{ cookiecutter.repo_name }}",
        output.path(),
        &context,
        &engine,
        true,
    )
    .unwrap();
    assert!(!created);
}

#[test]
fn test_empty_project_dir_name() {
    let output = TempDir::new().unwrap();
    let context = json!({"cookiecutter": {"repo_name": ""}});

    let err = render_and_create_dir(
        "{{ cookiecutter.repo_name }}",
        output.path(),
        &context,
        &MiniJinjaRenderer::new(),
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}

#[test]
fn test_generate_tree() {
    let project_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = basic_context();
    let template = basic_project_template();

    Processor::new(&engine, &template, project_dir.path(), &context, false)
        .unwrap()
        .generate()
        .unwrap();

    assert_eq!(
        list_files(project_dir.path()),
        vec!["README.md", "crlf.txt", "demo_project.py", "logo.bin", "raw/keep.txt"]
    );

    let read = |name: &str| std::fs::read(project_dir.path().join(name)).unwrap();
    assert_eq!(
        String::from_utf8(read("README.md")).unwrap(),
        "# Demo Project\n\nLicense: MIT\nVersion: 1\nOwner: Demo Project\nCI: enabled\n"
    );
    assert_eq!(String::from_utf8(read("demo_project.py")).unwrap(), "NAME = \"demo_project\"\n");
    // Copy-only and binary files are byte-identical to the template.
    assert_eq!(read("raw/keep.txt"), std::fs::read(template.join("raw/keep.txt")).unwrap());
    assert_eq!(read("logo.bin"), std::fs::read(template.join("logo.bin")).unwrap());
    assert_eq!(read("crlf.txt"), b"Demo Project\r\nsecond line\r\n");
}

#[test]
fn test_skip_if_file_exists() {
    let project_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = basic_context();
    let template = basic_project_template();
    std::fs::write(project_dir.path().join("README.md"), "hand written\n").unwrap();

    Processor::new(&engine, &template, project_dir.path(), &context, true)
        .unwrap()
        .generate()
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(project_dir.path().join("README.md")).unwrap(),
        "hand written\n"
    );
    assert!(project_dir.path().join("demo_project.py").is_file());
}

#[test]
fn test_overwrite_replaces_existing_files() {
    let project_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = basic_context();
    let template = basic_project_template();
    std::fs::write(project_dir.path().join("README.md"), "hand written\n").unwrap();

    Processor::new(&engine, &template, project_dir.path(), &context, false)
        .unwrap()
        .generate()
        .unwrap();

    assert!(std::fs::read_to_string(project_dir.path().join("README.md"))
        .unwrap()
        .starts_with("# Demo Project"));
}

#[test]
fn test_missing_variable_in_file() {
    let template = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    std::fs::write(template.path().join("broken.txt"), "{{ cookiecutter.nope }}").unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = json!({"cookiecutter": {}});

    let err = Processor::new(&engine, template.path(), project_dir.path(), &context, false)
        .unwrap()
        .generate()
        .unwrap_err();
    assert!(matches!(err, Error::MissingVariableError(_)));
}

#[test]
fn test_empty_rendered_file_name_is_skipped() {
    let template = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    std::fs::write(
        template.path().join("{% if cookiecutter.ci %}ci.yml{% endif %}"),
        "ci",
    )
    .unwrap();
    std::fs::write(template.path().join("kept.txt"), "kept").unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = json!({"cookiecutter": {"ci": false}});

    Processor::new(&engine, template.path(), project_dir.path(), &context, false)
        .unwrap()
        .generate()
        .unwrap();

    assert_eq!(list_files(project_dir.path()), vec!["kept.txt"]);
}

#[cfg(unix)]
#[test]
fn test_permissions_are_copied() {
    use std::os::unix::fs::PermissionsExt;

    let template = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    let script = template.path().join("run.sh");
    std::fs::write(&script, "#!/bin/sh\necho {{ cookiecutter.name }}\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    let engine = MiniJinjaRenderer::new();
    let context = json!({"cookiecutter": {"name": "x"}});

    Processor::new(&engine, template.path(), project_dir.path(), &context, false)
        .unwrap()
        .generate()
        .unwrap();

    let mode = std::fs::metadata(project_dir.path().join("run.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
