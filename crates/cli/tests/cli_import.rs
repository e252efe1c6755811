use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn codevision(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codevision").expect("binary");
    cmd.env("CODEVISION_STORE_DIR", store)
        .env_remove("CODEVISION_OFFLINE")
        .env_remove("CODEVISION_API_BASE_URL")
        .env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> (bool, Value) {
    let output = cmd.output().expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

#[test]
fn offline_remote_import_is_saved_and_listed() {
    let store = tempdir().unwrap();

    let (ok, project) = json_stdout(codevision(store.path()).args([
        "--json",
        "import",
        "remote",
        "https://github.com/acme/widgets",
        "--offline",
    ]));
    assert!(ok, "{project}");
    assert_eq!(project["name"], "widgets");
    assert_eq!(project["source"], "remote");
    assert_eq!(project["url"], "https://github.com/acme/widgets");
    assert_eq!(project["metadata"]["owner"], "acme");
    assert_eq!(
        project["metadata"]["languages"],
        serde_json::json!(["JavaScript"])
    );
    let id = project["id"].as_str().expect("id").to_string();

    assert!(store.path().join("codeVisionProjects.json").exists());

    let (ok, listed) = json_stdout(codevision(store.path()).args(["--json", "list"]));
    assert!(ok);
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    let (ok, shown) = json_stdout(codevision(store.path()).args(["--json", "show", &id]));
    assert!(ok);
    assert_eq!(shown["structure"][0]["type"], "directory");
    assert_eq!(shown["structure"][0]["name"], "src");
}

#[test]
fn invalid_url_reports_the_handler_message() {
    let store = tempdir().unwrap();

    codevision(store.path())
        .args(["import", "remote", "https://gitlab.com/acme/widgets", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL de repositorio inválida"));

    let (ok, state) = json_stdout(codevision(store.path()).args([
        "--json",
        "import",
        "remote",
        "https://github.com/acme",
        "--offline",
    ]));
    assert!(!ok);
    assert_eq!(state["hasError"], true);
    assert_eq!(state["code"], "URL_INVALID");
    assert_eq!(state["message"], "URL de repositorio inválida");
    assert!(!store.path().join("codeVisionProjects.json").exists());
}

#[test]
fn validate_accepts_only_github_locators() {
    let store = tempdir().unwrap();

    let (ok, body) = json_stdout(codevision(store.path()).args([
        "--json",
        "validate",
        "https://www.github.com/acme/widgets/",
    ]));
    assert!(ok);
    assert_eq!(body["valid"], true);
    assert_eq!(body["owner"], "acme");
    assert_eq!(body["repo"], "widgets");

    codevision(store.path())
        .args(["validate", "https://github.com/acme/widgets/issues"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL de repositorio inválida"));
}

#[test]
fn local_import_reads_the_given_directory() {
    let store = tempdir().unwrap();
    let workspace = tempdir().unwrap();
    let root = workspace.path().join("scripts");
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("run.py"), "print('hi')").unwrap();
    fs::write(root.join("lib/helpers.sh"), "echo hi").unwrap();
    fs::write(root.join("NOTES"), "todo").unwrap();

    let (ok, project) = json_stdout(codevision(store.path()).args([
        "--json",
        "import",
        "local",
        root.to_str().unwrap(),
    ]));
    assert!(ok, "{project}");
    assert_eq!(project["name"], "scripts");
    assert_eq!(project["source"], "local");
    assert!(project.get("url").map_or(true, Value::is_null));
    let languages = project["metadata"]["languages"].as_array().unwrap();
    assert!(languages.contains(&Value::from("Python")));
    assert!(languages.contains(&Value::from("Shell")));
    assert!(languages.contains(&Value::from("Unknown")));
}

#[test]
fn local_import_without_terminal_is_unsupported() {
    let store = tempdir().unwrap();

    let (ok, state) = json_stdout(codevision(store.path()).args(["--json", "import", "local"]));
    assert!(!ok);
    assert_eq!(state["code"], "DIRECTORY_UNSUPPORTED");
    assert_eq!(
        state["message"],
        "Su navegador no soporta importación de directorios"
    );
}

#[test]
fn show_unknown_id_fails_with_its_message() {
    let store = tempdir().unwrap();

    codevision(store.path())
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project does-not-exist not found"));
}

#[test]
fn text_list_on_empty_store_prints_notice() {
    let store = tempdir().unwrap();

    codevision(store.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects imported yet"));
}
