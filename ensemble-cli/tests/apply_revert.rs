use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ensemble_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ensemble").expect("ensemble binary");
    cmd.env("HOME", home.path()).env("USERPROFILE", home.path());
    cmd
}

fn write_rule(project: &std::path::Path, content: &str) {
    let rules = project.join(".ensemble").join("rules");
    std::fs::create_dir_all(&rules).expect("mkdir rules");
    std::fs::write(rules.join("general.md"), content).expect("write rule");
}

#[test]
fn apply_then_revert_restores_preexisting_file() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_rule(project.path(), "Use rustfmt.");
    std::fs::write(project.path().join("CLAUDE.md"), "handwritten notes").unwrap();

    ensemble_cmd(&home)
        .arg("apply")
        .arg("--agents")
        .arg("claude")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CLAUDE.md"));

    let generated = std::fs::read_to_string(project.path().join("CLAUDE.md")).unwrap();
    assert!(generated.contains("Source: .ensemble/rules/general.md"));
    assert!(generated.contains("Use rustfmt."));
    assert_eq!(
        std::fs::read_to_string(project.path().join("CLAUDE.md.bak")).unwrap(),
        "handwritten notes",
        "backup must hold the pre-apply content"
    );

    ensemble_cmd(&home)
        .arg("revert")
        .arg("--agents")
        .arg("claude")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(project.path().join("CLAUDE.md")).unwrap(),
        "handwritten notes"
    );
    assert!(
        !project.path().join("CLAUDE.md.bak").exists(),
        "backup must be removed after restore"
    );
}

#[test]
fn apply_then_revert_on_fresh_project_is_net_noop() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_rule(project.path(), "Be terse.");

    ensemble_cmd(&home)
        .arg("apply")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success();
    assert!(project.path().join("CLAUDE.md").exists());
    assert!(project.path().join("AGENTS.md").exists());
    assert!(project.path().join("GEMINI.md").exists());

    ensemble_cmd(&home)
        .arg("revert")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success();

    for file in ["CLAUDE.md", "AGENTS.md", "GEMINI.md", "CLAUDE.md.bak"] {
        assert!(
            !project.path().join(file).exists(),
            "{file} must not survive revert"
        );
    }
    assert!(
        !project
            .path()
            .join(".github")
            .join("copilot-instructions.md")
            .exists()
    );
}

#[test]
fn second_apply_reports_unchanged() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_rule(project.path(), "Be terse.");

    ensemble_cmd(&home)
        .arg("apply")
        .arg("--agents")
        .arg("claude")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 written"));

    ensemble_cmd(&home)
        .arg("apply")
        .arg("--agents")
        .arg("claude")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 unchanged"));
}
