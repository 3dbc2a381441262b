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
fn status_is_all_current_after_apply_and_diff_is_empty() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_rule(project.path(), "Be terse.");

    ensemble_cmd(&home)
        .arg("apply")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success();

    ensemble_cmd(&home)
        .arg("status")
        .arg("--json")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"modified\": 0"))
        .stdout(predicate::str::contains("\"missing\": 0"));

    ensemble_cmd(&home)
        .arg("diff")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No differences."));
}

#[test]
fn local_edit_shows_up_in_status_and_diff() {
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
        .success();

    let target = project.path().join("CLAUDE.md");
    let edited = format!(
        "{}\nmanual tweak\n",
        std::fs::read_to_string(&target).expect("read")
    );
    std::fs::write(&target, edited).expect("write");

    ensemble_cmd(&home)
        .arg("status")
        .arg("--json")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"modified\""));

    ensemble_cmd(&home)
        .arg("diff")
        .arg("--agents")
        .arg("claude")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/CLAUDE.md"))
        .stdout(predicate::str::contains("-manual tweak"));
}

#[test]
fn agents_table_lists_the_registry() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    ensemble_cmd(&home)
        .arg("agents")
        .arg("--dir")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("claude"))
        .stdout(predicate::str::contains("GitHub Copilot"))
        .stdout(predicate::str::contains("copilot-instructions.md"));
}
