use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const CATALOG: &str = r#"[
    {"id": 1, "name": "Bust of Lomonosov", "sculptor": "Shubin", "creationTime": "1789",
     "material": "Marble", "texts": ["Carved from Carrara marble.", "Acquired in 1921."]},
    {"id": 2, "name": "Minin and Pozharsky", "sculptor": "Martos", "creationTime": "cast in 1818",
     "material": "Bronze", "location": "Red Square"},
    {"id": 3, "name": "Unattributed fragment", "sculptor": "Shubin"},
    {"id": 4, "name": "Gogol", "sculptor": "Andreyev", "creationTime": "1909", "material": "Granite"},
    {"id": 5, "name": "Richelieu", "sculptor": "Martos", "creationTime": "1850", "material": "Bronze"},
    {"name": "record without id"}
]"#;

fn vitrine(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vitrine").unwrap();
    cmd.env("VITRINE_HOME", home).env_remove("VITRINE_LOG");
    cmd
}

fn home_with_catalog() -> tempfile::TempDir {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("catalogItems.json"), CATALOG).unwrap();
    home
}

#[test]
fn test_list_all_items() {
    let home = home_with_catalog();
    vitrine(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bust of Lomonosov"))
        .stdout(predicate::str::contains("Richelieu"))
        .stdout(predicate::str::contains("record without id").not());
}

#[test]
fn test_list_with_filters() {
    let home = home_with_catalog();
    vitrine(home.path())
        .args(["list", "--sculptor", "Martos", "--era", "classicism"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Minin and Pozharsky"))
        .stdout(predicate::str::contains("Richelieu").not())
        .stdout(predicate::str::contains("Showing 1 of 5 items."));
}

#[test]
fn test_search_matches_texts() {
    let home = home_with_catalog();
    vitrine(home.path())
        .args(["list", "--search", "CARRARA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bust of Lomonosov"))
        .stdout(predicate::str::contains("Gogol").not());
}

#[test]
fn test_show_with_neighbours() {
    let home = home_with_catalog();
    vitrine(home.path())
        .args(["show", "5", "--material", "Bronze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 in current selection"))
        .stdout(predicate::str::contains("previous: 2"));
}

#[test]
fn test_show_hidden_item() {
    let home = home_with_catalog();
    vitrine(home.path())
        .args(["show", "3", "--sculptor", "Martos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unattributed fragment"))
        .stdout(predicate::str::contains("not in current selection"));
}

#[test]
fn test_show_unknown_item_fails() {
    let home = home_with_catalog();
    vitrine(home.path())
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog item not found: 42"));
}

#[test]
fn test_missing_catalog_degrades_to_empty() {
    let home = tempfile::tempdir().unwrap();
    vitrine(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No items found."))
        .stdout(predicate::str::contains("could not be loaded"));
}

#[test]
fn test_data_option_overrides_config() {
    let home = tempfile::tempdir().unwrap();
    let elsewhere = home_with_catalog();
    vitrine(home.path())
        .arg("--data")
        .arg(elsewhere.path().join("catalogItems.json"))
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Andreyev"))
        .stdout(predicate::str::contains("XIX century"));
}

#[test]
fn test_config_set_and_show() {
    let home = home_with_catalog();
    vitrine(home.path())
        .args(["config", "materials", "Bronze,Marble"])
        .assert()
        .success()
        .stdout(predicate::str::contains("materials set to Bronze, Marble"));

    vitrine(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("materials = Bronze, Marble"));

    vitrine(home.path())
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Granite").not());
}

#[test]
fn test_kiosk_session() {
    let home = home_with_catalog();
    vitrine(home.path())
        .arg("kiosk")
        .write_stdin("toggle sculptor Martos\nopen\nnext\nreset\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 5 items match."))
        .stdout(predicate::str::contains("2 of 2 in current selection"))
        .stdout(predicate::str::contains("5 of 5 items match."));
}
