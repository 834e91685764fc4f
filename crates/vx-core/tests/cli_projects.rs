//! Project store and configuration commands, end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn vortex(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vortex").expect("vortex binary should exist");
    for var in [
        "VORTEX_OWNER",
        "VORTEX_SETTINGS",
        "VORTEX_CONFIG_DIR",
        "VORTEX_DATA",
        "VORTEX_LOG",
        "VORTEX_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("share"))
        .env("HOME", home.path())
        .arg("--data-dir")
        .arg(home.path().join("data"));
    cmd
}

/// Run with `-f json` as `owner` and parse stdout.
fn run_json(home: &TempDir, owner: &str, args: &[&str]) -> (Option<i32>, Value) {
    let output = vortex(home)
        .args(["-f", "json", "--owner", owner])
        .args(args)
        .output()
        .expect("run vortex");
    let json = serde_json::from_slice(&output.stdout).unwrap_or(Value::Null);
    (output.status.code(), json)
}

fn create(home: &TempDir, owner: &str, name: &str) -> String {
    let (code, json) = run_json(home, owner, &["project", "new", "--name", name]);
    assert_eq!(code, Some(0), "project new failed: {}", json);
    json["project"]["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn create_show_update_delete() {
        let home = TempDir::new().unwrap();
        let id = create(&home, "ana", "Launch");

        let (code, json) = run_json(&home, "ana", &["project", "show", &id]);
        assert_eq!(code, Some(0));
        assert_eq!(json["project"]["config"]["displayName"], "Launch");
        assert_eq!(json["project"]["owner"], "ana");
        assert_eq!(json["project"]["views"], 0);
        let created = json["project"]["created_at"].clone();

        let (code, json) = run_json(
            &home,
            "ana",
            &["project", "update", &id, "--ratio", "9:16", "--delay", "45"],
        );
        assert_eq!(code, Some(0));
        let config = &json["project"]["config"];
        assert_eq!(config["displayName"], "Launch", "untouched fields survive");
        assert_eq!(config["aspectRatio"], "9:16");
        assert_eq!(config["contentDelayEnabled"], true);
        assert_eq!(config["contentDelaySeconds"], 45);
        assert_eq!(json["project"]["created_at"], created);

        let (code, json) = run_json(&home, "ana", &["project", "delete", &id]);
        assert_eq!(code, Some(0));
        assert_eq!(json["status"], "deleted");

        let (code, _) = run_json(&home, "ana", &["project", "show", &id]);
        assert_eq!(code, Some(15));
    }

    #[test]
    fn list_newest_first_with_search() {
        let home = TempDir::new().unwrap();
        let first = create(&home, "ana", "Black Friday");
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = create(&home, "ana", "Cyber Monday");
        create(&home, "bob", "Someone Else");

        let (code, json) = run_json(&home, "ana", &["project", "list"]);
        assert_eq!(code, Some(0));
        assert_eq!(json["count"], 2);
        assert_eq!(json["projects"][0]["id"], second.as_str());
        assert_eq!(json["projects"][1]["id"], first.as_str());

        let (_, json) = run_json(&home, "ana", &["project", "list", "--search", "friday"]);
        assert_eq!(json["count"], 1);
        assert_eq!(json["projects"][0]["name"], "Black Friday");

        let (_, json) = run_json(&home, "ana", &["project", "list", "--limit", "1"]);
        assert_eq!(json["count"], 1);
    }

    #[test]
    fn empty_list_markdown() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["--owner", "zoe", "project", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No projects yet"));
    }

    #[test]
    fn project_embed_uses_stored_config() {
        let home = TempDir::new().unwrap();
        let id = create(&home, "ana", "Stored Player");

        let (code, json) = run_json(
            &home,
            "ana",
            &["project", "embed", &id, "--bare", "--instance-id", "vsl-stored"],
        );
        assert_eq!(code, Some(0));
        assert_eq!(json["project_id"], id.as_str());
        let html = json["embed_code"].as_str().unwrap();
        assert!(html.starts_with(r#"<div id="vsl-stored""#));
        assert!(html.contains("<!-- Project: Stored Player -->"));
    }

    #[test]
    fn owner_from_environment() {
        let home = TempDir::new().unwrap();
        let id = create(&home, "ana", "Env Owner");
        vortex(&home)
            .env("VORTEX_OWNER", "ana")
            .args(["project", "show", &id])
            .assert()
            .success()
            .stdout(predicate::str::contains("# Env Owner"));
    }

    #[test]
    fn invalid_config_is_not_stored() {
        let home = TempDir::new().unwrap();
        let (code, json) = run_json(
            &home,
            "ana",
            &["project", "new", "--video", "not a url"],
        );
        assert_eq!(code, Some(10));
        assert_eq!(json["error"]["category"], "validation");

        let (_, json) = run_json(&home, "ana", &["project", "list"]);
        assert_eq!(json["count"], 0);
    }
}

// ============================================================================
// Ownership
// ============================================================================

mod ownership {
    use super::*;

    #[test]
    fn other_owner_is_forbidden() {
        let home = TempDir::new().unwrap();
        let id = create(&home, "ana", "Private");

        for args in [
            vec!["project", "show", id.as_str()],
            vec!["project", "update", id.as_str(), "--name", "Hijacked"],
            vec!["project", "delete", id.as_str()],
            vec!["project", "embed", id.as_str()],
        ] {
            let (code, json) = run_json(&home, "bob", &args);
            assert_eq!(code, Some(12), "{:?}", args);
            assert_eq!(json["error"]["category"], "auth");
        }

        let (_, json) = run_json(&home, "ana", &["project", "show", &id]);
        assert_eq!(json["project"]["config"]["displayName"], "Private");
    }

    #[test]
    fn default_owner_is_local() {
        let home = TempDir::new().unwrap();
        let output = vortex(&home)
            .args(["-f", "json", "config", "show"])
            .output()
            .unwrap();
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["owner"]["id"], "local");
        assert_eq!(json["owner"]["source"], "builtin default");
    }
}

// ============================================================================
// config show
// ============================================================================

mod config_show {
    use super::*;

    #[test]
    fn reports_sources() {
        let home = TempDir::new().unwrap();
        let settings = home.path().join("settings.json");
        std::fs::write(&settings, r#"{"default_owner": "team", "embed": {"copy": "pt-br"}}"#)
            .unwrap();

        let output = vortex(&home)
            .args(["-f", "json", "config", "show", "--settings"])
            .arg(&settings)
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["settings"]["source"], "CLI argument");
        assert_eq!(json["settings"]["using_defaults"], false);
        assert_eq!(json["data_dir"]["source"], "CLI argument");
        assert_eq!(json["owner"]["id"], "team");
        assert_eq!(json["owner"]["source"], "settings file");
        assert_eq!(json["values"]["embed"]["copy"], "pt-br");
    }

    #[test]
    fn settings_from_environment() {
        let home = TempDir::new().unwrap();
        let settings = home.path().join("custom.json");
        std::fs::write(&settings, "{}").unwrap();

        vortex(&home)
            .env("VORTEX_SETTINGS", &settings)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.json (environment variable)"));
    }

    #[test]
    fn markdown_without_settings_uses_defaults() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("built-in defaults"))
            .stdout(predicate::str::contains("Owner: local"));
    }
}
