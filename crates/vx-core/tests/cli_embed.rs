//! End-to-end tests for embed generation, validation, curve and preview.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `vortex` command isolated from the user's settings and store.
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

fn write_config(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).expect("write config");
    path
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

const DEMO: &str = r##"{
    "displayName": "Demo",
    "videoSource": "https://example.com/v.mp4",
    "aspectRatio": "16:9",
    "accentColor": "#2563eb",
    "retentionCurveExponent": 0.5,
    "contentDelayEnabled": false,
    "contentDelaySeconds": 60
}"##;

// ============================================================================
// embed
// ============================================================================

mod embed {
    use super::*;

    #[test]
    fn bare_embed_from_config_file() {
        let home = TempDir::new().unwrap();
        let config = write_config(home.path(), "demo.json", DEMO);
        vortex(&home)
            .args(["embed", "--bare", "--instance-id", "vsl-test"])
            .arg("--config")
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::starts_with(r#"<div id="vsl-test""#))
            .stdout(predicate::str::contains("var exponent = 0.5;"))
            .stdout(predicate::str::contains(
                r#"<source src="https://example.com/v.mp4" type="video/mp4">"#,
            ))
            .stdout(predicate::str::contains("INSTALL NOTES").not());
    }

    #[test]
    fn default_output_wraps_instructions() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["embed", "--video", "https://example.com/v.mp4"])
            .assert()
            .success()
            .stdout(predicate::str::contains("=== INSTALL NOTES FOR AI / DEVELOPER ==="))
            .stdout(predicate::str::contains("--- VORTEX PLAYER CODE ---"))
            .stdout(predicate::str::contains("--- END OF CODE ---"));
    }

    #[test]
    fn portuguese_copy() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["embed", "--copy", "pt-br"])
            .assert()
            .success()
            .stdout(predicate::str::contains("CLIQUE PARA OUVIR"))
            .stdout(predicate::str::contains("=== PROMPT PARA IA / DESENVOLVEDOR ==="));
    }

    #[test]
    fn field_overrides_apply() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args([
                "embed",
                "--bare",
                "--ratio",
                "9:16",
                "--color",
                "#F0A",
                "--exponent",
                "0.7",
                "--delay",
                "30",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("aspect-ratio: 9/16"))
            .stdout(predicate::str::contains("max-width: 400px"))
            .stdout(predicate::str::contains("#ff00aa"))
            .stdout(predicate::str::contains("var exponent = 0.7;"))
            .stdout(predicate::str::contains(r#"data-vsl-reveal-after="30""#));
    }

    #[test]
    fn fixed_instance_id_is_deterministic() {
        let home = TempDir::new().unwrap();
        let run = || {
            vortex(&home)
                .args(["embed", "--instance-id", "vsl-fixed"])
                .output()
                .unwrap()
                .stdout
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn random_instance_ids_differ() {
        let home = TempDir::new().unwrap();
        let id = || {
            let output = vortex(&home)
                .args(["-f", "json", "embed", "--bare"])
                .output()
                .unwrap();
            stdout_json(&output)["instance_id"]
                .as_str()
                .unwrap()
                .to_string()
        };
        assert_ne!(id(), id());
    }

    #[test]
    fn json_envelope() {
        let home = TempDir::new().unwrap();
        let output = vortex(&home)
            .args(["-f", "json", "embed", "--instance-id", "vsl-json", "--name", "Launch"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["command"], "embed");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["instance_id"], "vsl-json");
        assert_eq!(json["display_name"], "Launch");
        assert!(json["embed_code"]
            .as_str()
            .unwrap()
            .contains("<!-- Project: Launch -->"));
        assert!(json["project_id"].is_null());
    }

    #[test]
    fn output_file() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("player.html");
        vortex(&home)
            .args(["embed", "--bare", "--minify"])
            .arg("--output")
            .arg(&target)
            .assert()
            .success()
            .stdout(predicate::str::contains("written to"));
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("<div"));
        assert!(written.contains("<script>"));
    }

    #[test]
    fn invalid_video_is_rejected() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["embed", "--video", "ftp://example.com/v.mp4"])
            .assert()
            .code(10)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Invalid Player Configuration"))
            .stderr(predicate::str::contains("videoSource"));
    }

    #[test]
    fn no_validate_degrades_gracefully() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args([
                "embed",
                "--bare",
                "--no-validate",
                "--color",
                "not-a-color",
                "--exponent",
                "7",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("#2563eb"))
            .stdout(predicate::str::contains("var exponent = 1;"));
    }

    #[test]
    fn settings_player_defaults_are_used() {
        let home = TempDir::new().unwrap();
        let settings = write_config(
            home.path(),
            "settings.json",
            r#"{"player_defaults": {"displayName": "From Settings"}, "embed": {"include_instructions": false}}"#,
        );
        vortex(&home)
            .arg("--settings")
            .arg(&settings)
            .arg("embed")
            .assert()
            .success()
            .stdout(predicate::str::contains("<!-- Project: From Settings -->"))
            .stdout(predicate::str::starts_with("<div"));
    }
}

// ============================================================================
// validate
// ============================================================================

mod validate {
    use super::*;

    #[test]
    fn valid_config() {
        let home = TempDir::new().unwrap();
        let config = write_config(home.path(), "demo.json", DEMO);
        vortex(&home)
            .arg("validate")
            .arg("--config")
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn every_issue_is_listed() {
        let home = TempDir::new().unwrap();
        let config = write_config(
            home.path(),
            "bad.json",
            r#"{"displayName": " ", "videoSource": "nope", "accentColor": "red", "retentionCurveExponent": 2}"#,
        );
        let output = vortex(&home)
            .args(["-f", "json", "validate"])
            .arg("--config")
            .arg(&config)
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        let json = stdout_json(&output);
        assert_eq!(json["status"], "invalid");
        let fields: Vec<_> = json["issues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["field"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            fields,
            ["displayName", "videoSource", "accentColor", "retentionCurveExponent"]
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let home = TempDir::new().unwrap();
        let config = write_config(home.path(), "broken.json", "{ not json");
        vortex(&home)
            .arg("validate")
            .arg("--config")
            .arg(&config)
            .assert()
            .code(10);
    }

    #[test]
    fn missing_file_is_an_error() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .arg("validate")
            .arg("--config")
            .arg(home.path().join("absent.json"))
            .assert()
            .code(10)
            .stderr(predicate::str::contains("Configuration Error"));
    }
}

// ============================================================================
// curve / preview
// ============================================================================

mod curve {
    use super::*;

    #[test]
    fn default_curve_table() {
        let home = TempDir::new().unwrap();
        let output = vortex(&home)
            .args(["-f", "json", "curve"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["exponent"], 0.5);
        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0]["displayed_percent"], 0.0);
        assert_eq!(points[10]["displayed_percent"], 100.0);
        // sqrt(0.25) = 0.5: a quarter watched shows half a bar.
        assert!((json["half_bar_at_percent"].as_f64().unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn exponent_is_clamped() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["curve", "--exponent", "5"])
            .assert()
            .success()
            .stdout(predicate::str::contains("exponent 1"))
            .stdout(predicate::str::contains("was clamped"));
    }

    #[test]
    fn preview_reveals_after_delay() {
        let home = TempDir::new().unwrap();
        let output = vortex(&home)
            .args([
                "-f",
                "json",
                "preview",
                "--delay",
                "60",
                "--duration",
                "120",
                "--step",
                "10",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["revealed_at"], 60.0);

        let frames = json["frames"].as_array().unwrap();
        assert_eq!(frames[0]["event"], "load");
        assert_eq!(frames[0]["muted"], true);
        assert_eq!(frames[1]["event"], "unmute");
        let last = frames.last().unwrap();
        assert_eq!(last["event"], "ended");
        assert_eq!(last["progress_percent"], 100.0);
        assert_eq!(last["pause_icon_visible"], false);
    }

    #[test]
    fn preview_rejects_zero_step() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["preview", "--step", "0"])
            .assert()
            .code(10);
    }
}

// ============================================================================
// schema / version
// ============================================================================

mod meta {
    use super::*;

    #[test]
    fn schema_for_player_config() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["schema", "PlayerConfig"])
            .assert()
            .success()
            .stdout(predicate::str::contains("retentionCurveExponent"));
    }

    #[test]
    fn schema_list() {
        let home = TempDir::new().unwrap();
        vortex(&home)
            .args(["schema", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ProjectRecord"));
    }

    #[test]
    fn version_json() {
        let home = TempDir::new().unwrap();
        let output = vortex(&home)
            .args(["-f", "json", "version"])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["schema_version"], "1.0.0");
        assert!(json["vortex_version"].is_string());
    }
}
