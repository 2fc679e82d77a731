//! Integration tests for CLI commands

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to run helmschema command
fn helmschema(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_helmschema"))
        .args(args)
        .env_remove("HELMSCHEMA_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute helmschema")
}

fn workspace(values: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("values.yaml"), values).unwrap();
    dir
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

const CHART_VALUES: &str = r#"# Values for the demo chart
replicaCount: 1

image:
  repository: nginx
  # Overrides the image tag
  tag: ""
  pullPolicy: IfNotPresent

service:
  # Service type
  type: ClusterIP
  port: 80

podAnnotations: {}

ingress:
  enabled: false
  hosts:
    - host: chart-example.local
      paths: []
"#;

mod generate_command {
    use super::*;

    #[test]
    fn test_generate_writes_schema() {
        let dir = workspace(CHART_VALUES);
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("out/schema/values.schema.json");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", path_str(&output)]);

        assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
        let stdout = String::from_utf8_lossy(&result.stdout);
        assert!(stdout.contains("Schema written to"));

        let schema = read_json(&output);
        assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
        assert_eq!(schema["description"], "Values for the demo chart");
        assert_eq!(schema["properties"]["replicaCount"]["type"], serde_json::json!(["null", "integer"]));
        assert_eq!(schema["properties"]["image"]["required"], serde_json::json!(["repository"]));
        assert_eq!(
            schema["properties"]["service"]["properties"]["type"]["description"],
            "Service type"
        );
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_generate_to_stdout() {
        let dir = workspace("name: web\n");
        let values = dir.path().join("values.yaml");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", "-"]);

        assert!(result.status.success());
        let schema: serde_json::Value = serde_json::from_slice(&result.stdout)
            .expect("stdout should be the schema document");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert!(!dir.path().join("values.schema.json").exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let values = dir.path().join("missing.yaml");
        let output = dir.path().join("values.schema.json");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", path_str(&output)]);

        assert_eq!(result.status.code(), Some(5));
        assert!(String::from_utf8_lossy(&result.stderr).contains("missing.yaml"));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_yaml_writes_nothing() {
        let dir = workspace("key: [unclosed\n");
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("values.schema.json");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", path_str(&output)]);

        assert_eq!(result.status.code(), Some(1));
        assert!(!output.exists());
    }

    #[test]
    fn test_non_string_key_fails() {
        let dir = workspace("service:\n  80: http\n");
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("values.schema.json");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", path_str(&output)]);

        assert_eq!(result.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&result.stderr).contains("Non-string key"));
        assert!(!output.exists());
    }

    #[test]
    fn test_non_mapping_root_fails() {
        let dir = workspace("- a\n- b\n");
        let values = dir.path().join("values.yaml");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", "-"]);

        assert_eq!(result.status.code(), Some(1));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn test_unknown_schema_version_is_usage_error() {
        let dir = workspace("name: web\n");
        let values = dir.path().join("values.yaml");

        let result = helmschema(&[
            "generate",
            "-f",
            path_str(&values),
            "-o",
            "-",
            "--schema-version",
            "draft-03",
        ]);

        assert_eq!(result.status.code(), Some(64));
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let result = helmschema(&["generate", "--no-such-flag"]);
        assert_eq!(result.status.code(), Some(64));
    }

    #[test]
    fn test_schema_version_and_metadata_flags() {
        let dir = workspace("# From comment\nname: web\n");
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("values.schema.json");

        let result = helmschema(&[
            "generate",
            "-f",
            path_str(&values),
            "-o",
            path_str(&output),
            "--schema-version",
            "2020-12",
            "--title",
            "Web",
            "--description",
            "Explicit",
            "--require-all",
            "--no-examples",
        ]);

        assert!(result.status.success());
        let schema = read_json(&output);
        assert_eq!(schema["$schema"], "https://json-schema.org/draft/2020-12/schema");
        assert_eq!(schema["title"], "Web");
        assert_eq!(schema["description"], "Explicit");
        assert_eq!(schema["required"], serde_json::json!(["name"]));
        assert!(schema["properties"]["name"].get("examples").is_none());
    }

    #[test]
    fn test_no_descriptions_flag() {
        let dir = workspace("# Replicas\nreplicas: 2\nimage:\n  repository: nginx\n  tag: latest\n");
        let values = dir.path().join("values.yaml");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", "-", "--no-descriptions"]);

        assert!(result.status.success());
        let schema: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
        assert!(schema.get("description").is_none());
        assert!(schema["properties"]["replicas"].get("description").is_none());
        assert!(schema["properties"]["image"]["properties"].get("pullPolicy").is_none());
    }

    #[test]
    fn test_config_file_with_flag_override() {
        let dir = workspace("name: web\nport: null\n");
        let values = dir.path().join("values.yaml");
        let config = dir.path().join("helmschema.yaml");
        fs::write(&config, "title: From Config\nrequireByDefault: true\nschemaVersion: 2019-09\n").unwrap();

        let result = helmschema(&[
            "generate",
            "-f",
            path_str(&values),
            "-o",
            "-",
            "--config",
            path_str(&config),
            "--title",
            "From Flag",
        ]);

        assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
        let schema: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
        assert_eq!(schema["title"], "From Flag");
        assert_eq!(schema["$schema"], "https://json-schema.org/draft/2019-09/schema");
        assert_eq!(schema["required"], serde_json::json!(["name"]));
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let dir = workspace("name: web\n");
        let values = dir.path().join("values.yaml");
        let config = dir.path().join("absent.yaml");

        let result = helmschema(&[
            "generate",
            "-f",
            path_str(&values),
            "-o",
            "-",
            "--config",
            path_str(&config),
        ]);

        assert_eq!(result.status.code(), Some(5));
    }

    #[test]
    fn test_validate_prints_report() {
        let dir = workspace(CHART_VALUES);
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("values.schema.json");

        let result = helmschema(&[
            "generate",
            "-f",
            path_str(&values),
            "-o",
            path_str(&output),
            "--validate",
        ]);

        assert!(result.status.success());
        let stdout = String::from_utf8_lossy(&result.stdout);
        assert!(stdout.contains("Helm best practices"));
        assert!(stdout.contains("Found"));
        assert!(stdout.contains("WARNINGS:"));
    }

    #[test]
    fn test_strict_fails_after_writing() {
        let dir = workspace("app:\n  pull_policy: Always\n");
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("values.schema.json");

        let result = helmschema(&[
            "generate",
            "-f",
            path_str(&values),
            "-o",
            path_str(&output),
            "--strict",
        ]);

        assert_eq!(result.status.code(), Some(2));
        assert!(output.exists(), "schema is written before linting");
        assert!(String::from_utf8_lossy(&result.stdout).contains("app.pull_policy"));
    }

    #[test]
    fn test_strict_passes_without_errors() {
        let dir = workspace("app:\n  pullPolicy: Always\n");
        let values = dir.path().join("values.yaml");

        let result = helmschema(&["generate", "-f", path_str(&values), "-o", "-", "--strict"]);

        assert!(result.status.success());
        // The report goes to stderr when stdout carries the schema
        serde_json::from_slice::<serde_json::Value>(&result.stdout).unwrap();
        assert!(String::from_utf8_lossy(&result.stderr).contains("Found"));
    }
}

mod lint_command {
    use super::*;

    const SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "app": {
      "type": "object",
      "description": "Application",
      "properties": {
        "pull_policy": { "type": "string", "description": "Policy", "default": "Always" },
        "replicas": { "type": "integer" }
      }
    },
    "hosts": { "type": "array", "description": "Hosts" }
  }
}"#;

    fn schema_file(content: &str) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.schema.json");
        fs::write(&path, content).unwrap();
        let path = path_str(&path).to_string();
        (dir, path)
    }

    #[test]
    fn test_lint_reports_issues() {
        let (_dir, path) = schema_file(SCHEMA);

        let result = helmschema(&["lint", &path]);

        assert!(result.status.success(), "lint is non-blocking without --strict");
        let stdout = String::from_utf8_lossy(&result.stdout);
        assert!(stdout.contains("Found 4 issues: 1 errors, 2 warnings, 1 info"));
        assert!(stdout.contains("Lint failed"));
    }

    #[test]
    fn test_lint_strict_exit_code() {
        let (_dir, path) = schema_file(SCHEMA);
        let result = helmschema(&["lint", &path, "--strict"]);
        assert_eq!(result.status.code(), Some(2));
    }

    #[test]
    fn test_lint_json_output() {
        let (_dir, path) = schema_file(SCHEMA);

        let result = helmschema(&["lint", &path, "--json"]);

        let diagnostics: serde_json::Value =
            serde_json::from_slice(&result.stdout).expect("Output should be valid JSON");
        let diagnostics = diagnostics.as_array().unwrap();
        assert_eq!(diagnostics.len(), 4);
        assert_eq!(diagnostics[0]["path"], "app.pull_policy");
        assert_eq!(diagnostics[0]["severity"], "error");
    }

    #[test]
    fn test_lint_clean_schema() {
        let (_dir, path) = schema_file(r#"{"type": "object", "properties": {}}"#);

        let result = helmschema(&["lint", &path]);

        assert!(result.status.success());
        assert!(String::from_utf8_lossy(&result.stdout).contains("No validation issues found."));
    }

    #[test]
    fn test_lint_missing_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let result = helmschema(&["lint", path_str(&path)]);
        assert_eq!(result.status.code(), Some(5));
    }

    #[test]
    fn test_lint_invalid_json() {
        let (_dir, path) = schema_file("{ not json");
        let result = helmschema(&["lint", &path]);
        assert_eq!(result.status.code(), Some(1));
    }

    #[test]
    fn test_generate_then_lint_roundtrip() {
        let dir = workspace(CHART_VALUES);
        let values = dir.path().join("values.yaml");
        let output = dir.path().join("values.schema.json");

        let generated = helmschema(&["generate", "-f", path_str(&values), "-o", path_str(&output)]);
        assert!(generated.status.success());

        let result = helmschema(&["lint", path_str(&output), "--json"]);
        assert!(result.status.success());
        let diagnostics: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
        assert!(
            diagnostics
                .as_array()
                .unwrap()
                .iter()
                .all(|d| d["severity"] != "error")
        );
    }
}
