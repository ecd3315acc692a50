//! `gdk component build` integration tests.

use std::fs::File;

use predicates::prelude::*;

use super::common::{TestEnv, read_json, recipe_json};

const EXPECTED_URI: &str = "s3://my-bucket/artifacts/com.example.HelloWorld/1.0.0/HelloWorld.zip";

#[test]
fn zip_build_stages_archive_and_recipe() {
  let env = TestEnv::zip_project();

  env
    .build_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"));

  let archive_path = env.artifacts_dir().join("HelloWorld.zip");
  assert!(archive_path.is_file());

  let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
  let names: Vec<&str> = archive.file_names().collect();
  assert!(names.contains(&"main.py"));
  assert!(!names.iter().any(|n| n.starts_with("greengrass-build")));
  assert!(!names.contains(&"gdk-config.json"));
  assert!(!names.contains(&"recipe.json"));

  let recipe = read_json(&env.built_recipe("recipe.json"));
  assert_eq!(recipe["Manifests"][0]["Artifacts"][0]["URI"], EXPECTED_URI);
  assert_eq!(recipe["ComponentPublisher"], "Amazon");
  assert_eq!(recipe["Manifests"][0]["Platform"]["os"], "linux");
}

#[test]
fn rebuild_replaces_previous_output() {
  let env = TestEnv::zip_project();
  env.write_file("greengrass-build/stale.txt", "old");

  env.build_cmd().assert().success();
  env.build_cmd().assert().success();

  assert!(!env.build_dir().join("stale.txt").exists());
  assert!(env.artifacts_dir().join("HelloWorld.zip").is_file());
}

#[test]
fn missing_artifact_fails_build() {
  let env = TestEnv::new(r#"{ "build_system": "zip" }"#, "recipe.json", &recipe_json("missing.py"));

  env
    .build_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "Failed to build the component with the given project configuration.",
    ))
    .stderr(predicate::str::contains("Could not find the artifact file specified in the recipe 'missing.py'"));

  assert!(!env.built_recipe("recipe.json").exists());
}

#[test]
fn yaml_recipe_is_written_as_yaml() {
  let recipe = r#"RecipeFormatVersion: '2020-01-25'
ComponentName: com.example.HelloWorld
Manifests:
  - Artifacts:
      - URI: s3://BUCKET_NAME/COMPONENT_NAME/COMPONENT_VERSION/HelloWorld.zip
      - URI: docker:public.ecr.aws/example/image:latest
"#;
  let env = TestEnv::new(r#"{ "build_system": "zip" }"#, "recipe.yaml", recipe);

  env.build_cmd().assert().success();

  let written = std::fs::read_to_string(env.built_recipe("recipe.yaml")).unwrap();
  assert!(written.contains(EXPECTED_URI));
  assert!(written.contains("docker:public.ecr.aws/example/image:latest"));
  assert!(!written.trim_start().starts_with('{'));
}

#[test]
fn force_zip_overrides_configured_build_system() {
  let env = TestEnv::new(r#"{ "build_system": "maven" }"#, "recipe.json", &recipe_json("HelloWorld.zip"));
  env.write_file("main.py", "print('hello')\n");

  env.build_cmd().arg("--force-zip").assert().success();

  assert!(env.artifacts_dir().join("HelloWorld.zip").is_file());
}

#[test]
fn json_output_reports_build_result() {
  let env = TestEnv::zip_project();

  let output = env.build_cmd().args(["--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["component"], "com.example.HelloWorld");
  assert_eq!(report["version"], "1.0.0");
  assert_eq!(report["build_system"], "zip");
  assert_eq!(report["artifacts_copied"].as_array().unwrap().len(), 1);
  assert_eq!(report["skipped_containers"], 0);
}

#[cfg(unix)]
#[test]
fn custom_build_runs_command_and_skips_recipe() {
  let env = TestEnv::new(
    r#"{ "build_system": "custom", "custom_build_command": ["sh", "-c", "touch custom-ran"] }"#,
    "recipe.json",
    &recipe_json("missing.py"),
  );

  env
    .build_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("custom build command"));

  assert!(env.project_dir.join("custom-ran").is_file());
  assert!(!env.built_recipe("recipe.json").exists());
}

#[cfg(unix)]
#[test]
fn failing_custom_command_reports_exit_code() {
  let env = TestEnv::new(
    r#"{ "build_system": "custom", "custom_build_command": ["sh", "-c", "exit 3"] }"#,
    "recipe.json",
    &recipe_json("missing.py"),
  );

  env
    .build_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Error building the component with the given build system."));
}
