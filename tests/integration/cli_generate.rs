use crate::integration::test_utils::{ScriptedClient, ONE_PIXEL_PNG};
use angleshot::cli::{map_error, Cli, Commands, RunContext, GENERATION_FAILED_MESSAGE};
use angleshot::config::AppConfig;
use angleshot::error::ApiError;
use clap::Parser;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn context(workspace: &Path, client: Arc<ScriptedClient>) -> RunContext {
    RunContext::with_config(workspace.to_path_buf(), AppConfig::default())
        .unwrap()
        .with_client(client)
}

fn generate(image: &str, count: usize, output: Option<&str>) -> Commands {
    let mut args = vec![
        "angleshot".to_string(),
        "generate".to_string(),
        image.to_string(),
        "--count".to_string(),
        count.to_string(),
    ];
    if let Some(output) = output {
        args.push("--output".to_string());
        args.push(output.to_string());
    }
    Cli::try_parse_from(args).unwrap().command
}

#[tokio::test]
async fn generate_writes_one_file_per_angle() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("me.png"), ONE_PIXEL_PNG).unwrap();
    let client = Arc::new(ScriptedClient::default());
    let ctx = context(temp.path(), client.clone());

    let output = ctx
        .execute(&generate("me.png", 10, Some("renders")))
        .await
        .unwrap();

    assert!(output.starts_with("Generated 10 image(s):"));
    let mut written: Vec<_> = fs::read_dir(temp.path().join("renders"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    written.sort();
    assert_eq!(written.len(), 10);
    assert!(written.contains(&"angleshot-1-클로즈업.png".to_string()));
    assert!(written.contains(&"angleshot-10-오버_더_숄더_샷.png".to_string()));
    assert_eq!(
        fs::read(temp.path().join("renders").join("angleshot-1-클로즈업.png")).unwrap(),
        ONE_PIXEL_PNG
    );
    assert_eq!(client.describe_calls.lock().len(), 10);
}

#[tokio::test]
async fn generate_json_reports_selected_angles() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("me.png"), ONE_PIXEL_PNG).unwrap();
    let ctx = context(temp.path(), Arc::new(ScriptedClient::default()));

    let command = Cli::try_parse_from([
        "angleshot", "generate", "me.png", "-n", "2", "--no-save", "--format", "json",
    ])
    .unwrap()
    .command;
    let output = ctx.execute(&command).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["selected_angles"].as_array().unwrap().len(), 2);
    assert_eq!(value["results"].as_array().unwrap().len(), 2);
    assert!(value["results"][0]["path"].is_null());
}

#[tokio::test]
async fn unsupported_file_is_rejected_before_any_remote_call() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("me.gif"), b"GIF89a........").unwrap();
    let client = Arc::new(ScriptedClient::default());
    let ctx = context(temp.path(), client.clone());

    let err = ctx.execute(&generate("me.gif", 3, None)).await.unwrap_err();
    assert!(err.is_validation());
    assert!(map_error(&err).contains("JPG or PNG"));
    assert!(client.describe_calls.lock().is_empty());
}

#[tokio::test]
async fn out_of_range_count_is_rejected_before_any_remote_call() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("me.png"), ONE_PIXEL_PNG).unwrap();
    let client = Arc::new(ScriptedClient::default());
    let ctx = context(temp.path(), client.clone());

    let err = ctx.execute(&generate("me.png", 11, None)).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::SelectionPrecondition { requested: 11, .. }
    ));
    assert!(client.describe_calls.lock().is_empty());
}

#[tokio::test]
async fn remote_failure_maps_to_generic_message_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("me.png"), ONE_PIXEL_PNG).unwrap();
    let client = Arc::new(ScriptedClient {
        empty_render_for: Some("Dutch angle"),
        ..Default::default()
    });
    let ctx = context(temp.path(), client);

    let err = ctx
        .execute(&generate("me.png", 10, Some("renders")))
        .await
        .unwrap_err();
    assert_eq!(map_error(&err), GENERATION_FAILED_MESSAGE);
    assert!(!temp.path().join("renders").exists());
}

#[tokio::test]
async fn angles_command_lists_catalog() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path(), Arc::new(ScriptedClient::default()));
    let command = Cli::try_parse_from(["angleshot", "angles", "--format", "json"])
        .unwrap()
        .command;

    let output = ctx.execute(&command).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 10);
    assert_eq!(value[7]["prompt_seed"], "Bird's-eye view");
}
