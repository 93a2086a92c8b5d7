use crate::integration::test_utils::{ScriptedClient, ONE_PIXEL_PNG};
use angleshot::angle::{select_angles, CAMERA_ANGLES};
use angleshot::error::ApiError;
use angleshot::generation::GenerationExecutor;
use angleshot::pipeline::to_data_uri;
use angleshot::source::SourceImage;
use std::collections::HashMap;
use std::sync::Arc;

fn source() -> SourceImage {
    SourceImage::from_bytes(ONE_PIXEL_PNG.to_vec()).unwrap()
}

#[tokio::test]
async fn three_angles_with_echo_describe_and_fixed_render() {
    let client = Arc::new(ScriptedClient::default());
    let executor = GenerationExecutor::new(client.clone());
    let angles = select_angles(&CAMERA_ANGLES, 3).unwrap();

    let mut percents = Vec::new();
    let results = executor
        .generate_all(&source(), &angles, |u| percents.push(u.percent))
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    let expected_uri = to_data_uri(ONE_PIXEL_PNG, "image/png");
    for (result, angle) in results.iter().zip(&angles) {
        assert_eq!(result.image_data, expected_uri);
        assert_eq!(result.angle_name, angle.display_name);
    }
    assert_eq!(percents, vec![33, 67, 100]);

    // describe echoes its input, so render saw each angle's seed as the prompt
    let mut rendered = client.render_calls.lock().clone();
    rendered.sort();
    let mut seeds: Vec<_> = angles.iter().map(|a| a.prompt_seed.to_string()).collect();
    seeds.sort();
    assert_eq!(rendered, seeds);
}

#[tokio::test]
async fn order_is_preserved_when_completion_is_reversed() {
    let angles = CAMERA_ANGLES.to_vec();
    let render_delay_ms = angles
        .iter()
        .enumerate()
        .map(|(i, a)| (a.prompt_seed, 5 * (angles.len() - i) as u64))
        .collect::<HashMap<_, _>>();
    let client = Arc::new(ScriptedClient {
        render_delay_ms,
        ..Default::default()
    });
    let executor = GenerationExecutor::new(client.clone());

    let mut progress = Vec::new();
    let results = executor
        .generate_all(&source(), &angles, |u| progress.push(u))
        .await
        .unwrap();

    let names: Vec<_> = results.iter().map(|r| r.angle_name.as_str()).collect();
    let expected: Vec<_> = angles.iter().map(|a| a.display_name).collect();
    assert_eq!(names, expected);

    assert!(progress.windows(2).all(|w| w[0].percent <= w[1].percent));
    assert_eq!(progress.last().map(|u| u.percent), Some(100));
    assert_eq!(progress.iter().filter(|u| u.percent == 100).count(), 1);
    assert_eq!(progress.first().map(|u| u.angle_name.as_str()), expected.last().copied());
}

#[tokio::test]
async fn describe_failure_on_second_of_four_traces_to_that_angle() {
    let angles = CAMERA_ANGLES[..4].to_vec();
    let client = Arc::new(ScriptedClient {
        fail_describe_for: Some(angles[1].prompt_seed),
        ..Default::default()
    });
    let executor = GenerationExecutor::new(client);

    let err = executor
        .generate_all(&source(), &angles, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::BatchFailed { index: 1, .. }));
    assert_eq!(err.failed_angle(), Some(angles[1].display_name));
    assert!(!err.is_validation());
    match &err {
        ApiError::BatchFailed { source, .. } => {
            assert!(matches!(**source, ApiError::DescribeFailed { .. }));
            assert_eq!(source.failed_angle(), Some(angles[1].display_name));
        }
        other => panic!("expected BatchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_render_payload_fails_without_partial_results() {
    let angles = CAMERA_ANGLES[2..7].to_vec();
    let client = Arc::new(ScriptedClient {
        empty_render_for: Some(angles[3].prompt_seed),
        ..Default::default()
    });
    let executor = GenerationExecutor::new(client);

    let mut last_percent = 0;
    let outcome = executor
        .generate_all(&source(), &angles, |u| last_percent = u.percent)
        .await;

    let err = outcome.unwrap_err();
    assert!(matches!(err, ApiError::BatchFailed { index: 3, .. }));
    assert!(matches!(err.root_cause(), ApiError::MissingImage));
    assert!(last_percent < 100);
}
