mod support;

use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_full_shot_over_http() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let status = support::wait_for_state(&client, base_url, "AwaitingLaunch").await;
    assert_eq!(status["prompt"], "Tap the screen to start");

    let res = client
        .post(format!("{base_url}/input/primary"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::ACCEPTED);

    let status = support::wait_for_state(&client, base_url, "Active").await;
    assert_eq!(status["prompt"], "Pull back and release to launch");

    let res = client
        .post(format!("{base_url}/input/release"))
        .json(&json!({ "velocity": { "x": 8.0, "y": 2.0 } }))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::ACCEPTED);

    // Keep reporting a resting projectile until the controller notices.
    let rest = json!({
        "bodies": [{
            "id": 1,
            "position": { "x": 4.0, "y": -3.0 },
            "velocity": { "x": 0.0, "y": 0.0 }
        }],
        "destroyed": [10]
    });
    let mut settled = false;
    for _ in 0..100 {
        client
            .post(format!("{base_url}/physics"))
            .json(&rest)
            .send()
            .await
            .expect("request should succeed");
        tokio::time::sleep(Duration::from_millis(30)).await;

        let status: serde_json::Value = client
            .get(format!("{base_url}/status"))
            .send()
            .await
            .expect("status request should succeed")
            .json()
            .await
            .expect("status should be json");
        if status["state"] != "Active" {
            settled = true;
            break;
        }
    }
    assert!(settled, "shot never settled");

    // Two targets remain, so the next projectile waits for input.
    support::wait_for_state(&client, base_url, "AwaitingLaunch").await;
}

#[tokio::test]
async fn test_malformed_release_is_rejected() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base_url}/input/release"))
        .json(&json!({ "speed": 3 }))
        .send()
        .await
        .expect("request should succeed");

    assert!(res.status().is_client_error());
}
