use daikin_skyport::{DaikinClientBuilder, SetpointRequest};

/// Run with: cargo test --test integration -- --ignored
/// Requires a real account:
///   DAIKIN_EMAIL=... DAIKIN_PASSWORD=... [DAIKIN_DEVICE_ID=...]
#[tokio::test]
#[ignore]
async fn list_devices_and_read_state() {
    let client = DaikinClientBuilder::from_env()
        .expect("DAIKIN_EMAIL and DAIKIN_PASSWORD must be set")
        .build()
        .expect("client should build");

    let devices = client.devices().await.expect("devices failed");
    assert!(!devices.is_empty(), "account should have at least one device");

    let info = client
        .device_info(&devices[0].id)
        .await
        .expect("device info failed");
    assert!(info.temp_sp_min < info.temp_sp_max);
    assert!(info.temp_delta_min > 0.0);
}

/// Rewrites the current setpoints onto the device unchanged.
/// This still overrides the schedule.
#[tokio::test]
#[ignore]
async fn resubmit_current_setpoints() {
    let client = DaikinClientBuilder::from_env()
        .expect("DAIKIN_EMAIL and DAIKIN_PASSWORD must be set")
        .build()
        .expect("client should build");

    let device_id = match std::env::var("DAIKIN_DEVICE_ID") {
        Ok(id) => id,
        Err(_) => client.devices().await.expect("devices failed")[0].id.clone(),
    };

    let before = client.device_info(&device_id).await.expect("device info failed");
    let plan = client
        .set_temp(&device_id, SetpointRequest::default())
        .await
        .expect("set_temp failed");
    assert!(plan.cool - plan.heat >= before.temp_delta_min);
}
