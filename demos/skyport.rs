use daikin_skyport::{DaikinClientBuilder, MessageLogMode, Mode, SetpointRequest};
use std::env;

const USAGE: &str = "usage: skyport devices
       skyport info <device-id>
       skyport mode <device-id> <off|heat|cool|auto|emergency-heat>
       skyport temp <device-id> [--cool <C>] [--heat <C>]
       skyport raw <device-id> <json>
credentials come from DAIKIN_EMAIL / DAIKIN_PASSWORD; set DAIKIN_LOG to write a message log";

fn usage() -> ! {
    eprintln!("{USAGE}");
    std::process::exit(2);
}

fn flag(args: &[String], name: &str) -> Option<f64> {
    let i = args.iter().position(|a| a == name)?;
    match args.get(i + 1).map(|v| v.parse::<f64>()) {
        Some(Ok(value)) => Some(value),
        _ => {
            eprintln!("{name} needs a number");
            usage();
        }
    }
}

#[tokio::main]
async fn main() -> daikin_skyport::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or_else(|| usage());
    let device_id = || args.get(1).map(String::as_str).unwrap_or_else(|| usage());
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or_else(|| usage());

    let mut builder = DaikinClientBuilder::from_env()?;
    if let Ok(path) = env::var("DAIKIN_LOG") {
        builder = builder.message_log(MessageLogMode::Diffed, path);
    }
    let client = builder.build()?;

    match command {
        "devices" => {
            for device in client.devices().await? {
                println!(
                    "{}  {}  {} (fw {})",
                    device.id, device.name, device.model, device.firmware_version
                );
            }
        }
        "info" => {
            let info = client.device_info(device_id()).await?;
            println!(
                "mode: {:?} | status: {:?} | cool {:.1}\u{00b0}C / heat {:.1}\u{00b0}C | range {:.1}..{:.1} (delta {:.1})",
                info.mode,
                info.equipment_status,
                info.csp_home,
                info.hsp_home,
                info.temp_sp_min,
                info.temp_sp_max,
                info.temp_delta_min,
            );
            if let Some(indoor) = info.temp_indoor {
                println!("Indoor: {indoor:.1}\u{00b0}C");
            }
            if let Some(outdoor) = info.temp_outdoor {
                println!("Outdoor: {outdoor:.1}\u{00b0}C");
            }
        }
        "mode" => {
            let Some(mode) = Mode::from_name(arg(2)) else {
                eprintln!("unknown mode: {}", arg(2));
                usage();
            };
            client.set_mode(device_id(), mode).await?;
            println!("mode set to {mode:?}");
        }
        "temp" => {
            let request = SetpointRequest::new(flag(&args, "--cool"), flag(&args, "--heat"));
            let plan = client.set_temp(device_id(), request).await?;
            println!("setpoints submitted: {plan}");
        }
        "raw" => {
            client.update_device_raw(device_id(), arg(2)).await?;
            println!("update sent");
        }
        _ => usage(),
    }

    Ok(())
}
