use std::path::PathBuf;
use thermapp_calibration::{Connection, FileManagement, RequestBody, Session, ThermAppCloud};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <SerialNumber> [Host]", args[0]);
        println!("Example: cargo run --example download -- 12345 api.therm-app.com");
        return Ok(());
    }

    let serial = &args[1];
    let body = RequestBody::new()
        .with_field("serialNumber", serial.as_str())
        .with_field("calibType", "0")
        .with_field("appVersion", "2.6.25");

    // 1. Initialize the client
    let mut cloud = ThermAppCloud::new(body);
    if let Some(host) = args.get(2) {
        cloud = cloud.with_host(host)?;
    }

    // 2. Connect and open a session
    cloud.connect().await?;
    println!("Connected to {}", cloud.host());
    let session = cloud.session_start().await?;
    println!("Session {}", session);

    // 3. List and download
    let files = cloud.get_files_list(serial).await?;
    println!("Found {} files.", files.len());

    let target = PathBuf::from(serial);
    std::fs::create_dir_all(&target)?;

    for file in &files {
        let saved = cloud.download_file(file, &target).await?;
        match saved.modified {
            Some(at) => println!("{} ({} bytes, created {})", saved.name, saved.bytes, at),
            None => println!("{} ({} bytes)", saved.name, saved.bytes),
        }
    }

    // 4. Close
    cloud.session_end().await?;
    cloud.close().await?;
    println!("Done.");

    Ok(())
}
