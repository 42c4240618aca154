use pgate_domain::config::LoggingConfig;
use pgate_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        console: false,
        directory: Some(log_dir.clone()),
        json: true,
        ..LoggingConfig::default()
    };
    let logger = Logger::from_config("integration-file-logging", &config)?;
    assert!(logger.guard().is_some());

    tracing::info!(profile = "a2dp", "Adding profile");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().next().expect("one log line");
    assert!(line.starts_with('{'), "file output should be JSON: {line}");
    assert!(line.contains("Adding profile"));
    assert!(line.contains("a2dp"));

    Ok(())
}
