//! Integration tests for the `example run` command.
use tempfile::tempdir;
use vehicle_tco::cli::example::handle_example_run_command;
use vehicle_tco::settings::Settings;

/// An integration test for the `example run` command.
#[test]
fn test_handle_example_run_command() {
    unsafe { std::env::set_var("VEHICLE_TCO_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    let output_dir = tempdir.path().join("small_commuter");
    handle_example_run_command(
        "small_commuter",
        Some(output_dir.clone()),
        false,
        Some(Settings::default()),
    )
    .unwrap();

    assert!(output_dir.join("summary.csv").is_file());
    assert!(!output_dir.join("debug_expenses.csv").exists());
}
