//! End-to-end tests of the text report.

use rstest::rstest;

use presentsim_app::AppError;
use presentsim_core::ConfigError;

fn run_to_string(args: &[&str]) -> Result<String, AppError> {
    let argv: Vec<String> = std::iter::once("presentsim")
        .chain(args.iter().copied())
        .map(String::from)
        .collect();
    let mut out = Vec::new();
    presentsim_app::run(&argv, &mut out)?;
    Ok(String::from_utf8(out).expect("report is UTF-8"))
}

#[test]
fn identical_arguments_give_identical_output() {
    let args = ["--buffer_count", "2", "--swapchain_count", "3", "--gpu_time", "12"];
    let first = run_to_string(&args).unwrap();
    let second = run_to_string(&args).unwrap();
    assert_eq!(first, second);
}

#[test]
fn minimal_pipeline_report() {
    let text = run_to_string(&[
        "--buffer_count=1",
        "--swapchain_count=2",
        "--vblank_interval=4",
        "--cpu_time=1",
        "--cpu_time_variance=0",
        "--gpu_time=1",
        "--gpu_time_variance=0",
        "--num_ticks=5",
    ])
    .unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "RUN WITH SETTINGS:");
    assert!(lines[1].starts_with("presentsim --buffer_count=1 "));
    assert_eq!(lines[2], "");
    assert_eq!(
        lines[3],
        "FRAME PRESENTED! t = 4; timeStart = 0; worst_case_lag = 4; mspf = 1;  fps = 1000.00"
    );
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Summary:");
    assert_eq!(lines[6], "Total VBLANKs hits = 1; missed = 0");
}

#[test]
fn one_record_per_vblank() {
    let text = run_to_string(&["--num_ticks", "1000", "--vblank_interval", "16"]).unwrap();
    let records = text
        .lines()
        .filter(|line| line.starts_with("FRAME PRESENTED!") || line.starts_with("VBLANK MISSED!"))
        .count();
    assert_eq!(records, 62);
}

#[test]
fn zero_vblank_interval_is_rejected() {
    let mut out = Vec::new();
    let argv = ["presentsim", "--vblank_interval", "0"].map(String::from);
    let err = presentsim_app::run(&argv, &mut out).unwrap_err();

    assert!(matches!(err, AppError::Config(ConfigError::ZeroVblankInterval)));
    assert!(out.is_empty());
}

#[rstest]
#[case::non_numeric(&["--vblank_interval", "often"])]
#[case::negative(&["--vblank_interval", "-16"])]
fn unparsable_vblank_reads_as_zero(#[case] args: &[&str]) {
    assert!(matches!(
        run_to_string(args),
        Err(AppError::Config(ConfigError::ZeroVblankInterval))
    ));
}

#[rstest]
#[case::buffers_too_low(&["--buffer_count", "0"], &["--buffer_count", "1"])]
#[case::buffers_too_high(&["--buffer_count", "64"], &["--buffer_count", "16"])]
#[case::swapchains_too_low(&["--swapchain_count", "1"], &["--swapchain_count", "2"])]
fn clamped_values_match_their_bound(#[case] raw: &[&str], #[case] clamped: &[&str]) {
    let strip_banner = |text: String| text.lines().skip(2).collect::<Vec<_>>().join("\n");
    assert_eq!(
        strip_banner(run_to_string(raw).unwrap()),
        strip_banner(run_to_string(clamped).unwrap())
    );
}

#[test]
fn unknown_option_is_ignored() {
    let text = run_to_string(&["--refresh_rate", "60", "--num_ticks", "40"]).unwrap();
    assert!(text.starts_with("RUN WITH SETTINGS:\npresentsim --refresh_rate 60 --num_ticks 40 \n"));
    assert!(text.contains("Summary:"));

    let body = |text: String| text.lines().skip(2).collect::<Vec<_>>().join("\n");
    assert_eq!(body(text), body(run_to_string(&["--num_ticks", "40"]).unwrap()));
}

#[test]
fn repeated_option_keeps_last_value() {
    let text = run_to_string(&["--num_ticks", "20", "--num_ticks", "40"]).unwrap();
    let records = text
        .lines()
        .filter(|line| line.starts_with("FRAME PRESENTED!") || line.starts_with("VBLANK MISSED!"))
        .count();
    assert_eq!(records, 2);
}

#[test]
fn help_is_reported_through_clap() {
    assert!(matches!(run_to_string(&["--help"]), Err(AppError::Cli(_))));
}
