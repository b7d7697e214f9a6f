//! Command line arguments.
//!
//! Uses clap for parsing, with help text (`--help`) and snake_case option
//! names (`--vblank_interval 16`, `--buffer_count=2`, ...).
//!
//! Numeric values are parsed leniently, like C's `atoi`: leading whitespace
//! and a sign are accepted, parsing stops at the first non-digit, text without
//! digits reads as 0 and negative values read as 0. Out-of-range values are
//! clamped later by [`SimConfig::normalized`].
//!
//! Mistakes on the command line never stop a run. Unknown options, stray
//! positional arguments and options missing their value are logged and
//! dropped, a repeated option keeps its last value, and a long option may be
//! shortened to any unambiguous prefix (`--vblank 8`).

use clap::{CommandFactory, Parser};
use presentsim_core::SimConfig;
use presentsim_core::config::{MAX_BUFFERS, MIN_SWAPCHAINS};

/// Parse the leading integer of `text`, never failing.
///
/// # Example
///
/// ```
/// use presentsim_app::parse_lenient;
///
/// assert_eq!(parse_lenient("16"), Ok(16));
/// assert_eq!(parse_lenient(" 12ms"), Ok(12));
/// assert_eq!(parse_lenient("fast"), Ok(0));
/// assert_eq!(parse_lenient("-3"), Ok(0));
/// ```
pub fn parse_lenient(text: &str) -> Result<u64, String> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        });

    if negative && value != 0 {
        log::warn!("negative value '{}' treated as 0", text);
        return Ok(0);
    }
    Ok(value)
}

/// presentsim command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "presentsim",
    about = "Presentation pipeline simulator",
    long_about = "Simulates a CPU, a single GPU queue, a ring of fenced buffers and a \
        swapchain presenting at a fixed vblank interval, then reports presentation \
        lag and frame-time statistics.\n\n\
        One tick is treated as one millisecond.\n\n\
        EXAMPLES:\n\
          # Double buffering with a slow GPU\n\
          presentsim --buffer_count 2 --swapchain_count 3 --gpu_time 20\n\
        \n\
          # Jitter-free run for reproducing a trace\n\
          presentsim --cpu_time_variance 0 --gpu_time_variance 0 --num_ticks 200",
    version,
    args_override_self = true
)]
pub struct CliArgs {
    /// Ticks between presentation opportunities.
    #[arg(long = "vblank_interval", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub vblank_interval: Option<u64>,

    /// Number of CPU-writable buffers, clamped to [1, 16].
    #[arg(long = "buffer_count", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub buffer_count: Option<u64>,

    /// Number of swapchain images, at least 2.
    #[arg(long = "swapchain_count", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub swapchain_count: Option<u64>,

    /// Nominal CPU duration per frame.
    #[arg(long = "cpu_time", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub cpu_time: Option<u64>,

    /// Symmetric jitter bound for the CPU duration.
    #[arg(long = "cpu_time_variance", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub cpu_time_variance: Option<u64>,

    /// Nominal GPU duration per frame.
    #[arg(long = "gpu_time", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub gpu_time: Option<u64>,

    /// Symmetric jitter bound for the GPU duration.
    #[arg(long = "gpu_time_variance", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub gpu_time_variance: Option<u64>,

    /// Total ticks to simulate.
    #[arg(long = "num_ticks", value_parser = parse_lenient, allow_hyphen_values = true)]
    pub num_ticks: Option<u64>,
}

/// Parse `argv` (program name first) into [`CliArgs`].
///
/// Only `--help` and `--version` end in an `Err`, carrying the text clap
/// prints for them.
pub fn parse_args(argv: &[String]) -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse_from(sanitize_argv(argv))
}

enum LongOption<'a> {
    Known { name: &'a str, takes_value: bool },
    Ambiguous,
    Unknown,
}

fn known_longs() -> Vec<(String, bool)> {
    let command = CliArgs::command();
    let mut longs: Vec<(String, bool)> = command
        .get_arguments()
        .filter_map(|arg| {
            arg.get_long()
                .map(|long| (long.to_string(), arg.get_action().takes_values()))
        })
        .collect();
    // Generated when the command is built, so absent from the raw definition.
    for flag in ["help", "version"] {
        if !longs.iter().any(|(name, _)| name == flag) {
            longs.push((flag.to_string(), false));
        }
    }
    longs
}

fn known((long, takes_value): &(String, bool)) -> LongOption<'_> {
    LongOption::Known {
        name: long.as_str(),
        takes_value: *takes_value,
    }
}

fn resolve<'a>(longs: &'a [(String, bool)], name: &str) -> LongOption<'a> {
    if let Some(exact) = longs.iter().find(|(long, _)| long == name) {
        return known(exact);
    }
    if name.is_empty() {
        return LongOption::Unknown;
    }
    let mut candidates = longs.iter().filter(|(long, _)| long.starts_with(name));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => known(only),
        (Some(_), Some(_)) => LongOption::Ambiguous,
        _ => LongOption::Unknown,
    }
}

/// Rewrite `argv` into a form clap accepts without complaint.
///
/// Known options are expanded to their full name, everything else is
/// reported through `log::warn!` and removed.
fn sanitize_argv(argv: &[String]) -> Vec<String> {
    let longs = known_longs();
    let mut kept = Vec::with_capacity(argv.len());
    let mut tokens = argv.iter();
    if let Some(program) = tokens.next() {
        kept.push(program.clone());
    }

    while let Some(token) = tokens.next() {
        if token == "--" {
            for rest in tokens.by_ref() {
                log::warn!("ignoring non-option argument '{}'", rest);
            }
            break;
        }

        let Some(body) = token.strip_prefix("--") else {
            if token == "-h" || token == "-V" {
                kept.push(token.clone());
            } else if token.len() > 1 && token.starts_with('-') {
                log::warn!("ignoring invalid option '{}'", token);
            } else {
                log::warn!("ignoring non-option argument '{}'", token);
            }
            continue;
        };

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        match (resolve(&longs, name), inline) {
            (LongOption::Known { name, takes_value: false }, None) => {
                kept.push(format!("--{name}"));
            }
            (LongOption::Known { name, takes_value: false }, Some(_)) => {
                log::warn!("option '--{}' doesn't allow an argument, ignoring it", name);
            }
            (LongOption::Known { name, takes_value: true }, Some(value)) => {
                kept.push(format!("--{name}={value}"));
            }
            (LongOption::Known { name, takes_value: true }, None) => match tokens.next() {
                Some(value) => {
                    kept.push(format!("--{name}"));
                    kept.push(value.clone());
                }
                None => log::warn!("option '--{}' requires an argument, ignoring it", name),
            },
            (LongOption::Ambiguous, _) => {
                log::warn!("ignoring ambiguous option '{}'", token);
            }
            (LongOption::Unknown, _) => {
                log::warn!("ignoring unrecognized option '{}'", token);
            }
        }
    }
    kept
}

impl From<CliArgs> for SimConfig {
    fn from(args: CliArgs) -> Self {
        let defaults = SimConfig::default();
        let count = |value: Option<u64>, default: usize| {
            value.map_or(default, |v| usize::try_from(v).unwrap_or(usize::MAX))
        };

        if let Some(requested) = args.buffer_count
            && !(1..=MAX_BUFFERS as u64).contains(&requested)
        {
            log::warn!(
                "--buffer_count {} is outside [1, {}] and will be clamped",
                requested,
                MAX_BUFFERS
            );
        }
        if let Some(requested) = args.swapchain_count
            && requested < MIN_SWAPCHAINS as u64
        {
            log::warn!(
                "--swapchain_count {} is below {} and will be raised",
                requested,
                MIN_SWAPCHAINS
            );
        }

        Self {
            vblank_interval: args.vblank_interval.unwrap_or(defaults.vblank_interval),
            buffer_count: count(args.buffer_count, defaults.buffer_count),
            swapchain_count: count(args.swapchain_count, defaults.swapchain_count),
            cpu_time: args.cpu_time.unwrap_or(defaults.cpu_time),
            cpu_time_variance: args
                .cpu_time_variance
                .unwrap_or(defaults.cpu_time_variance),
            gpu_time: args.gpu_time.unwrap_or(defaults.gpu_time),
            gpu_time_variance: args
                .gpu_time_variance
                .unwrap_or(defaults.gpu_time_variance),
            num_ticks: args.num_ticks.unwrap_or(defaults.num_ticks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("17", 17)]
    #[case("  8", 8)]
    #[case("+5", 5)]
    #[case("12abc", 12)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("-4", 0)]
    #[case("-0", 0)]
    #[case("99999999999999999999999", u64::MAX)]
    fn test_parse_lenient(#[case] text: &str, #[case] expected: u64) {
        assert_eq!(parse_lenient(text), Ok(expected));
    }

    #[test]
    fn test_no_args_gives_defaults() {
        let args = CliArgs::try_parse_from(["presentsim"]).unwrap();
        assert_eq!(SimConfig::from(args), SimConfig::default());
    }

    #[test]
    fn test_all_options() {
        let args = CliArgs::try_parse_from([
            "presentsim",
            "--vblank_interval",
            "8",
            "--buffer_count=2",
            "--swapchain_count",
            "3",
            "--cpu_time",
            "5",
            "--cpu_time_variance",
            "1",
            "--gpu_time",
            "9",
            "--gpu_time_variance",
            "0",
            "--num_ticks",
            "250",
        ])
        .unwrap();

        let config = SimConfig::from(args);
        assert_eq!(
            config,
            SimConfig::default()
                .with_vblank_interval(8)
                .with_buffer_count(2)
                .with_swapchain_count(3)
                .with_cpu_time(5, 1)
                .with_gpu_time(9, 0)
                .with_num_ticks(250)
        );
    }

    #[test]
    fn test_malformed_values_are_soft() {
        let args = CliArgs::try_parse_from([
            "presentsim",
            "--buffer_count",
            "-2",
            "--gpu_time",
            "slow",
        ])
        .unwrap();

        let config = SimConfig::from(args).normalized();
        assert_eq!(config.buffer_count, 1);
        assert_eq!(config.gpu_time, 0);
    }

    fn parse(args: &[&str]) -> CliArgs {
        let argv: Vec<String> = std::iter::once("presentsim")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(&argv).unwrap()
    }

    #[test]
    fn test_unknown_options_are_dropped() {
        let args = parse(&["--frames", "3", "--num_ticks", "40", "-x", "stray"]);
        assert_eq!(args.num_ticks, Some(40));
        assert_eq!(
            SimConfig::from(args),
            SimConfig::default().with_num_ticks(40)
        );
    }

    #[test]
    fn test_last_occurrence_wins() {
        let args = parse(&["--num_ticks", "20", "--num_ticks", "40"]);
        assert_eq!(args.num_ticks, Some(40));

        let args = parse(&["--gpu_time=9", "--gpu_time", "3"]);
        assert_eq!(args.gpu_time, Some(3));
    }

    #[rstest]
    #[case::unique_prefix(&["--vblank", "8"], Some(8))]
    #[case::prefix_with_equals(&["--vbl=12"], Some(12))]
    #[case::exact_name(&["--vblank_interval", "4"], Some(4))]
    fn test_prefixes_resolve(#[case] args: &[&str], #[case] expected: Option<u64>) {
        assert_eq!(parse(args).vblank_interval, expected);
    }

    #[test]
    fn test_exact_name_beats_longer_option() {
        let args = parse(&["--cpu_time", "5", "--cpu_time_v", "1"]);
        assert_eq!(args.cpu_time, Some(5));
        assert_eq!(args.cpu_time_variance, Some(1));
    }

    #[test]
    fn test_ambiguous_prefix_is_dropped() {
        let args = parse(&["--cpu", "5", "--num_ticks", "10"]);
        assert_eq!(args.cpu_time, None);
        assert_eq!(args.cpu_time_variance, None);
        assert_eq!(args.num_ticks, Some(10));
    }

    #[test]
    fn test_missing_value_is_dropped() {
        let args = parse(&["--buffer_count", "2", "--num_ticks"]);
        assert_eq!(args.buffer_count, Some(2));
        assert_eq!(args.num_ticks, None);
    }

    #[test]
    fn test_help_still_reported() {
        let argv = ["presentsim", "--help"].map(String::from);
        let err = parse_args(&argv).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
