//! Plain-text run report.
//!
//! The report goes to stdout and contains only simulation results, so two
//! runs with the same arguments produce byte-identical output. Diagnostics go
//! through `log` to stderr instead.

use std::io::{self, Write};

use presentsim_core::{Summary, VblankEvent};

/// Echo the invocation.
pub fn write_banner<W: Write>(out: &mut W, argv: &[String]) -> io::Result<()> {
    writeln!(out, "RUN WITH SETTINGS:")?;
    for arg in argv {
        write!(out, "{arg} ")?;
    }
    writeln!(out)?;
    writeln!(out)
}

/// Write one vblank record.
pub fn write_event<W: Write>(out: &mut W, event: &VblankEvent) -> io::Result<()> {
    match event {
        VblankEvent::Presented(frame) => writeln!(
            out,
            "FRAME PRESENTED! t = {}; timeStart = {}; worst_case_lag = {}; mspf = {};  fps = {:.2}",
            frame.tick,
            frame.cpu_start,
            frame.lag,
            frame.frame_time,
            frame.fps()
        ),
        VblankEvent::Missed { tick } => writeln!(out, "VBLANK MISSED! t = {tick}"),
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Write the summary block.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(
        out,
        "Total VBLANKs hits = {}; missed = {}",
        summary.hits, summary.misses
    )?;
    writeln!(
        out,
        "Avg MSPF = {}ms;\tStd Dev MSPF = {}ms;\tAvg FPS   = {} FPS",
        fmt_stat(summary.frame_time.map(|s| s.mean)),
        fmt_stat(summary.frame_time.map(|s| s.std_dev)),
        fmt_stat(summary.avg_fps())
    )?;
    writeln!(
        out,
        "Avg Lag  = {}ms;\tStd Dev Lag  = {}ms;\tWorst Lag = {}ms",
        fmt_stat(summary.lag.map(|s| s.mean)),
        fmt_stat(summary.lag.map(|s| s.std_dev)),
        summary.worst_lag()
    )?;
    writeln!(out, "{}", "=".repeat(74))
}
