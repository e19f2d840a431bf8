//! Handles the end-of-run console summary.
//!
//! Colors are applied only when stdout is a terminal.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{runner::RunReport, stats::Stats};

/// Chooses a color mode from whether stdout is a terminal.
pub fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints per-category and overall pass counts.
pub fn print_summary(report: &RunReport) {
    let mut stdout = StandardStream::stdout(color_choice());
    let _ = write_summary(&mut stdout, report);
    let _ = stdout.reset();
}

/// Writes the summary to any color-capable sink.
pub fn write_summary<W: WriteColor>(out: &mut W, report: &RunReport) -> io::Result<()> {
    for category in &report.categories {
        write_stats_line(out, &category.name, &category.stats)?;
    }

    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "\nCompatibility Summary")?;
    out.reset()?;
    writeln!(out, "═════════════════════")?;
    write_stats_line(out, "total", &report.global)?;

    if !report.reasons.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(out, "{} distinct bypass/diff reasons", report.reasons.len())?;
        out.reset()?;
    }
    Ok(())
}

fn write_stats_line<W: WriteColor>(out: &mut W, label: &str, stats: &Stats) -> io::Result<()> {
    let color = if stats.failed == 0 {
        Color::Green
    } else {
        Color::Yellow
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "{:<16}", label)?;
    out.reset()?;
    writeln!(
        out,
        " {:>4}/{:<4} passed ({}%), {} bypassed, {} failed",
        stats.passed(),
        stats.total,
        stats.passed_ratio(),
        stats.bypass,
        stats.failed
    )
}
