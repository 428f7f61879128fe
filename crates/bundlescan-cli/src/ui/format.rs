//! Formatting for durations, reports, plans and summaries.

use std::fmt::Write as _;
use std::time::Duration;

use bundlescan_graph::{Diagnostic, Diagnostics, DuplicateReport, GraphStatistics, PackingPlan};
use console::Term;
use owo_colors::{OwoColorize, Style};

use super::messages::paint;

/// Format duration in human-readable format.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bundlescan_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Render the duplicate report as plain text.
///
/// Issues are listed group → bundle → asset path, followed by the clusters
/// of assets that share the same bundle set.
pub fn render_report(report: &DuplicateReport) -> String {
    let mut out = String::new();
    if report.is_empty() {
        out.push_str("No duplicated assets found\n");
        return out;
    }

    let _ = writeln!(out, "Duplicated assets ({})", report.len());
    for (group, bundles) in report.issues_by_group() {
        let _ = writeln!(out, "\n{group}");
        for (bundle, assets) in bundles {
            let _ = writeln!(out, "  {bundle}");
            for asset in assets {
                let _ = writeln!(out, "    {asset}");
            }
        }
    }

    let _ = writeln!(out, "\nShared bundle sets ({})", report.clusters.len());
    for cluster in &report.clusters {
        let _ = writeln!(out, "  [{}]", cluster.bundles.join(", "));
        for asset in &cluster.assets {
            let _ = writeln!(out, "    {asset}");
        }
    }
    out
}

/// Print the duplicate report to stdout.
pub fn print_report(report: &DuplicateReport) {
    print!("{}", render_report(report));
}

/// Render the packing plan as plain text, one block per owning group.
pub fn render_plan(plan: &PackingPlan) -> String {
    let mut out = String::new();
    if plan.is_empty() {
        out.push_str("No bundle requests\n");
        return out;
    }

    for (group, bundles) in plan.group_to_bundles() {
        let _ = writeln!(out, "{group}");
        for bundle in bundles {
            let assets: usize = plan
                .inputs
                .iter()
                .filter(|input| input.bundle == bundle)
                .map(|input| input.assets.len())
                .sum();
            let noun = if assets == 1 { "asset" } else { "assets" };
            let _ = writeln!(out, "  {bundle} ({assets} {noun})");
        }
    }
    out
}

/// Print the packing plan to stdout.
pub fn print_plan(plan: &PackingPlan) {
    print!("{}", render_plan(plan));
}

/// Diagnostics that mean the recorded build disagrees with the group
/// configuration, as opposed to gaps in dependency or naming data.
pub fn is_structural(diagnostic: &Diagnostic) -> bool {
    matches!(
        diagnostic,
        Diagnostic::MissingBundle { .. } | Diagnostic::BundleClaimedTwice { .. }
    )
}

/// Print structural diagnostics as errors and the rest as warnings.
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        if is_structural(diagnostic) {
            super::error(&diagnostic.to_string());
        } else {
            super::warning(&diagnostic.to_string());
        }
    }
}

/// Print a graph summary to stderr.
pub fn print_statistics(stats: &GraphStatistics, elapsed: Duration) {
    let term = Term::stderr();
    let width = (term.size().1 as usize).min(60);

    eprintln!("\n{}", "Build Graph".style(paint(Style::new().bold().underline())));
    eprintln!("{}", "─".repeat(width));

    let rows = [
        ("Groups", stats.group_count),
        ("Bundles", stats.bundle_count),
        ("Assets", stats.asset_count),
        ("  explicit", stats.explicit_asset_count),
        ("  implicit", stats.implicit_asset_count),
        ("Dependency edges", stats.dependency_edge_count),
        ("Duplicated", stats.duplicate_count),
        ("  implicit", stats.implicit_duplicate_count),
        ("Implicit roots", stats.implicit_root_count),
    ];
    for (label, value) in rows {
        eprintln!(
            "  {} {:<18} {}",
            "▸".style(paint(Style::new().blue())),
            label,
            value.style(paint(Style::new().bold()))
        );
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} {}",
        "Analyzed in".style(paint(Style::new().bold())),
        format_duration(elapsed).style(paint(Style::new().green()))
    );
}
