//! Human-readable terminal output with colors.

use colored::Colorize;

use sprintforecast_core::{ForecastResult, ForecastSummary, IntakePlan, SizeBucket};

fn separator() -> String {
    "\u{2500}".repeat(48)
}

fn colored_probability(p: f64) -> String {
    let text = format!("{:.1}%", p * 100.0);
    if p >= 0.8 {
        text.green().bold().to_string()
    } else if p >= 0.5 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

/// Format a Monte Carlo summary.
pub fn format_summary(summary: &ForecastSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Sprint forecast".bold()));
    out.push_str(&separator());
    out.push('\n');
    out.push_str(&format!("  P(goal):   {}\n", colored_probability(summary.p_goal)));
    out.push_str(&format!(
        "  Finish:    p50 {:.1}h  p80 {:.1}h  p95 {:.1}h\n",
        summary.p50, summary.p80, summary.p95
    ));
    out.push_str(&format!("  Brier:     {:.4}\n", summary.brier));
    out.push_str(&format!("  CRPS:      {:.3}h\n", summary.crps));
    out
}

/// Format a deadline forecast.
pub fn format_result(result: &ForecastResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Completion forecast".bold()));
    out.push_str(&separator());
    out.push('\n');
    out.push_str(&format!("  On time:   {}\n", colored_probability(result.probability)));
    let carry = format!("{:.2}", result.expected_carry);
    let carry = if result.expected_carry > 0.0 {
        carry.yellow().to_string()
    } else {
        carry
    };
    out.push_str(&format!("  Carry:     {} tickets expected\n", carry));
    out.push_str(&format!("  Draws:     {}\n", result.draws));
    out
}

/// Format an intake plan.
pub fn format_plan(plan: &IntakePlan) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({:.0}% confidence, {:.1}h capacity)\n",
        "Intake plan".bold(),
        plan.confidence * 100.0,
        plan.capacity_bound
    ));
    out.push_str(&separator());
    out.push('\n');

    if plan.selected.is_empty() {
        out.push_str(&format!("  {}\n", "No tickets fit the capacity bound".yellow()));
    }
    for t in &plan.selected {
        out.push_str(&format!(
            "  #{:<6} {:<4} {:>6.1}h  {}\n",
            t.number,
            t.size.name(),
            t.hours,
            t.title
        ));
    }
    out.push_str(&format!("\n  Committed: {:.1}h\n", plan.committed_hours));

    if !plan.size_mix.is_empty() {
        let mix: Vec<String> = SizeBucket::ALL
            .iter()
            .filter_map(|b| plan.size_mix.get(b).map(|share| format!("{} {:.0}%", b.name(), share * 100.0)))
            .collect();
        out.push_str(&format!("  Size mix:  {}\n", mix.join(", ")));
    }

    if !plan.oversized.is_empty() {
        let ids: Vec<String> = plan.oversized.iter().map(|n| format!("#{n}")).collect();
        out.push_str(&format!(
            "\n  {} {} too large to commit: {}\n",
            "\u{26A0}".yellow(),
            "Split or re-estimate".bold(),
            ids.join(", ")
        ));
    }
    out
}
