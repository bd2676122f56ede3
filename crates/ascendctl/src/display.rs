//! Terminal rendering for ascendctl. ASCII only.

use ascend_common::activity::{ActivitySummary, DayRecord, StreakSummary};
use ascend_common::progression::LevelThresholds;
use ascend_common::{Completion, Goal};
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::client::Health;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Heatmap glyph per intensity level 0..=4
const HEAT_GLYPHS: [char; 5] = ['.', '-', '+', '*', '#'];

pub fn heat_glyph(level: u8) -> char {
    HEAT_GLYPHS[usize::from(level).min(HEAT_GLYPHS.len() - 1)]
}

/// Experience plus distance to the next level, or "(max)" at the top level
pub fn xp_label(goal: &Goal, thresholds: LevelThresholds) -> String {
    match thresholds.xp_to_next(goal.level, goal.xp) {
        Some(remaining) => format!("{} xp, {} to L{}", goal.xp, remaining, goal.level + 1),
        None => format!("{} xp (max)", goal.xp),
    }
}

pub fn health_line(url: &str, health: &Health) -> String {
    format!(
        "ascendd v{} at {}: {} (up {}s)",
        health.version, url, health.status, health.uptime_seconds
    )
}

pub fn print_health(url: &str, health: &Health) {
    println!();
    println!("[OK] {}", health_line(url, health).bright_green());
    println!();
}

fn print_goal(goal: &Goal) {
    println!(
        "  #{:<4} {:<32} L{}  {}",
        goal.id.to_string().cyan(),
        goal.title,
        goal.level,
        xp_label(goal, LevelThresholds::STANDARD).dimmed()
    );
}

pub fn print_dungeon(goals: &[Goal], today: NaiveDate) {
    println!();
    println!("{}", format!("Daily dungeon  {}", today).bold());
    println!("{}", SEPARATOR.dimmed());
    if goals.is_empty() {
        println!("  {}", "No goals yet".yellow());
    }
    for goal in goals {
        print_goal(goal);
    }
    println!();
}

pub fn print_completion(completion: &Completion) {
    let goal = &completion.goal;
    let stats = &completion.updated_stats;
    println!();
    println!("[OK] {} completed", goal.title.bright_green());
    print_goal(goal);
    println!("{}", SEPARATOR.dimmed());
    println!("  total xp   {}", stats.total_xp);
    println!("  streak     {}", stats.streak);
    println!();
}

pub fn print_recorded(record: &DayRecord) {
    let kinds: Vec<&str> = record.types.iter().map(|k| k.as_str()).collect();
    println!(
        "[OK] {} completions on {} ({})",
        record.completions,
        record.date,
        kinds.join(", ")
    );
}

pub fn print_streak_line(streaks: &StreakSummary) {
    println!(
        "  streak {} day(s), longest {}",
        streaks.current.to_string().bright_green(),
        streaks.longest
    );
}

/// Month grid, weeks starting on Sunday
pub fn render_heatmap(summary: &ActivitySummary) -> String {
    let lead = summary.month.weekday().num_days_from_sunday() as usize;
    let mut out = String::from("Su Mo Tu We Th Fr Sa\n");
    let cells = std::iter::repeat(None)
        .take(lead)
        .chain(summary.heatmap.iter().copied().map(Some))
        .collect::<Vec<_>>();

    for week in cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(level) => format!(" {}", heat_glyph(*level)),
                None => "  ".to_string(),
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }
    out
}

pub fn print_summary(summary: &ActivitySummary) {
    println!();
    println!("{}", summary.month.format("%B %Y").to_string().bold());
    println!("{}", SEPARATOR.dimmed());
    print!("{}", render_heatmap(summary));
    println!("{}", SEPARATOR.dimmed());
    println!(
        "  current streak   {}",
        summary.current_streak.to_string().bright_green()
    );
    println!("  longest streak   {}", summary.longest_streak);
    println!(
        "  month complete   {}% ({} active days)",
        summary.month_completion,
        summary.active_days()
    );
    println!();
}
