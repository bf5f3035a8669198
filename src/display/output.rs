use crate::analysis::HeroStat;
use crate::extract::ExtractionStats;
use crate::pipeline::StatsReport;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct HeroRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    matches: String,
    record: String,
    win_rate: String,
}

impl HeroRow {
    fn from_stat(idx: usize, stat: &HeroStat) -> Self {
        let win_rate = format_win_rate(stat.win_rate);
        let win_rate = if stat.win_rate >= 50.0 {
            win_rate.green().to_string()
        } else {
            win_rate.red().to_string()
        };

        HeroRow {
            rank: format!("#{}", idx + 1),
            hero: stat.hero_name.clone(),
            matches: stat.matches_played.to_string(),
            record: format!("{}W / {}L", stat.wins, stat.matches_played - stat.wins),
            win_rate,
        }
    }
}

/// Win rate with one decimal place.
pub fn format_win_rate(win_rate: f64) -> String {
    format!("{:.1}%", win_rate)
}

pub fn display_hero_stats(report: &StatsReport, player: &str) {
    println!(
        "\n{}",
        format!("🎮 Most Played Heroes for {} ", player).bold().cyan()
    );
    println!("{} {}\n", "Window:".bold(), report.window_label);

    if report.is_empty() {
        println!("{}", "No matches found in this window".yellow());
        println!();
        return;
    }

    let rows: Vec<HeroRow> = report
        .stats
        .iter()
        .enumerate()
        .map(|(idx, stat)| HeroRow::from_stat(idx, stat))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(top) = report.stats.first() {
        println!(
            "\n{} {} with {} matches ({} win rate)",
            "Most played:".bold(),
            top.hero_name,
            top.matches_played,
            format_win_rate(top.win_rate)
        );
    }

    println!();
}

pub fn display_diagnostics(diagnostics: &ExtractionStats) {
    println!("{}", "📊 Page Summary".bold().cyan());
    println!("   Rows scanned:       {}", diagnostics.rows_scanned);
    println!("   Matches counted:    {}", diagnostics.records_kept);
    println!("   Older than window:  {}", diagnostics.outside_window);
    println!(
        "   Rows skipped:       {} (hero {}, result {}, time {})",
        diagnostics.rows_skipped(),
        diagnostics.missing_hero,
        diagnostics.missing_outcome,
        diagnostics.missing_timestamp
    );

    if diagnostics.timestamp_fallbacks > 0 {
        display_warning(&format!(
            "{} match(es) had an unreadable date and were counted as played now",
            diagnostics.timestamp_fallbacks
        ));
    }
    if diagnostics.outcome_defaulted_to_loss > 0 {
        display_warning(&format!(
            "{} match(es) had no readable result and were counted as losses",
            diagnostics.outcome_defaulted_to_loss
        ));
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_has_one_decimal() {
        assert_eq!(format_win_rate(100.0), "100.0%");
        assert_eq!(format_win_rate(200.0 / 3.0), "66.7%");
        assert_eq!(format_win_rate(0.0), "0.0%");
    }

    #[test]
    fn row_shows_record() {
        colored::control::set_override(false);
        let stat = HeroStat {
            hero_name: "Lion".to_string(),
            matches_played: 4,
            wins: 1,
            win_rate: 25.0,
            window_label: "03/03/24 - 03/10/24".to_string(),
        };
        let row = HeroRow::from_stat(0, &stat);
        assert_eq!(row.rank, "#1");
        assert_eq!(row.record, "1W / 3L");
        assert_eq!(row.win_rate, "25.0%");
    }
}
