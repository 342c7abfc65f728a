use crate::analysis::champion_stats::{ChampionDataMap, ChampionId};
use crate::analysis::draft::ChampSelect;
use crate::analysis::recommender::{ChampionInteraction, ChampionPerformance, MissingInteraction};
use crate::champions::ChampionRoster;
use colored::*;
use std::collections::BTreeSet;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RecommendationRow {
    rank: String,
    champion: String,
    #[tabled(rename = "win prob")]
    win_probability: String,
    #[tabled(rename = "base WR")]
    base_win_rate: String,
    synergies: String,
    matchups: String,
}

pub fn probability_as_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// `Name: wins/games` per interaction, comma separated.
pub fn format_interactions(interactions: &[ChampionInteraction], roster: &ChampionRoster) -> String {
    interactions
        .iter()
        .map(|i| format!("{}: {}/{}", roster.display_name(i.champion_id), i.wins, i.games))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_ids(ids: &[ChampionId], roster: &ChampionRoster) -> String {
    if ids.is_empty() {
        return "-".dimmed().to_string();
    }
    ids.iter()
        .map(|&id| roster.display_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn display_draft(champ_select: &ChampSelect, roster: &ChampionRoster) {
    println!("\n{}", "🎮 Champ Select".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!("{} {}", "Bans:   ".bold(), format_ids(&champ_select.bans, roster));
    println!("{} {}", "Allies: ".bold().green(), format_ids(&champ_select.allies, roster));
    println!("{} {}", "Enemies:".bold().red(), format_ids(&champ_select.enemies, roster));
}

pub fn display_recommendations(
    candidates: &[ChampionPerformance],
    stats: &ChampionDataMap,
    roster: &ChampionRoster,
    top_n: usize,
) {
    println!("\n{}", "⭐ Recommended Picks".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if candidates.is_empty() {
        println!(
            "{}",
            "No champions left to recommend (everything is banned or picked)".yellow()
        );
        return;
    }

    let rows: Vec<RecommendationRow> = candidates
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, candidate)| {
            let base_win_rate = stats
                .get(candidate.champion_id)
                .filter(|data| data.winrate.games > 0)
                .map(|data| probability_as_percentage(data.winrate.win_rate()))
                .unwrap_or_else(|| "-".to_string());

            RecommendationRow {
                rank: format!("#{}", idx + 1),
                champion: roster.display_name(candidate.champion_id),
                win_probability: colorize_probability(candidate.win_probability),
                base_win_rate,
                synergies: format_interactions(&candidate.synergies, roster),
                matchups: format_interactions(&candidate.matchups, roster),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if candidates.len() > top_n {
        println!(
            "{}",
            format!("… {} more candidates (raise --top to see them)", candidates.len() - top_n)
                .dimmed()
        );
    }

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Win prob: mean smoothed win rate over your allies and the enemies picked so far");
    println!("• Synergies / Matchups: raw wins/games with each ally / against each enemy");
    println!("• Few games pull the estimate toward 50%\n");
}

fn colorize_probability(probability: f64) -> String {
    let text = probability_as_percentage(probability);
    if probability > 0.52 {
        text.green().to_string()
    } else if probability < 0.48 {
        text.red().to_string()
    } else {
        text
    }
}

pub fn display_missing(missing: &[MissingInteraction], roster: &ChampionRoster) {
    if missing.is_empty() {
        return;
    }

    let selected: BTreeSet<ChampionId> = missing.iter().map(|m| m.other_id).collect();
    let names: Vec<String> = selected.iter().map(|&id| roster.display_name(id)).collect();

    println!(
        "{} {} lookups had no data and counted as 50% ({})",
        "⚠️".yellow(),
        missing.len(),
        names.join(", ")
    );
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
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
    use crate::api::models::ChampionInfo;

    #[test]
    fn test_probability_as_percentage() {
        assert_eq!(probability_as_percentage(0.5), "50.00%");
        assert_eq!(probability_as_percentage(2.0 / 3.0), "66.67%");
    }

    #[test]
    fn test_format_interactions() {
        let infos = vec![ChampionInfo {
            id: "Ashe".to_string(),
            key: "22".to_string(),
            name: "Ashe".to_string(),
        }];
        let roster = ChampionRoster::from_infos(&infos).unwrap();
        let interactions = vec![
            ChampionInteraction {
                champion_id: 22,
                win_probability: 0.6,
                wins: 15,
                games: 20,
            },
            ChampionInteraction {
                champion_id: 117,
                win_probability: 0.5,
                wins: 0,
                games: 0,
            },
        ];

        assert_eq!(
            format_interactions(&interactions, &roster),
            "Ashe: 15/20, Unknown: 0/0"
        );
        assert_eq!(
            format_interactions(&interactions, &ChampionRoster::offline()),
            "#22: 15/20, #117: 0/0"
        );
    }
}
