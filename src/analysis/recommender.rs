use super::champion_stats::{ChampionDataMap, ChampionId, WinStats};
use super::draft::ChampSelect;
use crate::error::AppError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Synthetic prior: 10 games at a 50% win rate.
pub const PRIOR_WINS: u32 = 5;
pub const PRIOR_GAMES: u32 = 10;
pub const NEUTRAL_WIN_PROBABILITY: f64 = 0.50;

/// One scored ally or opponent relationship for a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionInteraction {
    pub champion_id: ChampionId,
    pub win_probability: f64,
    pub wins: u32,
    pub games: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionPerformance {
    pub champion_id: ChampionId,
    pub win_probability: f64,
    /// One per ally, in draft order.
    pub synergies: Vec<ChampionInteraction>,
    /// One per enemy, in draft order.
    pub matchups: Vec<ChampionInteraction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Synergy,
    Matchup,
}

impl InteractionKind {
    fn label(self) -> &'static str {
        match self {
            InteractionKind::Synergy => "synergy",
            InteractionKind::Matchup => "matchup",
        }
    }
}

/// A selected ally/enemy had no entry under a candidate's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingInteraction {
    pub champion_id: ChampionId,
    pub other_id: ChampionId,
    pub kind: InteractionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub candidates: Vec<ChampionPerformance>,
    pub missing: Vec<MissingInteraction>,
}

pub struct ChampionRecommender;

impl ChampionRecommender {
    /// Laplace-smoothed win probability: `(wins + 5) / (games + 10)`.
    ///
    /// No games means no evidence, so the neutral 0.50 is returned as is.
    pub fn smoothed_win_probability(stats: &WinStats) -> f64 {
        if stats.games == 0 {
            NEUTRAL_WIN_PROBABILITY
        } else {
            (stats.wins as f64 + PRIOR_WINS as f64) / (stats.games as f64 + PRIOR_GAMES as f64)
        }
    }

    /// Mean over synergies and matchups combined, 0.50 when there are none.
    pub fn aggregate_win_probability(
        synergies: &[ChampionInteraction],
        matchups: &[ChampionInteraction],
    ) -> f64 {
        let data_points = synergies.len() + matchups.len();
        if data_points == 0 {
            return NEUTRAL_WIN_PROBABILITY;
        }

        let total: f64 = synergies
            .iter()
            .chain(matchups)
            .map(|i| i.win_probability)
            .sum();

        total / data_points as f64
    }

    /// Ranks every champion in `stats` that is not banned or already picked.
    ///
    /// Sorted by win probability descending, ties broken by ascending id.
    pub fn recommend(
        stats: &ChampionDataMap,
        champ_select: &ChampSelect,
    ) -> Result<Vec<ChampionPerformance>, AppError> {
        Self::recommend_with_diagnostics(stats, champ_select).map(|r| r.candidates)
    }

    /// Same as [`recommend`](Self::recommend), also returning every missing
    /// synergy/matchup lookup that fell back to the neutral probability.
    pub fn recommend_with_diagnostics(
        stats: &ChampionDataMap,
        champ_select: &ChampSelect,
    ) -> Result<Recommendation, AppError> {
        check_draft_ids(champ_select)?;

        let unavailable = champ_select.unavailable();
        let mut missing = Vec::new();

        let mut candidates = Vec::with_capacity(stats.len().saturating_sub(unavailable.len()));
        for (champion_id, data) in stats.iter() {
            if unavailable.contains(&champion_id) {
                continue;
            }

            let synergies = champ_select
                .allies
                .iter()
                .map(|&ally| {
                    Self::score_interaction(
                        champion_id,
                        ally,
                        InteractionKind::Synergy,
                        data.synergy_with(ally),
                        &mut missing,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;

            let matchups = champ_select
                .enemies
                .iter()
                .map(|&enemy| {
                    Self::score_interaction(
                        champion_id,
                        enemy,
                        InteractionKind::Matchup,
                        data.matchup_against(enemy),
                        &mut missing,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;

            let win_probability = Self::aggregate_win_probability(&synergies, &matchups);
            tracing::debug!(champion_id, win_probability, "scored candidate");

            candidates.push(ChampionPerformance {
                champion_id,
                win_probability,
                synergies,
                matchups,
            });
        }

        candidates.sort_by(|a, b| {
            b.win_probability
                .total_cmp(&a.win_probability)
                .then(a.champion_id.cmp(&b.champion_id))
        });

        report_missing(&missing);

        Ok(Recommendation {
            candidates,
            missing,
        })
    }

    fn score_interaction(
        champion_id: ChampionId,
        other_id: ChampionId,
        kind: InteractionKind,
        stats: Option<&WinStats>,
        missing: &mut Vec<MissingInteraction>,
    ) -> Result<ChampionInteraction, AppError> {
        let Some(stats) = stats else {
            missing.push(MissingInteraction {
                champion_id,
                other_id,
                kind,
            });
            return Ok(ChampionInteraction {
                champion_id: other_id,
                win_probability: NEUTRAL_WIN_PROBABILITY,
                wins: 0,
                games: 0,
            });
        };

        if !stats.is_consistent() {
            return Err(AppError::InvalidInput(format!(
                "champion {} {}[{}]: wins ({}) exceed games ({})",
                champion_id,
                kind.label(),
                other_id,
                stats.wins,
                stats.games
            )));
        }

        Ok(ChampionInteraction {
            champion_id: other_id,
            win_probability: Self::smoothed_win_probability(stats),
            wins: stats.wins,
            games: stats.games,
        })
    }
}

fn check_draft_ids(champ_select: &ChampSelect) -> Result<(), AppError> {
    if champ_select.unavailable().contains(&0) {
        return Err(AppError::InvalidInput(
            "champion id 0 in champ select".to_string(),
        ));
    }
    Ok(())
}

/// One warning per (kind, selected champion) instead of one per candidate.
fn report_missing(missing: &[MissingInteraction]) {
    let mut grouped: BTreeMap<(InteractionKind, ChampionId), usize> = BTreeMap::new();
    for m in missing {
        *grouped.entry((m.kind, m.other_id)).or_default() += 1;
        tracing::debug!(
            champion_id = m.champion_id,
            other_id = m.other_id,
            kind = m.kind.label(),
            "missing interaction data"
        );
    }

    for ((kind, other_id), candidates) in grouped {
        tracing::warn!(
            kind = kind.label(),
            other_id,
            candidates,
            "no {} data for champion {}, using {:.2}",
            kind.label(),
            other_id,
            NEUTRAL_WIN_PROBABILITY
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::champion_stats::ChampionData;

    fn empty_stats(ids: &[ChampionId]) -> ChampionDataMap {
        ids.iter().map(|&id| (id, ChampionData::default())).collect()
    }

    fn with_synergy(ally: ChampionId, wins: u32, games: u32) -> ChampionData {
        let mut data = ChampionData::default();
        data.synergies.insert(ally, WinStats::new(wins, games));
        data
    }

    fn ids(candidates: &[ChampionPerformance]) -> Vec<ChampionId> {
        candidates.iter().map(|c| c.champion_id).collect()
    }

    #[test]
    fn test_smoothing() {
        assert_eq!(
            ChampionRecommender::smoothed_win_probability(&WinStats::new(0, 0)),
            0.5
        );
        assert_eq!(
            ChampionRecommender::smoothed_win_probability(&WinStats::new(15, 20)),
            20.0 / 30.0
        );
        assert_eq!(
            ChampionRecommender::smoothed_win_probability(&WinStats::new(0, 10)),
            0.25
        );
    }

    #[test]
    fn test_empty_draft_ranks_by_id() {
        let stats = empty_stats(&[3, 1, 2]);
        let result = ChampionRecommender::recommend(&stats, &ChampSelect::default()).unwrap();

        assert_eq!(ids(&result), vec![1, 2, 3]);
        assert!(result.iter().all(|c| c.win_probability == 0.5));
        assert!(result.iter().all(|c| c.synergies.is_empty() && c.matchups.is_empty()));
    }

    #[test]
    fn test_missing_synergy_falls_back_and_is_reported() {
        let stats = empty_stats(&[1, 2, 3]);
        let draft = ChampSelect::new(vec![1], vec![], vec![]);

        let result = ChampionRecommender::recommend_with_diagnostics(&stats, &draft).unwrap();

        assert_eq!(ids(&result.candidates), vec![2, 3]);
        for candidate in &result.candidates {
            assert_eq!(
                candidate.synergies,
                vec![ChampionInteraction {
                    champion_id: 1,
                    win_probability: 0.5,
                    wins: 0,
                    games: 0,
                }]
            );
        }
        assert_eq!(
            result.missing,
            vec![
                MissingInteraction {
                    champion_id: 2,
                    other_id: 1,
                    kind: InteractionKind::Synergy
                },
                MissingInteraction {
                    champion_id: 3,
                    other_id: 1,
                    kind: InteractionKind::Synergy
                },
            ]
        );
    }

    #[test]
    fn test_present_zero_game_entry_is_not_missing() {
        let mut stats = empty_stats(&[1]);
        stats.insert(2, with_synergy(1, 0, 0));
        let draft = ChampSelect::new(vec![1], vec![], vec![]);

        let result = ChampionRecommender::recommend_with_diagnostics(&stats, &draft).unwrap();
        assert_eq!(result.candidates[0].win_probability, 0.5);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_aggregate_is_mean_of_synergies_and_matchups() {
        let mut data = with_synergy(1, 15, 20); // 20/30
        data.matchups.insert(4, WinStats::new(0, 10)); // 5/20
        data.matchups.insert(5, WinStats::new(10, 10)); // 15/20

        let mut stats = empty_stats(&[1, 4, 5]);
        stats.insert(2, data);

        let draft = ChampSelect::new(vec![1], vec![4, 5], vec![]);
        let result = ChampionRecommender::recommend(&stats, &draft).unwrap();

        assert_eq!(result.len(), 1);
        let candidate = &result[0];
        let expected = (20.0 / 30.0 + 0.25 + 0.75) / 3.0;
        assert!((candidate.win_probability - expected).abs() < 1e-12);
        assert_eq!(ids_of(&candidate.matchups), vec![4, 5]);
        assert_eq!(candidate.synergies[0].wins, 15);
        assert_eq!(candidate.synergies[0].games, 20);
    }

    fn ids_of(interactions: &[ChampionInteraction]) -> Vec<ChampionId> {
        interactions.iter().map(|i| i.champion_id).collect()
    }

    #[test]
    fn test_sorted_descending_with_id_tiebreak() {
        let mut stats = ChampionDataMap::new();
        stats.insert(1, ChampionData::default());
        stats.insert(10, with_synergy(1, 0, 20)); // low
        stats.insert(4, with_synergy(1, 20, 20)); // high
        stats.insert(7, with_synergy(1, 20, 20)); // high, tie with 4
        stats.insert(2, with_synergy(1, 0, 0)); // neutral

        let draft = ChampSelect::new(vec![1], vec![], vec![]);
        let result = ChampionRecommender::recommend(&stats, &draft).unwrap();

        assert_eq!(ids(&result), vec![4, 7, 2, 10]);
    }

    #[test]
    fn test_excludes_banned_and_picked() {
        let stats = empty_stats(&[1, 2, 3, 4, 5, 6]);
        // 2 appears twice across lists, 99 is not in the dataset
        let draft = ChampSelect::new(vec![1, 2], vec![2, 3], vec![99]);

        let result = ChampionRecommender::recommend(&stats, &draft).unwrap();
        assert_eq!(ids(&result), vec![4, 5, 6]);
        // Every candidate still scores one interaction per list entry
        assert!(result
            .iter()
            .all(|c| c.synergies.len() == 2 && c.matchups.len() == 2));
    }

    #[test]
    fn test_everything_unavailable_yields_empty_list() {
        let stats = empty_stats(&[1, 2]);
        let draft = ChampSelect::new(vec![1], vec![], vec![2]);
        assert!(ChampionRecommender::recommend(&stats, &draft)
            .unwrap()
            .is_empty());

        let result = ChampionRecommender::recommend(&ChampionDataMap::new(), &draft).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_inconsistent_stats_fail_fast() {
        let mut stats = empty_stats(&[1]);
        stats.insert(2, with_synergy(1, 9, 3));
        let draft = ChampSelect::new(vec![1], vec![], vec![]);

        assert!(matches!(
            ChampionRecommender::recommend(&stats, &draft),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_id_in_draft_is_rejected() {
        let stats = empty_stats(&[1, 2]);
        let draft = ChampSelect::new(vec![], vec![0], vec![]);
        assert!(matches!(
            ChampionRecommender::recommend(&stats, &draft),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inputs_are_not_mutated_and_output_is_repeatable() {
        let mut stats = empty_stats(&[1, 3]);
        stats.insert(2, with_synergy(1, 7, 13));
        let draft = ChampSelect::new(vec![1], vec![3], vec![]);
        let stats_before = stats.clone();
        let draft_before = draft.clone();

        let first = ChampionRecommender::recommend(&stats, &draft).unwrap();
        let second = ChampionRecommender::recommend(&stats, &draft).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first[0].win_probability.to_bits(),
            second[0].win_probability.to_bits()
        );
        assert_eq!(stats, stats_before);
        assert_eq!(draft, draft_before);
    }
}
