use anyhow::Context;
use champ_recommender::api::client::DataDragonClient;
use champ_recommender::api::game_version::GameVersion;
use champ_recommender::cache::RosterCache;
use champ_recommender::champions::ChampionRoster;
use champ_recommender::config::Config;
use champ_recommender::display::output::{
    display_draft, display_error, display_info, display_missing, display_recommendations,
    display_success,
};
use champ_recommender::{ChampSelect, ChampionDataMap, ChampionRecommender};
use clap::Parser;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Champ Recommender")]
#[command(about = "Rank the champions left in champ select by expected win probability", long_about = None)]
struct Args {
    /// Champion stats JSON (default: $CHAMP_STATS_PATH or champion_stats.json)
    #[arg(short, long)]
    stats: Option<PathBuf>,

    /// Allies already locked in, comma separated names or ids
    #[arg(short, long, value_delimiter = ',')]
    allies: Vec<String>,

    /// Enemies already locked in, comma separated names or ids
    #[arg(short, long, value_delimiter = ',')]
    enemies: Vec<String>,

    /// Banned champions, comma separated names or ids
    #[arg(short, long, value_delimiter = ',')]
    bans: Vec<String>,

    /// Number of recommendations to display (default: 10)
    #[arg(short, long, default_value = "10")]
    top: usize,

    /// Data Dragon version or game client patch (default: latest)
    /// Example: --ddragon-version 14.18.618.2357 uses Data Dragon 14.18.1
    #[arg(long)]
    ddragon_version: Option<String>,

    /// Skip Data Dragon; champions must be given as ids
    #[arg(long)]
    offline: bool,

    /// Refetch the champion roster even if cached
    #[arg(long)]
    refresh: bool,

    /// Print recommendations as JSON
    #[arg(long)]
    json: bool,

    /// More log output on stderr (-v warnings, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(stats) = args.stats {
        config.stats_path = stats;
    }

    let stats = ChampionDataMap::load(&config.stats_path).context("loading champion stats")?;

    let roster = if args.offline {
        ChampionRoster::offline()
    } else {
        match load_roster(&config, args.ddragon_version.as_deref(), args.refresh, !args.json) {
            Ok(roster) => roster,
            Err(e) => {
                tracing::warn!(error = %e, "champion roster unavailable");
                if !args.json {
                    display_error(&format!("{} (continuing with champion ids only)", e));
                }
                ChampionRoster::offline()
            }
        }
    };

    let champ_select = ChampSelect::new(
        roster.resolve_all(&args.allies).context("resolving allies")?,
        roster.resolve_all(&args.enemies).context("resolving enemies")?,
        roster.resolve_all(&args.bans).context("resolving bans")?,
    );
    champ_select.validate()?;

    let mut recommendation = ChampionRecommender::recommend_with_diagnostics(&stats, &champ_select)?;

    if args.json {
        recommendation.candidates.truncate(args.top);
        let json = serde_json::to_string_pretty(&recommendation)
            .context("serializing recommendations")?;
        println!("{}", json);
        return Ok(());
    }

    display_success(&format!(
        "Loaded stats for {} champions from {}",
        stats.len(),
        config.stats_path.display()
    ));
    display_draft(&champ_select, &roster);
    display_recommendations(&recommendation.candidates, &stats, &roster, args.top);
    display_missing(&recommendation.missing, &roster);

    Ok(())
}

fn load_roster(
    config: &Config,
    version_override: Option<&str>,
    refresh: bool,
    show_progress: bool,
) -> anyhow::Result<ChampionRoster> {
    let client = DataDragonClient::new(&config.locale);

    let version = match version_override {
        Some(raw) => raw.parse::<GameVersion>()?,
        None => client
            .get_latest_version()
            .context("fetching Data Dragon versions")?,
    }
    .to_ddragon();

    let cache_dir = RosterCache::cache_dir();
    let cached = if refresh {
        None
    } else {
        RosterCache::load(&cache_dir, &version, &config.locale)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable roster cache");
                None
            })
            .filter(|c| !c.is_stale(config.roster_max_age_mins))
    };

    let cache = match cached {
        Some(cache) => {
            if show_progress {
                display_success(&format!("⚡ Champion roster {} from cache", version));
            }
            cache
        }
        None => {
            let pb = if show_progress {
                display_info(&format!("Fetching champion roster {} from Data Dragon...", version));
                ProgressBar::new_spinner()
            } else {
                ProgressBar::hidden()
            };
            pb.enable_steady_tick(Duration::from_millis(100));

            let data = client.get_champion_data(&version);
            pb.finish_and_clear();
            let data = data.with_context(|| format!("fetching champion roster {}", version))?;

            let cache = RosterCache::new(&version, &config.locale, data.data.into_values().collect());
            if let Err(e) = cache.save(&cache_dir) {
                tracing::warn!(error = %e, "could not write roster cache");
            }
            cache
        }
    };

    let roster = ChampionRoster::from_infos(&cache.champions)?;
    tracing::info!(version = %cache.version, champions = roster.len(), "champion roster ready");
    Ok(roster)
}
