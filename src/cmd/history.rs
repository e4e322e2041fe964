use crate::reports;
use clap::Args;
use spellsphere::difficulty::Difficulty;
use spellsphere::store::{JsonScoreStore, ScoreStore};
use std::path::Path;

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Only show rounds played at this difficulty.
    #[arg(short = 'D', long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Show the most recent N rounds.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn run(args: &HistoryArgs, save_dir: &Path) {
    let store = JsonScoreStore::in_dir(save_dir);
    let records: Vec<_> = store
        .load()
        .into_iter()
        .filter(|r| args.difficulty.map_or(true, |d| r.difficulty == d))
        .collect();

    if records.is_empty() {
        println!("📭 No rounds recorded in {:?}", store.path());
        return;
    }

    let skip = args
        .limit
        .map_or(0, |n| records.len().saturating_sub(n));
    reports::print_history(&records[skip..]);
    reports::print_bests(&records);
}
