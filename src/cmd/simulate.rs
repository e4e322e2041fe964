use crate::reports;
use clap::Args;
use spellsphere::config::GameConfig;
use spellsphere::difficulty::Difficulty;
use spellsphere::geometry::AnchorPose;
use spellsphere::letters::word_score;
use spellsphere::scene::MirrorScene;
use spellsphere::session::GameSession;
use spellsphere::store::{JsonScoreStore, MemoryScoreStore, ScoreStore};
use spellsphere::validation::{Dictionary, WordListDictionary};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: GameConfig,

    #[arg(short = 'D', long, value_enum, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,

    /// Game seconds the bot waits between words.
    #[arg(long, default_value_t = 4.0)]
    pub think_secs: f64,

    /// Play without touching the saved history.
    #[arg(long, default_value_t = false)]
    pub no_save: bool,
}

pub fn run(
    args: &SimulateArgs,
    config: GameConfig,
    dictionary: Arc<WordListDictionary>,
    language: &str,
    save_dir: &Path,
) {
    let min = config.rules.min_word_length;
    let vocabulary: Vec<String> = dictionary
        .words(language)
        .filter(|w| w.chars().count() >= min && w.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_uppercase)
        .collect();
    println!("🤖 Bot vocabulary: {} words", vocabulary.len());

    if args.no_save {
        play(args, config, dictionary, &vocabulary, MemoryScoreStore::new());
    } else {
        play(
            args,
            config,
            dictionary,
            &vocabulary,
            JsonScoreStore::in_dir(save_dir),
        );
    }
}

fn play<T: ScoreStore>(
    args: &SimulateArgs,
    config: GameConfig,
    dictionary: Arc<WordListDictionary>,
    vocabulary: &[String],
    store: T,
) {
    let dt = config.rules.tick_interval_secs();
    let dictionary: Arc<dyn Dictionary> = dictionary;
    let mut session = GameSession::new(config, dictionary, MirrorScene::new(), store);
    session.select_difficulty(args.difficulty);

    if let Err(e) = session.on_placement_ready(Some(AnchorPose::default())) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
    println!(
        "🎯 {} round: {} tokens, {:.0}s",
        args.difficulty.title(),
        session.round().pool().len(),
        session.round().time_remaining()
    );

    let mut since_move = 0.0;
    let record = loop {
        if let Some(record) = session.tick(dt) {
            break record;
        }
        since_move += dt;
        if since_move >= args.think_secs {
            since_move = 0.0;
            bot_move(&mut session, vocabulary);
        }
    };

    reports::print_round_summary(&record, session.round().words());
}

fn bot_move<T: ScoreStore>(session: &mut GameSession<MirrorScene, T>, vocabulary: &[String]) {
    // Late verdicts from a timed-out lookup.
    for outcome in session.pump() {
        if let Ok(accepted) = outcome {
            println!("   ✓ {:<10} +{:<3} (late)", accepted.word, accepted.points);
        }
    }

    let visible = session.scene().letters();
    let Some(word) = best_word(&visible, vocabulary) else {
        println!("   🤔 [{}] no word found", visible);
        return;
    };

    let mut taken = Vec::new();
    for c in word.chars() {
        match session.scene().find_letter(c, &taken) {
            Some(id) => taken.push(id),
            None => return,
        }
    }
    for id in &taken {
        session.on_token_tapped(*id);
    }

    if let Err(e) = session.submit() {
        println!("   ✗ {}: {}", word, e);
        return;
    }
    match session.pump_blocking(Duration::from_secs(2)) {
        Some(Ok(accepted)) => println!(
            "   ✓ {:<10} +{:<3} total {}",
            accepted.word, accepted.points, accepted.total_score
        ),
        Some(Err(e)) => println!("   ✗ {}: {}", word, e),
        None => println!("   ⏳ {}: dictionary did not answer in time", word),
    }
}

/// Highest-scoring vocabulary word spellable from `letters`.
fn best_word<'a>(letters: &str, vocabulary: &'a [String]) -> Option<&'a str> {
    let mut counts = [0u8; 26];
    for c in letters.chars().filter(char::is_ascii_uppercase) {
        counts[(c as u8 - b'A') as usize] += 1;
    }

    vocabulary
        .iter()
        .filter(|w| {
            let mut left = counts;
            w.bytes().all(|b| {
                let slot = &mut left[(b - b'A') as usize];
                if *slot == 0 {
                    return false;
                }
                *slot -= 1;
                true
            })
        })
        .max_by_key(|w| (word_score(w), w.len()))
        .map(String::as_str)
}
