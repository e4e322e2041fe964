use crate::reports;
use clap::Args;
use spellsphere::config::GameConfig;
use spellsphere::letters::word_score;
use spellsphere::validation::{Dictionary, Verdict, WordListDictionary, WordValidator};
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: GameConfig,

    /// Candidate words to run through the validation pipeline.
    #[arg(required = true)]
    pub candidates: Vec<String>,
}

pub fn run(args: &CheckArgs, config: GameConfig, dictionary: Arc<WordListDictionary>) {
    let dictionary: Arc<dyn Dictionary> = dictionary;
    let validator = WordValidator::new(dictionary, &config.rules);

    println!("\n🔎 === WORD CHECK ({}) === 🔎", validator.language());
    let rows: Vec<(String, Verdict, u32)> = args
        .candidates
        .iter()
        .map(|w| {
            let verdict = validator.validate(w);
            let points = if verdict == Verdict::Valid {
                word_score(w)
            } else {
                0
            };
            (w.clone(), verdict, points)
        })
        .collect();

    reports::print_verdicts(&rows, validator.min_len());
}
