use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use spellsphere::difficulty::Difficulty;
use spellsphere::store::ScoreRecord;
use spellsphere::validation::Verdict;
use strum::IntoEnumIterator;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

fn verdict_cell(verdict: Verdict) -> Cell {
    let color = match verdict {
        Verdict::Valid => Color::Green,
        Verdict::NotInDictionary => Color::Red,
        Verdict::TooShort | Verdict::InvalidCharacters => Color::Yellow,
    };
    Cell::new(verdict.to_string()).fg(color)
}

pub fn print_verdicts(rows: &[(String, Verdict, u32)], min_len: usize) {
    let mut table = new_table(&["Word", "Verdict", "Points"]);
    for (word, verdict, points) in rows {
        table.add_row(vec![
            Cell::new(word),
            verdict_cell(*verdict),
            Cell::new(points).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
    println!("(words need at least {} letters)", min_len);
}

pub fn print_history(records: &[ScoreRecord]) {
    println!("\n📜 === ROUND HISTORY === 📜");
    let mut table = new_table(&["Played", "Level", "Points", "Words"]);
    for r in records {
        table.add_row(vec![
            Cell::new(r.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(r.difficulty.title()),
            Cell::new(r.points).set_alignment(CellAlignment::Right),
            Cell::new(r.words_formed).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn print_bests(records: &[ScoreRecord]) {
    println!("\n🏆 === BEST PER LEVEL === 🏆");
    let mut table = new_table(&["Level", "Rounds", "Best", "Average"]);
    for level in Difficulty::iter() {
        let points: Vec<u32> = records
            .iter()
            .filter(|r| r.difficulty == level)
            .map(|r| r.points)
            .collect();
        if points.is_empty() {
            continue;
        }
        let best = points.iter().copied().max().unwrap_or(0);
        let avg = points.iter().sum::<u32>() as f32 / points.len() as f32;
        table.add_row(vec![
            Cell::new(level.title()),
            Cell::new(points.len()).set_alignment(CellAlignment::Right),
            Cell::new(best)
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", avg)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn print_round_summary(record: &ScoreRecord, words: &[String]) {
    println!("\n⏰ === TIME UP === ⏰");
    let mut table = new_table(&["Level", "Points", "Words", "Formed"]);
    table.add_row(vec![
        Cell::new(record.difficulty.title()),
        Cell::new(record.points).add_attribute(Attribute::Bold),
        Cell::new(record.words_formed),
        Cell::new(words.join(", ")),
    ]);
    println!("{}", table);
}
