mod common;

use common::*;
use rstest::rstest;
use spellsphere::config::RuleParams;
use spellsphere::error::SubmitError;
use spellsphere::letters::word_score;
use spellsphere::validation::{
    letter_count, precheck, Dictionary, Verdict, WordListDictionary, WordValidator,
};
use std::io::Cursor;
use std::sync::Arc;

#[rstest]
#[case("", Verdict::TooShort)]
#[case("a", Verdict::TooShort)]
#[case("ab", Verdict::TooShort)]
#[case("a1", Verdict::TooShort)]
#[case("cat", Verdict::Valid)]
#[case("CAT", Verdict::Valid)]
#[case("Test", Verdict::Valid)]
#[case("123", Verdict::InvalidCharacters)]
#[case("test123", Verdict::InvalidCharacters)]
#[case("hello!", Verdict::InvalidCharacters)]
#[case("co-op", Verdict::InvalidCharacters)]
#[case("it's", Verdict::InvalidCharacters)]
#[case("café", Verdict::Valid)]
#[case("naïve", Verdict::Valid)]
#[case("cafe\u{301}", Verdict::Valid)]
#[case("nai\u{308}ve", Verdict::Valid)]
#[case("CAFE\u{301}", Verdict::Valid)]
#[case("ca\u{301}", Verdict::TooShort)]
#[case("\u{301}ab", Verdict::InvalidCharacters)]
#[case("xyz", Verdict::NotInDictionary)]
#[case("qqq", Verdict::NotInDictionary)]
fn test_validate(#[case] candidate: &str, #[case] expected: Verdict) {
    assert_eq!(validator().validate(candidate), expected);
}

#[rstest]
#[case("cat", 5)]
#[case("CAT", 5)]
#[case("QUIZ", 22)]
#[case("jazz", 29)]
#[case("café", 8)]
#[case("cafe\u{301}", 8)]
#[case("", 0)]
fn test_word_score(#[case] word: &str, #[case] points: u32) {
    assert_eq!(word_score(word), points);
}

#[test]
fn test_short_word_length_counts_letters_not_code_points() {
    assert_eq!(precheck("ca\u{301}", 3), Some(Verdict::TooShort));
    assert_eq!(letter_count("cafe\u{301}"), 4);
    assert_eq!(
        Verdict::TooShort.rejection(letter_count("ca\u{301}"), 3),
        Some(SubmitError::TooShort { len: 2, min: 3 })
    );
}

#[test]
fn test_word_list_matches_either_composition() {
    let dict = WordListDictionary::from_words("fr", ["cre\u{300}me", "été"]);
    assert!(dict.is_valid_word("crème", "fr"));
    assert!(dict.is_valid_word("e\u{301}te\u{301}", "fr"));
    assert!(dict.is_valid_word("ÉTÉ", "fr"));
}

#[test]
fn test_precheck_failures_skip_dictionary() {
    let spy = Arc::new(SpyDictionary::new(WORDS));
    let v = WordValidator::new(spy.clone(), &RuleParams::default());

    assert_eq!(v.validate("ab"), Verdict::TooShort);
    assert_eq!(v.validate("x1y"), Verdict::InvalidCharacters);
    assert_eq!(spy.call_count(), 0);

    assert_eq!(v.validate("dog"), Verdict::Valid);
    assert_eq!(v.validate("zzz"), Verdict::NotInDictionary);
    assert_eq!(spy.call_count(), 2);
}

#[test]
fn test_lookup_uses_resolved_language() {
    let mut dict = WordListDictionary::from_words("en_US", ["color"]);
    dict.add_words("fr", ["couleur"]);
    let spy = Arc::new(SpyDictionary {
        inner: dict,
        ..Default::default()
    });

    let mut rules = RuleParams::default();
    rules.device_locale = Some("en_GB".to_string());
    let v = WordValidator::new(spy.clone(), &rules);

    assert_eq!(v.language(), "en_US");
    assert_eq!(v.validate("color"), Verdict::Valid);
    assert_eq!(v.validate("couleur"), Verdict::NotInDictionary);

    let calls = spy.calls.lock().unwrap();
    assert!(calls.iter().all(|(_, lang)| lang == "en_US"));
}

#[rstest]
#[case(Some("fr_CA"), "fr")]
#[case(Some("de_DE"), "en")]
#[case(None, "en")]
#[case(Some(""), "en")]
fn test_validator_language_fallback(#[case] locale: Option<&str>, #[case] expected: &str) {
    let mut dict = WordListDictionary::from_words("en", WORDS);
    dict.add_words("fr", ["chat"]);

    let mut rules = RuleParams::default();
    rules.device_locale = locale.map(str::to_string);
    let v = WordValidator::new(Arc::new(dict), &rules);

    assert_eq!(v.language(), expected);
}

#[test]
fn test_min_length_follows_rules() {
    let mut rules = RuleParams::default();
    rules.min_word_length = 5;
    let v = WordValidator::new(dictionary(), &rules);

    assert_eq!(v.validate("test"), Verdict::TooShort);
    assert_eq!(v.validate("hello"), Verdict::Valid);
    assert_eq!(
        Verdict::TooShort.rejection(4, 5),
        Some(SubmitError::TooShort { len: 4, min: 5 })
    );
    assert_eq!(
        SubmitError::TooShort { len: 4, min: 5 }.to_string(),
        "Word must be at least 5 letters"
    );
}

#[test]
fn test_load_word_list_from_reader() {
    let data = "# bundled list\n\
                # word\tfrequency\n\
                Apple\t120\n\
                banana\n\
                cherry\t3\textra\n";
    let dict = WordListDictionary::load_from_reader(Cursor::new(data), "en").unwrap();

    assert_eq!(dict.word_count("en"), 3);
    assert!(dict.is_valid_word("apple", "en"));
    assert!(dict.is_valid_word("BANANA", "en"));
    assert!(dict.is_valid_word("cherry", "en"));
    assert!(!dict.is_valid_word("apple", "fr"));
    assert_eq!(dict.available_languages(), vec!["en".to_string()]);
}

#[test]
fn test_load_word_list_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.tsv");
    std::fs::write(&path, "cat\ndog\n").unwrap();

    let dict = WordListDictionary::load_from_file(&path, "en").unwrap();
    assert_eq!(dict.word_count("en"), 2);

    assert!(WordListDictionary::load_from_file(dir.path().join("missing.tsv"), "en").is_err());
}

#[test]
fn test_bundled_word_list_loads() {
    let dict = WordListDictionary::load_from_file("data/words_en.tsv", "en").unwrap();
    assert!(dict.word_count("en") > 1000);
    assert!(dict.is_valid_word("cat", "en"));
}
