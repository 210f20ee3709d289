use pretty_assertions::assert_eq;
use simplifier::{ContextFreeGrammar, Error, TextFormat};

mod common;

#[test]
fn saved_grammar_loads_back_equal() {
    let grammar = common::load("mixed.txt").simplify();

    let path = std::env::temp_dir().join(format!("simplifier-{}.txt", std::process::id()));
    TextFormat::default().save(&grammar, &path).unwrap();
    let loaded = TextFormat::default().load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, grammar);
}

#[test]
fn parsed_text_matches_arrow_notation() {
    let grammar: ContextFreeGrammar = std::fs::read_to_string(common::grammar_path("mixed.txt"))
        .unwrap()
        .parse()
        .unwrap();

    let expected = ContextFreeGrammar::from_productions(
        "S A B C D E",
        'S',
        &[
            "S → aAB | C | ε",
            "A → aA | ε",
            "B → bB | b",
            "C → c | D",
            "D → Dd",
            "E → e",
        ],
    )
    .unwrap();

    assert_eq!(grammar, expected);
}

#[test]
fn missing_file_is_an_io_error() {
    let error = TextFormat::default()
        .load(common::grammar_path("does_not_exist.txt"))
        .unwrap_err();

    assert!(matches!(error, Error::Io(_)));
}
