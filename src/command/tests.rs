use super::*;
use crate::embedding::Vectorizer;

fn parser() -> CommandParser {
    CommandParser::default()
}

#[test]
fn test_parse_hide_command() {
    let filter = parser().parse("hide sports").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Hide);
    assert_eq!(filter.query, "sports");
    assert!((filter.threshold - 0.5).abs() < 1e-6);
}

#[test]
fn test_parse_remove_alias() {
    let filter = parser().parse("remove crypto scams").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Hide);
    assert_eq!(filter.query, "crypto scams");
}

#[test]
fn test_parse_show_with_top_count() {
    let filter = parser().parse("show top 10 tech").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Show);
    assert_eq!(filter.query, "tech");
    assert_eq!(filter.top_k, 10);
}

#[test]
fn test_parse_show_default_top_k() {
    let filter = parser().parse("show cooking videos").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Show);
    assert_eq!(filter.query, "cooking videos");
    assert_eq!(filter.top_k, 20);
}

#[test]
fn test_parse_top_count_mid_query() {
    let filter = parser().parse("show tech top 5 news").unwrap().unwrap();

    assert_eq!(filter.query, "tech news");
    assert_eq!(filter.top_k, 5);
}

#[test]
fn test_parse_only_show_substring() {
    let filter = parser().parse("only show ai news").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Show);
    assert_eq!(filter.query, "ai news");
    assert_eq!(filter.top_k, 20);
}

#[test]
fn test_only_show_scan_matches_anywhere() {
    // Deliberately kept behavior: the substring scan is not anchored, so this
    // command still enters show-mode with the trailing text as the query.
    let filter = parser().parse("do not only show cats").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Show);
    assert_eq!(filter.query, "cats");
}

#[test]
fn test_parse_only_prefix() {
    let filter = parser().parse("only dogs").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Show);
    assert_eq!(filter.query, "dogs");
}

#[test]
fn test_parse_is_case_insensitive() {
    let filter = parser().parse("HIDE Sports News").unwrap().unwrap();

    assert_eq!(filter.mode, FilterMode::Hide);
    assert_eq!(filter.query, "sports news");
}

#[test]
fn test_parse_empty_input_is_none() {
    assert!(parser().parse("").unwrap().is_none());
    assert!(parser().parse("   \t ").unwrap().is_none());
}

#[test]
fn test_parse_unrecognized_input_is_none() {
    assert!(parser().parse("make it nicer").unwrap().is_none());
    assert!(parser().parse("hidden agenda").unwrap().is_none());
}

#[test]
fn test_parse_top_zero_allowed() {
    let filter = parser().parse("show top 0 anything").unwrap().unwrap();
    assert_eq!(filter.top_k, 0);
}

#[test]
fn test_parse_top_count_overflow_is_error() {
    let huge = "show top 99999999999999999999999999 tech";
    assert!(matches!(
        parser().parse(huge),
        Err(CommandError::InvalidTopCount { .. })
    ));
}

#[test]
fn test_query_vector_matches_mean_vector() {
    let vectorizer = Vectorizer::new();
    let parser = CommandParser::new(vectorizer.clone(), 0.5, 20);

    let filter = parser.parse("hide machine learning").unwrap().unwrap();
    assert_eq!(filter.query_vector, vectorizer.mean_vector("machine learning"));
}

#[test]
fn test_custom_defaults_apply() {
    let parser = CommandParser::new(Vectorizer::new(), 0.8, 7);

    let hide = parser.parse("hide spam").unwrap().unwrap();
    assert!((hide.threshold - 0.8).abs() < 1e-6);

    let show = parser.parse("show tech").unwrap().unwrap();
    assert_eq!(show.top_k, 7);
}
