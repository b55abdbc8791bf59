//! Tests for wide/long pivots.

use polars::prelude::{AnyValue, DataFrame, DataType, NamedFrom, Series};
use tidy_model::frame::column_names;
use tidy_model::{TidyError, WideToLongOptions};
use tidy_reshape::{long_to_wide, wide_to_long};

fn scores_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("id".into(), &[1i64, 2]).into(),
        Series::new("score_math".into(), &[90i64, 80]).into(),
        Series::new("age".into(), &[30i64, 41]).into(),
        Series::new("score_read".into(), &[70i64, 60]).into(),
    ])
    .unwrap()
}

fn longs(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name).unwrap().i64().unwrap().into_iter().collect()
}

fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

#[test]
fn wide_to_long_melts_stub_columns() {
    let df = scores_frame();
    let long = wide_to_long(&df, "score", &["id"], &WideToLongOptions::default()).unwrap();

    assert_eq!(column_names(&long), vec!["id", "variable", "score"]);
    assert_eq!(long.height(), df.height() * 2);
    assert_eq!(longs(&long, "id"), vec![Some(1), Some(2), Some(1), Some(2)]);
    assert_eq!(
        strings(&long, "variable"),
        vec![
            Some("math".to_string()),
            Some("math".to_string()),
            Some("read".to_string()),
            Some("read".to_string()),
        ]
    );
    assert_eq!(
        longs(&long, "score"),
        vec![Some(90), Some(80), Some(70), Some(60)]
    );
}

#[test]
fn wide_to_long_custom_var_name_and_missing_values() {
    let df = DataFrame::new(vec![
        Series::new("resp".into(), &["a", "b"]).into(),
        Series::new("Q1-x".into(), &[Some(1i64), None]).into(),
        Series::new("Q1-y".into(), &[Some(2i64), Some(3)]).into(),
    ])
    .unwrap();
    let options = WideToLongOptions::new()
        .with_var_name("item")
        .with_separator("-");
    let long = wide_to_long(&df, "Q1", &["resp"], &options).unwrap();

    assert_eq!(column_names(&long), vec!["resp", "item", "Q1"]);
    assert_eq!(
        strings(&long, "item"),
        vec![
            Some("x".to_string()),
            Some("x".to_string()),
            Some("y".to_string()),
            Some("y".to_string()),
        ]
    );
    assert_eq!(longs(&long, "Q1"), vec![Some(1), None, Some(2), Some(3)]);
}

#[test]
fn wide_to_long_without_id_columns() {
    let df = scores_frame();
    let long = wide_to_long::<&str>(&df, "score", &[], &WideToLongOptions::default()).unwrap();
    assert_eq!(column_names(&long), vec!["variable", "score"]);
    assert_eq!(long.height(), 4);
}

#[test]
fn wide_to_long_errors() {
    let df = scores_frame();

    let err = wide_to_long(&df, "rating", &["id"], &WideToLongOptions::default()).unwrap_err();
    assert!(matches!(err, TidyError::NoStubColumns { ref stub } if stub == "rating"));

    let err = wide_to_long(&df, "score", &["uid"], &WideToLongOptions::default()).unwrap_err();
    assert!(matches!(err, TidyError::ColumnsNotFound { .. }));

    let options = WideToLongOptions::new().with_var_name("id");
    let err = wide_to_long(&df, "score", &["id"], &options).unwrap_err();
    assert!(matches!(err, TidyError::DuplicateColumn { ref column } if column == "id"));
}

fn answers_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("respondent".into(), &[1i64, 1, 2, 3]).into(),
        Series::new("question".into(), &["Q1", "Q2", "Q1", "Q2"]).into(),
        Series::new("answer".into(), &[5i64, 3, 4, 2]).into(),
    ])
    .unwrap()
}

#[test]
fn long_to_wide_pivots_in_first_seen_order() {
    let df = answers_frame();
    let wide = long_to_wide(&df, "respondent", "question", "answer", AnyValue::Null).unwrap();

    assert_eq!(column_names(&wide), vec!["respondent", "Q1", "Q2"]);
    assert_eq!(longs(&wide, "respondent"), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(longs(&wide, "Q1"), vec![Some(5), Some(4), None]);
    assert_eq!(longs(&wide, "Q2"), vec![Some(3), None, Some(2)]);
}

#[test]
fn long_to_wide_uses_fill_value_for_absent_pairs() {
    let df = answers_frame();
    let wide =
        long_to_wide(&df, "respondent", "question", "answer", AnyValue::Int64(0)).unwrap();

    assert_eq!(longs(&wide, "Q1"), vec![Some(5), Some(4), Some(0)]);
    assert_eq!(longs(&wide, "Q2"), vec![Some(3), Some(0), Some(2)]);
}

#[test]
fn long_to_wide_rejects_duplicate_pairs() {
    let df = DataFrame::new(vec![
        Series::new("respondent".into(), &[1i64, 1]).into(),
        Series::new("question".into(), &["Q1", "Q1"]).into(),
        Series::new("answer".into(), &[5i64, 3]).into(),
    ])
    .unwrap();
    let err = long_to_wide(&df, "respondent", "question", "answer", AnyValue::Null).unwrap_err();

    match err {
        TidyError::DuplicateEntry { index, column } => {
            assert_eq!(index, "1");
            assert_eq!(column, "Q1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn long_to_wide_skips_rows_with_missing_keys() {
    let df = DataFrame::new(vec![
        Series::new("respondent".into(), &[Some(1i64), None, Some(2)]).into(),
        Series::new("question".into(), &[Some("Q1"), Some("Q1"), None]).into(),
        Series::new("answer".into(), &[5i64, 3, 4]).into(),
    ])
    .unwrap();
    let wide = long_to_wide(&df, "respondent", "question", "answer", AnyValue::Null).unwrap();

    assert_eq!(column_names(&wide), vec!["respondent", "Q1"]);
    assert_eq!(longs(&wide, "respondent"), vec![Some(1)]);
    assert_eq!(longs(&wide, "Q1"), vec![Some(5)]);
}

#[test]
fn long_to_wide_missing_columns_fail() {
    let df = answers_frame();
    let err = long_to_wide(&df, "respondent", "item", "value", AnyValue::Null).unwrap_err();
    match err {
        TidyError::ColumnsNotFound { columns } => assert_eq!(columns, vec!["item", "value"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn long_then_wide_restores_the_wide_table() {
    let df = scores_frame().drop("age").unwrap();
    let long = wide_to_long(&df, "score", &["id"], &WideToLongOptions::default()).unwrap();
    let wide = long_to_wide(&long, "id", "variable", "score", AnyValue::Null).unwrap();

    assert_eq!(column_names(&wide), vec!["id", "math", "read"]);
    assert_eq!(longs(&wide, "math"), longs(&df, "score_math"));
    assert_eq!(longs(&wide, "read"), longs(&df, "score_read"));
}

#[test]
fn long_to_wide_all_null_column_keeps_value_dtype() {
    let df = DataFrame::new(vec![
        Series::new("id".into(), &[1i64, 2]).into(),
        Series::new("q".into(), &["Q1", "Q2"]).into(),
        Series::new("v".into(), &[Some(5i64), None]).into(),
    ])
    .unwrap();
    let wide = long_to_wide(&df, "id", "q", "v", AnyValue::Null).unwrap();

    assert_eq!(wide.column("Q2").unwrap().dtype(), &DataType::Int64);
    assert_eq!(longs(&wide, "Q1"), vec![Some(5), None]);
    assert_eq!(longs(&wide, "Q2"), vec![None, None]);
}

#[test]
fn wide_to_long_all_null_stub_keeps_dtype() {
    let df = DataFrame::new(vec![
        Series::new("id".into(), &[1i64, 2]).into(),
        Series::new("Q1_a".into(), &[None::<i64>, None]).into(),
        Series::new("Q1_b".into(), &[None::<i64>, None]).into(),
    ])
    .unwrap();
    let long = wide_to_long(&df, "Q1", &["id"], &WideToLongOptions::default()).unwrap();

    assert_eq!(long.column("Q1").unwrap().dtype(), &DataType::Int64);
    assert_eq!(longs(&long, "Q1"), vec![None; 4]);
}
