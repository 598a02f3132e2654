//! End-to-end frame behaviour: structural edits, growth, sorting,
//! statistics, and conversion working together through the public API.

use dframe::{
    convert,
    merge,
    Cell,
    Column,
    Error,
    Flavour,
    Frame,
};

// ============================================================================
// Growth and type enforcement
// ============================================================================

#[test]
fn test_row_add_growth_and_type_enforcement() {
    let mut frame = Frame::from_columns(vec![
        Column::from_values(Vec::<i32>::new()),
        Column::from_values(Vec::<String>::new()),
    ])
    .unwrap();
    assert_eq!(frame.rows(), 0);
    assert_eq!(frame.capacity(), 0);

    for i in 0..10 {
        frame
            .add_row(vec![Cell::Int(i), Cell::Str(format!("row{i}"))])
            .unwrap();
    }
    assert_eq!(frame.rows(), 10);
    // doubling growth from zero: 2, 4, 8, 16
    assert_eq!(frame.capacity(), 16);
    for col in frame.iter_columns() {
        assert_eq!(col.capacity(), 16);
    }

    // a null cell must not enter a default frame
    let err = frame.add_row(vec![Cell::Int(7), Cell::Null]).unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
    assert_eq!(frame.rows(), 10);

    // an empty string is stored as the placeholder
    frame
        .add_row(vec![Cell::Int(7), Cell::Str(String::new())])
        .unwrap();
    assert_eq!(frame.get::<String>(1, 10).unwrap().unwrap(), "n/a");
}

#[test]
fn test_structural_edit_workout() {
    let mut frame = Frame::with_names(
        vec!["id".into(), "word".into()],
        vec![
            Column::from_values(vec![1i32, 2, 3]),
            Column::from_values(["a", "b", "c"].map(String::from).to_vec()),
        ],
    )
    .unwrap();

    frame.insert_row(0, vec![Cell::Int(0), Cell::from("z")]).unwrap();
    frame
        .add_named_column("score", Column::from_values(vec![4.0f64, 3.0, 2.0, 1.0]))
        .unwrap();
    frame.remove_row(2).unwrap();

    assert_eq!(frame.rows(), 3);
    assert_eq!(frame.column_count(), 3);
    assert_eq!(
        frame.row(0).unwrap(),
        vec![Cell::Int(0), Cell::Str("z".into()), Cell::Double(4.0)]
    );
    assert_eq!(frame.get_named::<i32>("id", 2).unwrap(), Some(3));

    let removed = frame.remove_column_by_name("word").unwrap();
    assert_eq!(removed.capacity(), frame.capacity());
    assert_eq!(frame.column_index("score").unwrap(), 1);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_nullable_sort_moves_nulls_to_tail() {
    let mut frame = Frame::from_columns(vec![
        Column::from_options(vec![Some(3i32), None, Some(1), None, Some(2)]),
        Column::from_options(vec![
            Some("three".to_string()),
            Some("null-1".to_string()),
            Some("one".to_string()),
            Some("null-2".to_string()),
            Some("two".to_string()),
        ]),
    ])
    .unwrap();

    frame.sort_by(0).unwrap();

    let keys: Vec<Option<i32>> =
        (0..5).map(|r| frame.get::<i32>(0, r).unwrap()).collect();
    assert_eq!(keys, vec![Some(1), Some(2), Some(3), None, None]);

    // companions moved in lockstep
    assert_eq!(frame.get::<String>(1, 0).unwrap().unwrap(), "one");
    assert_eq!(frame.get::<String>(1, 1).unwrap().unwrap(), "two");
    assert_eq!(frame.get::<String>(1, 2).unwrap().unwrap(), "three");
    let mut tail: Vec<String> = (3..5)
        .map(|r| frame.get::<String>(1, r).unwrap().unwrap())
        .collect();
    tail.sort();
    assert_eq!(tail, vec!["null-1".to_string(), "null-2".to_string()]);
}

#[test]
fn test_sort_produces_permutation() {
    let values = vec![5i64, -1, 5, 0, 99, -7, 5, 3];
    let mut frame = Frame::from_columns(vec![
        Column::from_values(values.clone()),
        Column::from_values((0..8i32).collect::<Vec<_>>()),
    ])
    .unwrap();
    frame.sort_by(0).unwrap();

    let sorted: Vec<i64> =
        (0..8).map(|r| frame.get::<i64>(0, r).unwrap().unwrap()).collect();
    let mut expected = values;
    expected.sort_unstable();
    assert_eq!(sorted, expected);

    let mut tags: Vec<i32> =
        (0..8).map(|r| frame.get::<i32>(1, r).unwrap().unwrap()).collect();
    tags.sort_unstable();
    assert_eq!(tags, (0..8).collect::<Vec<_>>());
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_statistics_skip_nulls() {
    let frame = Frame::from_columns(vec![Column::from_options(vec![
        Some(1.0f64),
        None,
        Some(3.0),
        None,
        Some(5.0),
    ])])
    .unwrap();

    assert_eq!(frame.average(0).unwrap(), 3.0);
    assert_eq!(frame.minimum(0).unwrap(), 1.0);
    assert_eq!(frame.maximum(0).unwrap(), 5.0);

    let all_null = Frame::from_columns(vec![Column::from_options(
        vec![None::<f64>, None],
    )])
    .unwrap();
    assert!(matches!(all_null.average(0), Err(Error::Unsupported(_))));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_matches_rendered_values() {
    let frame = Frame::with_names(
        vec!["id".into(), "word".into()],
        vec![
            Column::from_values(vec![12i32, 7, 128, 7]),
            Column::from_values(
                ["apple", "pear", "plum", "peach"].map(String::from).to_vec(),
            ),
        ],
    )
    .unwrap();

    assert_eq!(frame.index_of_named("word", "p.*").unwrap(), Some(1));
    assert_eq!(frame.index_of_all(0, "7").unwrap(), vec![1, 3]);
    assert_eq!(frame.index_of_all(0, "12[0-9]?").unwrap(), vec![0, 2]);

    let hits = frame.find_all_named("word", "p(ear|lum)").unwrap();
    assert_eq!(hits.rows(), 2);
    assert_eq!(hits.get::<i32>(0, 0).unwrap(), Some(7));
    assert_eq!(hits.get::<String>(1, 1).unwrap().unwrap(), "plum");
    assert_eq!(hits.column_index("word").unwrap(), 1);
}

// ============================================================================
// Conversion and merging
// ============================================================================

#[test]
fn test_convert_round_trip_preserves_values() {
    let frame = Frame::with_names(
        vec!["id".into(), "word".into(), "flag".into()],
        vec![
            Column::from_values(vec![1i32, 2]),
            Column::from_values(["x", "y"].map(String::from).to_vec()),
            Column::from_values(vec![true, false]),
        ],
    )
    .unwrap();

    let nullable = convert(&frame, Flavour::Nullable).unwrap();
    assert_eq!(nullable.flavour(), Flavour::Nullable);
    for r in 0..2 {
        for c in 0..3 {
            assert!(!nullable.cell(c, r).unwrap().is_null());
        }
    }

    let round = convert(&nullable, Flavour::Default).unwrap();
    assert_eq!(round, frame);
}

#[test]
fn test_convert_materialises_defaults() {
    let frame = Frame::from_columns(vec![
        Column::from_options(vec![Some(1i64), None]),
        Column::from_options(vec![Some("v".to_string()), None]),
    ])
    .unwrap();

    let converted = convert(&frame, Flavour::Default).unwrap();
    assert_eq!(converted.get::<i64>(0, 1).unwrap(), Some(0));
    assert_eq!(converted.get::<String>(1, 1).unwrap().unwrap(), "n/a");
}

#[test]
fn test_merge_keeps_order_and_names() {
    let left = Frame::with_names(
        vec!["a".into(), "b".into()],
        vec![
            Column::from_values(vec![1i32, 2]),
            Column::from_values(vec![true, false]),
        ],
    )
    .unwrap();
    let right = Frame::with_names(
        vec!["c".into()],
        vec![Column::from_values(vec![0.5f32, 1.5])],
    )
    .unwrap();

    let merged = merge(&[left.clone(), right.clone()]).unwrap();
    assert_eq!(merged.column_count(), 3);
    assert_eq!(merged.rows(), 2);
    assert_eq!(merged.flavour(), Flavour::Default);
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        assert_eq!(merged.column_index(name).unwrap(), i);
    }
    assert_eq!(merged.get::<f32>(2, 1).unwrap(), Some(1.5));

    // duplicate names across inputs are rejected
    assert!(matches!(
        merge(&[left.clone(), left]),
        Err(Error::InvalidRequest(_))
    ));
}

// ============================================================================
// Uniform capacity invariant
// ============================================================================

#[test]
fn test_columns_share_capacity_through_edits() {
    let mut frame = Frame::from_columns(vec![
        Column::from_values(vec![0i8; 3]),
        Column::from_values(vec![0.0f32; 3]),
        Column::from_values(vec!['.'; 3]),
    ])
    .unwrap();

    for i in 0..12i8 {
        frame
            .add_row(vec![
                Cell::Byte(i),
                Cell::Float(f32::from(i)),
                Cell::Char('r'),
            ])
            .unwrap();
    }
    frame.remove_rows(0, 11).unwrap();
    frame
        .insert_column_at(1, Column::from_values(vec![9i64, 9, 9, 9]))
        .unwrap();

    let capacity = frame.capacity();
    for col in frame.iter_columns() {
        assert_eq!(col.capacity(), capacity);
    }
    assert!(frame.rows() <= capacity);
}
