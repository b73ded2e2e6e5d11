use crate::error::RatingError;
use crate::source::{InMemoryRatings, RatingSource};

const SAMPLE: &str = "\
# user,item,rating,timestamp
1,10,4.0,881250949
1,20,2.5,881250950

2,10,5,881250951
2,30,3.5
";

#[test]
fn parses_delimited_records() {
    crate::tests::init();
    let ratings = InMemoryRatings::from_delimited(SAMPLE).unwrap();
    assert_eq!(ratings.n_users(), 2);
    assert_eq!(ratings.n_items(), 3);
    assert_eq!(ratings.n_ratings(), 4);

    let v = ratings.rating_vector(1).unwrap();
    assert_eq!(v.items(), &[10, 20]);
    assert_eq!(v.get(20), Some(2.5));
    assert_eq!(ratings.raters_of(10).unwrap(), vec![1, 2]);
    assert_eq!(ratings.users().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(ratings.items().collect::<Vec<_>>(), vec![10, 20, 30]);
}

#[test]
fn reports_malformed_line_numbers() {
    let err = InMemoryRatings::from_delimited("1,10,4\n2,x,3\n").unwrap_err();
    match err {
        RatingError::Parse { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("item id"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = InMemoryRatings::from_delimited("1,10\n").unwrap_err();
    assert!(matches!(err, RatingError::Parse { line: 1, .. }));

    let err = InMemoryRatings::from_delimited("1,10,inf\n").unwrap_err();
    assert!(matches!(err, RatingError::Parse { line: 1, .. }));
}

#[test]
fn raters_are_sorted_and_unique() {
    let ratings = InMemoryRatings::from_triples(vec![(9, 1, 3.0), (2, 1, 4.0), (9, 1, 5.0), (5, 1, 1.0)])
        .unwrap();
    assert_eq!(ratings.raters_of(1).unwrap(), vec![2, 5, 9]);
    assert_eq!(ratings.rating_vector(9).unwrap().get(1), Some(5.0));
}
