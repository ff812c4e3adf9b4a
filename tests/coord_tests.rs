use battleships::coord::column_index;
use battleships::{parse_label, render_label, CoordError};
use proptest::prelude::*;

#[test]
fn test_label_examples() {
    assert_eq!(render_label(0, 10), "A1");
    assert_eq!(render_label(99, 10), "J10");
    assert_eq!(parse_label("A10", 10, 10), Ok(90));
    assert_eq!(render_label(30, 84), "e1");
    assert_eq!(render_label(83 + 84, 84), "~2");
    assert_eq!(parse_label("~2", 84, 2), Ok(167));
    assert_eq!(column_index('['), Some(74));
    assert_eq!(column_index('1'), None);
}

#[test]
fn test_label_respects_board() {
    assert_eq!(parse_label("k1", 20, 5), Err(CoordError::UnknownColumn('k')));
    assert_eq!(parse_label("k1", 40, 5), Ok(36));
    assert_eq!(
        parse_label("A6", 20, 5),
        Err(CoordError::RowOutOfRange { row: 6, height: 5 })
    );
}

proptest! {
    #[test]
    fn labels_round_trip(width in 1usize..=84, height in 1usize..=120, seed in any::<usize>()) {
        let pos = seed % (width * height);
        let label = render_label(pos, width);
        prop_assert_eq!(parse_label(&label, width, height), Ok(pos));
    }
}
