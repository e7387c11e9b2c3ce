use series_geom::core::adornment::{AdornmentPosition, anchors_per_point};
use series_geom::core::reconcile::reconcile;

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    data_index: usize,
    created_in_pass: u32,
    value: f64,
}

fn run_pass(segments: &mut Vec<Segment>, values: &[f64], pass: u32) {
    reconcile(
        segments,
        values.len(),
        |i| Segment {
            data_index: i,
            created_in_pass: pass,
            value: values[i],
        },
        |segment, i| {
            segment.data_index = i;
            segment.value = values[i];
        },
    );
}

#[test]
fn count_matches_after_every_pass() {
    let mut segments = Vec::new();
    for (pass, len) in [3usize, 7, 7, 2, 0, 5].iter().enumerate() {
        let values: Vec<f64> = (0..*len).map(|i| i as f64 * 10.0).collect();
        run_pass(&mut segments, &values, pass as u32);
        assert_eq!(segments.len(), *len);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.data_index, i);
            assert_eq!(segment.value, i as f64 * 10.0);
        }
    }
}

#[test]
fn surviving_entries_keep_their_creation_pass() {
    let mut segments = Vec::new();
    run_pass(&mut segments, &[1.0, 2.0, 3.0], 0);
    run_pass(&mut segments, &[4.0, 5.0, 6.0, 7.0, 8.0], 1);

    // Indices below the old count were mutated in place, not rebuilt.
    assert_eq!(segments[0].created_in_pass, 0);
    assert_eq!(segments[2].created_in_pass, 0);
    assert_eq!(segments[3].created_in_pass, 1);
    assert_eq!(segments[4].created_in_pass, 1);
    assert_eq!(segments[2].value, 6.0);
}

#[test]
fn shrinking_trims_the_tail_not_the_front() {
    let mut segments = Vec::new();
    run_pass(&mut segments, &[1.0, 2.0, 3.0, 4.0], 0);
    run_pass(&mut segments, &[9.0, 8.0], 1);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].created_in_pass, 0);
    assert_eq!(segments[0].value, 9.0);
    assert_eq!(segments[1].value, 8.0);
}

#[test]
fn adornment_multiplier_follows_position_and_grouping() {
    assert_eq!(anchors_per_point(AdornmentPosition::Top, false), 1);
    assert_eq!(anchors_per_point(AdornmentPosition::Bottom, true), 1);
    assert_eq!(anchors_per_point(AdornmentPosition::Center, true), 1);
    assert_eq!(anchors_per_point(AdornmentPosition::TopAndBottom, false), 2);
    assert_eq!(anchors_per_point(AdornmentPosition::TopAndBottom, true), 4);
}
