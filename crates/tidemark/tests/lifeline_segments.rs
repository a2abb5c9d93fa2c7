//! Tests for lifeline segment assembly

use tidemark::sequence::LifelineExtent;
use tidemark::Segment;

#[test]
fn test_piece_exactly_minimum_is_kept() {
    let extent = LifelineExtent::new(0.0, 100.0, 5.0);
    let segments = extent.assemble(&[Segment::new(5.0, 95.0)], &[]);
    assert_eq!(
        segments,
        vec![Segment::new(0.0, 5.0), Segment::new(95.0, 100.0)]
    );
}

#[test]
fn test_piece_below_minimum_is_dropped() {
    let extent = LifelineExtent::new(0.0, 100.0, 5.0);
    let segments = extent.assemble(&[Segment::new(4.0, 10.0)], &[]);
    assert_eq!(segments, vec![Segment::new(10.0, 100.0)]);
}

#[test]
fn test_gap_and_box_sharing_an_edge_leave_no_sliver() {
    let extent = LifelineExtent::new(0.0, 100.0, 0.0);
    let segments = extent.assemble(&[Segment::new(20.0, 30.0)], &[Segment::new(30.0, 60.0)]);
    assert_eq!(
        segments,
        vec![Segment::new(0.0, 20.0), Segment::new(60.0, 100.0)]
    );
}

#[test]
fn test_fully_obstructed_lifeline() {
    let extent = LifelineExtent::new(10.0, 50.0, 1.0);
    let segments = extent.assemble(&[], &[Segment::new(0.0, 60.0)]);
    assert!(segments.is_empty());
}

#[test]
fn test_segments_avoid_every_obstruction() {
    let extent = LifelineExtent::new(0.0, 200.0, 1.0);
    let gaps = [
        Segment::new(150.0, 160.0),
        Segment::new(10.0, 20.0),
        Segment::new(15.0, 40.0),
    ];
    let boxes = [Segment::new(80.0, 120.0)];
    let segments = extent.assemble(&gaps, &boxes);

    assert_eq!(segments.len(), 4);
    for seg in &segments {
        for obstacle in gaps.iter().chain(&boxes) {
            assert!(seg.end <= obstacle.start || seg.start >= obstacle.end);
        }
    }
}
