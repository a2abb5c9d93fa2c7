//! End-to-end layout tests: DSL text in, primitives out

use tidemark::sequence::Diagram;
use tidemark::{layout, DiagramError, HJust, Line};

const WIDTH: f64 = 2000.0;

fn run(input: &str) -> Diagram {
    layout(input, WIDTH).unwrap()
}

/// Centre X of a lifeline, read back from its title label
fn centre_of(diagram: &Diagram, title: &str) -> f64 {
    diagram
        .primitives
        .labels_with_text(title)
        .next()
        .unwrap()
        .anchor
        .x
}

fn dashed_at(diagram: &Diagram, x: f64) -> Vec<&Line> {
    diagram
        .primitives
        .dashed_lines()
        .filter(|l| l.is_vertical() && (l.p1.x - x).abs() < 1e-6)
        .collect()
}

#[test]
fn test_single_message_between_two_lifelines() {
    let diagram = run("life A\nlife B\nfull A B msg");
    let primitives = &diagram.primitives;

    assert_eq!(primitives.polygons.len(), 1);
    assert_eq!(primitives.labels_with_text("msg").count(), 1);

    let tip_y = primitives.polygons[0].vertices[0].y;
    let fh = primitives.font_height;
    let interaction_lines: Vec<_> = primitives
        .lines
        .iter()
        .filter(|l| l.is_horizontal() && l.p1.y == tip_y && (l.p2.x - l.p1.x).abs() > 2.0 * fh)
        .collect();
    assert_eq!(interaction_lines.len(), 1);
    assert!(!interaction_lines[0].dashed);

    assert!(diagram.height > 0.10 * WIDTH);
    assert!(diagram.height < 0.25 * WIDTH);
}

#[test]
fn test_arrow_stops_at_open_box_edge() {
    let diagram = run("life A\nlife B\nfull A B msg");
    let b = centre_of(&diagram, "B");
    let tip_x = diagram.primitives.polygons[0].vertices[0].x;
    assert!(tip_x < b);
    assert!((b - tip_x - diagram.primitives.font_height / 2.0).abs() < 1e-6);
}

#[test]
fn test_unknown_lifeline_reports_statement() {
    let err = layout("life A\n\n# comment\nfull A Z hello", WIDTH).unwrap_err();
    let err = err.downcast_ref::<DiagramError>().unwrap();
    assert!(matches!(
        err,
        DiagramError::UnknownLifeline { name, statement: 1, line: 4 } if name == "Z"
    ));
    assert!(err.to_string().contains("line 4"));
}

#[test]
fn test_redundant_stop_is_harmless() {
    let once = run("life A\nstop A");
    let twice = run("life A\nstop A\nstop A");
    assert_eq!(once, twice);
}

#[test]
fn test_stop_ends_box_and_next_call_opens_another() {
    let one_box = run("life A\nlife B\nfull A B go\nfull A B again");
    let two_boxes = run("life A\nlife B\nfull A B go\nstop B\nfull A B again");

    let box_sides = |diagram: &Diagram| {
        let b = centre_of(diagram, "B");
        let half = diagram.primitives.font_height / 2.0;
        diagram
            .primitives
            .lines
            .iter()
            .filter(|l| {
                !l.dashed && l.is_vertical() && (l.p1.x - b).abs() < half + 1e-6
            })
            .count()
    };
    assert_eq!(box_sides(&one_box), 2);
    assert_eq!(box_sides(&two_boxes), 4);
}

#[test]
fn test_crossed_lifeline_is_gapped() {
    let diagram = run("life A\nlife B\nlife C\nfull A C hop");
    let b = centre_of(&diagram, "B");
    let label_y = diagram.primitives.labels_with_text("hop").next().unwrap().anchor.y;
    let tip_y = diagram.primitives.polygons[0].vertices[0].y;

    let segments = dashed_at(&diagram, b);
    assert_eq!(segments.len(), 2);
    for line in segments {
        let (top, bottom) = (line.p1.y.min(line.p2.y), line.p1.y.max(line.p2.y));
        assert!(bottom <= label_y || top > tip_y);
    }
}

#[test]
fn test_adjacent_lifelines_are_not_gapped() {
    let diagram = run("life A\nlife B\nlife C\nfull A B hop");
    let c = centre_of(&diagram, "C");
    assert_eq!(dashed_at(&diagram, c).len(), 1);
}

#[test]
fn test_self_call_draws_loop() {
    let diagram = run("life A\nself A think");
    let primitives = &diagram.primitives;
    assert_eq!(primitives.polygons.len(), 1);

    let label = primitives.labels_with_text("think").next().unwrap();
    assert_eq!(label.h_just, HJust::Left);
    assert!(label.anchor.x > centre_of(&diagram, "A"));
}

#[test]
fn test_long_self_call_label_gaps_next_lifeline() {
    let long = "x".repeat(80);
    let diagram = run(&format!("life A\nlife B\nself A {long}"));
    let b = centre_of(&diagram, "B");
    let label = diagram.primitives.labels_with_text(&long).next().unwrap();
    let mid_y = label.anchor.y + diagram.primitives.font_height / 2.0;

    let segments = dashed_at(&diagram, b);
    assert_eq!(segments.len(), 2);
    for line in segments {
        let (top, bottom) = (line.p1.y.min(line.p2.y), line.p1.y.max(line.p2.y));
        assert!(mid_y <= top || mid_y >= bottom);
    }
}

#[test]
fn test_short_self_call_label_leaves_next_lifeline_whole() {
    let diagram = run("life A\nlife B\nself A hi");
    let b = centre_of(&diagram, "B");
    assert_eq!(dashed_at(&diagram, b).len(), 1);
}

#[test]
fn test_dash_message_is_dashed() {
    let diagram = run("life A\nlife B\ndash B A later");
    let tip_y = diagram.primitives.polygons[0].vertices[0].y;
    assert!(diagram
        .primitives
        .dashed_lines()
        .any(|l| l.is_horizontal() && l.p1.y == tip_y));
}

#[test]
fn test_frame_title_and_multiline_labels() {
    let diagram = run("title Checkout | flow\nlife Shop Web | Shop\nlife Bank\nfull Shop Bank charge | card");
    let primitives = &diagram.primitives;
    let title = primitives.labels_with_text("Checkout").next().unwrap();
    assert_eq!(title.h_just, HJust::Left);
    assert_eq!(primitives.labels_with_text("flow").count(), 1);
    assert_eq!(primitives.labels_with_text("Web").count(), 1);

    let charge = primitives.labels_with_text("charge").next().unwrap();
    let card = primitives.labels_with_text("card").next().unwrap();
    assert!(card.anchor.y > charge.anchor.y);
}

#[test]
fn test_more_statements_make_taller_diagram() {
    let short = run("life A\nlife B\nfull A B one");
    let tall = run("life A\nlife B\nfull A B one\ndash B A two\nself A three");
    assert!(tall.height > short.height);
}

#[test]
fn test_text_size_enlarges_font() {
    let normal = run("life A");
    let large = run("textsize 2\nlife A");
    assert_eq!(
        large.primitives.font_height,
        2.0 * normal.primitives.font_height
    );
}

#[test]
fn test_layout_is_deterministic() {
    let input = "life A\nlife B\nlife C\nfull A C x\nself B y\ndash C A z\nstop A";
    assert_eq!(run(input), run(input));
}
