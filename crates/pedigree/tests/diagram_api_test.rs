//! Integration tests for the Diagram API
//!
//! These tests drive a diagram through the public surface only: building a
//! family, routing its connections, and full pointer gestures.

use pedigree::{
    Diagram, PedigreeError,
    config::AppConfig,
    connection::{ConnectionKind, TwinKind},
    geometry::Point,
    interaction::DiagramEvent,
    node::ShapeKind,
    router::Route,
    surface::Surface,
};

#[derive(Default)]
struct Recorder {
    routes: Vec<(ConnectionKind, Route)>,
    twins: usize,
    nodes: Vec<Point>,
}

impl Surface for Recorder {
    fn draw_connection(&mut self, kind: ConnectionKind, route: &Route) {
        self.routes.push((kind, *route));
    }

    fn draw_twins(&mut self, _kind: TwinKind, _route: &pedigree::router::TwinRoute) {
        self.twins += 1;
    }

    fn draw_node(&mut self, _node: &pedigree::node::Node, origin: Point) {
        self.nodes.push(origin);
    }
}

#[test]
fn test_sibling_scenario() {
    let mut diagram = Diagram::default();
    let a = diagram.create_node(ShapeKind::Male, Point::new(0.0, 0.0));
    let b = diagram.create_node(ShapeKind::Female, Point::new(200.0, 0.0));
    diagram.connect(a, b, ConnectionKind::Sibling);

    let mut recorder = Recorder::default();
    assert_eq!(diagram.draw(&mut recorder), 1);

    assert_eq!(
        recorder.routes[0].1,
        Route::Elbow {
            anchor: Point::new(30.0, 30.0),
            bend: Point::new(130.0, 30.0),
            target: Point::new(230.0, 30.0),
        }
    );
}

#[test]
fn test_empty_diagram_draws_nothing() {
    let diagram = Diagram::default();
    let mut recorder = Recorder::default();

    assert_eq!(diagram.draw(&mut recorder), 0);
    assert!(recorder.routes.is_empty());
    assert_eq!(recorder.twins, 0);
    assert!(recorder.nodes.is_empty());

    let svg = diagram.render_svg().expect("empty diagram renders");
    assert!(svg.contains("<svg"));
}

#[test]
fn test_delete_node_scenario() {
    let mut diagram = Diagram::default();
    let mother = diagram.create_node(ShapeKind::Female, Point::new(120.0, 0.0));
    let father = diagram.create_node(ShapeKind::Male, Point::new(0.0, 0.0));
    let twin_a = diagram.create_node(ShapeKind::Male, Point::new(0.0, 300.0));
    let twin_b = diagram.create_node(ShapeKind::Male, Point::new(150.0, 300.0));
    let cousin = diagram.create_node(ShapeKind::Unknown, Point::new(450.0, 300.0));

    diagram.connect_twins(mother, twin_a, twin_b, TwinKind::Identical);
    diagram.connect(mother, father, ConnectionKind::Partnership);
    diagram.connect(mother, cousin, ConnectionKind::Consanguineous);
    diagram.connect(twin_b, cousin, ConnectionKind::Sibling);

    diagram.delete_node(mother);

    assert!(diagram.twins_connections().is_empty());
    assert_eq!(diagram.connections().len(), 1);
    assert!(diagram.connections()[0].touches(cousin));
    assert!(!diagram.connections()[0].touches(mother));

    // father's partner link now dangles and reads as unmarried
    let father_node = diagram.node(father).unwrap();
    assert!(diagram.nodes().partner_of(father_node).is_none());

    let mut recorder = Recorder::default();
    assert_eq!(diagram.draw(&mut recorder), 1);
    assert_eq!(recorder.nodes.len(), 4);
}

#[test]
fn test_drag_then_pan_then_zoom() {
    let mut diagram = Diagram::default();
    let a = diagram.create_node(ShapeKind::Male, Point::new(0.0, 0.0));
    let b = diagram.create_node(ShapeKind::Female, Point::new(120.0, 0.0));
    diagram.connect(a, b, ConnectionKind::Partnership);
    diagram.take_redraw();

    // drag the first node
    let down = diagram.pointer_down(Point::new(10.0, 10.0));
    assert_eq!(down.events(), &[DiagramEvent::NodeClicked(a)]);
    let moved = diagram.pointer_move(Point::new(48.0, 71.0));
    assert_eq!(moved.events(), &[DiagramEvent::NodeDragged(a)]);
    diagram.pointer_up();
    assert_eq!(diagram.node(a).unwrap().position(), Point::new(45.0, 60.0));
    assert!(diagram.take_redraw());

    // pan from empty space
    let down = diagram.pointer_down(Point::new(600.0, 600.0));
    assert_eq!(down.events(), &[DiagramEvent::DiagramClicked]);
    diagram.pointer_move(Point::new(630.0, 580.0));
    diagram.pointer_up();
    assert_eq!(diagram.camera().offset(), Point::new(30.0, -20.0));

    let mut recorder = Recorder::default();
    diagram.draw(&mut recorder);
    assert_eq!(
        recorder.routes[0].1,
        Route::Straight {
            from: Point::new(105.0, 70.0),
            to: Point::new(180.0, 10.0),
        }
    );

    // zoom leaves routing untouched
    let zoomed = diagram.wheel(Point::new(300.0, 300.0), 250.0);
    assert!(matches!(zoomed.events(), [DiagramEvent::Scaled(_)]));
    let mut after_zoom = Recorder::default();
    diagram.draw(&mut after_zoom);
    assert_eq!(after_zoom.routes[0].1, recorder.routes[0].1);
}

#[test]
fn test_render_svg_contains_glyphs_and_lines() {
    let mut diagram = Diagram::default();
    let father = diagram.create_node(ShapeKind::Male, Point::new(0.0, 0.0));
    let mother = diagram.create_node(ShapeKind::Female, Point::new(120.0, 0.0));
    let child = diagram.create_node(ShapeKind::Unknown, Point::new(60.0, 200.0));
    diagram.connect(father, mother, ConnectionKind::Partnership);
    diagram.connect(mother, child, ConnectionKind::Sibling);

    let svg = diagram.render_svg().expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("<rect"));
    assert!(svg.contains("<circle"));
    assert!(svg.contains("<polygon"));
    assert_eq!(svg.matches("<polyline").count(), 2);
}

#[test]
fn test_config_file_drives_diagram() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pedigree.toml");
    std::fs::write(
        &path,
        "[interaction]\ngrid_unit = 10.0\n\n[style]\nline_color = \"#336699\"\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).expect("config loads");
    let mut diagram = Diagram::new(config);
    let id = diagram.create_node(ShapeKind::Male, Point::new(0.0, 0.0));

    diagram.pointer_down(Point::new(5.0, 5.0));
    diagram.pointer_move(Point::new(18.0, 18.0));
    diagram.pointer_up();
    assert_eq!(diagram.node(id).unwrap().position(), Point::new(10.0, 10.0));

    let output = dir.path().join("pedigree.svg");
    diagram.write_svg(&output).expect("svg written");
    assert!(std::fs::read_to_string(&output).unwrap().contains("<svg"));
}

#[test]
fn test_invalid_style_color_fails_render() {
    let config = AppConfig::from_toml_str("[style]\nnode_stroke_color = \"not-a-color\"").unwrap();
    let diagram = Diagram::new(config);

    assert!(matches!(
        diagram.render_svg(),
        Err(PedigreeError::InvalidColor(_))
    ));
}
