//! End-to-end canvas scenarios: sketching, autogeneration, adoption,
//! clearing and figure-carrying events.

use std::cell::RefCell;
use std::rc::Rc;

use jigsaw_canvas::{Canvas, CanvasConfig, PieceDescriptor};
use jigsaw_core::{Anchor, Hint, Insert, MetadataPatch, PieceId, PieceKey, Side, Structure};
use jigsaw_puzzle::{flipflop, AutogenerateOptions, Puzzle};
use jigsaw_test_utils::{init_tracing, standard_canvas, DummyFigure, DummyPainter};

fn plain_canvas() -> Canvas<DummyPainter> {
    Canvas::new(CanvasConfig::new(800.0, 800.0), DummyPainter::new()).unwrap()
}

#[test]
fn single_piece_puzzle() {
    init_tracing();
    let mut canvas = standard_canvas();
    canvas.sketch_piece(PieceDescriptor::new(
        Structure {
            right: Insert::Tab,
            down: Insert::Tab,
            left: Insert::Slot,
            ..Structure::default()
        },
        MetadataPatch::new()
            .id("a")
            .current_position(Anchor::new(50.0, 50.0))
            .hint("color", "red"),
    ));
    canvas.draw();

    assert_eq!(canvas.painter().figures, 1);
    assert!(canvas.painter().drawn);
    assert!(canvas.figure_by_key(&PieceKey::ByIndex(1)).is_none());
    assert!(canvas.figure_by_key(&PieceKey::from("a")).is_some());

    let puzzle = canvas.puzzle();
    assert_eq!(puzzle.len(), 1);
    assert_eq!(
        puzzle.head().map(|p| p.central_anchor()),
        Some(Anchor::new(50.0, 50.0))
    );
}

#[test]
fn single_piece_without_positions_sits_at_origin() {
    let mut canvas = plain_canvas();
    canvas.sketch_piece(PieceDescriptor::new("----", MetadataPatch::new().id("a")));
    canvas.draw();

    let head = canvas.puzzle().head().unwrap();
    assert_eq!(head.metadata().target_position, Anchor::ORIGIN);
    assert_eq!(head.metadata().current_position, Anchor::ORIGIN);
}

#[test]
fn current_position_defaults_to_target() {
    let mut canvas = plain_canvas();
    let id = canvas.sketch_piece(PieceDescriptor::new(
        "----",
        MetadataPatch::new()
            .id("a")
            .target_position(Anchor::new(10.0, 15.0)),
    ));
    canvas.draw();

    let piece = canvas.piece_mut(id).unwrap();
    assert_eq!(piece.metadata().current_position, Anchor::new(10.0, 15.0));
    // The two anchors are stored independently.
    piece.translate(1.0, 1.0);
    assert_eq!(piece.metadata().target_position, Anchor::new(10.0, 15.0));
    assert_eq!(piece.metadata().current_position, Anchor::new(11.0, 16.0));
}

#[test]
fn single_piece_from_compact_structure() {
    let mut canvas = standard_canvas();
    canvas.sketch_piece(PieceDescriptor::new(
        "STS-",
        MetadataPatch::new()
            .id("a")
            .current_position(Anchor::new(50.0, 50.0)),
    ));
    canvas.draw();

    assert_eq!(canvas.painter().figures, 1);
    assert!(canvas.figure_by_key(&PieceKey::ByIndex(1)).is_none());
    assert!(canvas.figure_by_key(&PieceKey::from("a")).is_some());

    let piece = &canvas.puzzle().pieces()[0];
    assert_eq!(piece.right(), Insert::Slot);
    assert_eq!(piece.down(), Insert::Tab);
    assert_eq!(piece.left(), Insert::Slot);
    assert_eq!(piece.up(), Insert::None);
}

#[test]
fn autogenerated_and_shuffled_puzzle() {
    let mut canvas = standard_canvas();
    canvas
        .autogenerate(AutogenerateOptions::new(4, 4).inserts_generator(flipflop))
        .unwrap();
    canvas.shuffle(0.7).unwrap();
    canvas.draw();

    assert_eq!(canvas.painter().figures, 16);
    assert!(canvas.painter().drawn);
    assert_eq!(canvas.painter().last_stroke_color.as_deref(), Some("red"));

    assert!(canvas.figure_by_key(&PieceKey::ByIndex(0)).is_none());
    assert!(canvas.figure_by_key(&PieceKey::ByIndex(1)).is_some());
    assert!(canvas.figure_by_key(&PieceKey::ByIndex(16)).is_some());
    assert!(canvas.figure_by_key(&PieceKey::ByIndex(17)).is_none());
    assert_eq!(canvas.puzzle().len(), 16);
}

#[test]
fn clear_drops_puzzle_and_figures() {
    let mut canvas = standard_canvas();
    canvas.autogenerate(AutogenerateOptions::default()).unwrap();
    canvas.draw();
    assert_eq!(canvas.figure_count(), 25);

    canvas.clear();
    assert_eq!(canvas.painter().figures, 25);
    assert!(canvas.current_puzzle().is_none());
    assert!(!canvas.is_drawn());
    assert_eq!(canvas.puzzle().len(), 0);
    assert_eq!(canvas.figure_count(), 0);
}

#[test]
fn adopted_puzzle_doubles_geometry() {
    let mut canvas = plain_canvas();
    let mut puzzle = Puzzle::with_geometry(13.0, 7.0).unwrap();
    puzzle
        .new_piece(Structure {
            right: Insert::Tab,
            ..Structure::default()
        })
        .place_at(Anchor::new(0.0, 0.0));
    puzzle
        .new_piece(Structure {
            left: Insert::Slot,
            right: Insert::Tab,
            ..Structure::default()
        })
        .place_at(Anchor::new(3.0, 0.0));

    canvas.render_puzzle(puzzle);
    canvas.draw();

    assert_eq!(canvas.painter().figures, 2);
    assert!(canvas.painter().drawn);
    assert_eq!(canvas.piece_size(), 26.0);
    assert_eq!(canvas.proximity(), 14.0);
}

#[test]
fn metadata_list_is_applied_row_major() {
    let mut canvas = standard_canvas();
    let labels = ["a", "b", "c", "d"]
        .map(|text| MetadataPatch::new().hint("label", Hint::group([("text", text)])));
    canvas
        .autogenerate(AutogenerateOptions::new(2, 2).metadata(labels))
        .unwrap();
    canvas.draw();

    let texts: Vec<&str> = canvas
        .puzzle()
        .pieces()
        .iter()
        .filter_map(|p| p.metadata().hint("label")?.get("text")?.as_text())
        .collect();
    assert_eq!(texts, ["a", "b", "c", "d"]);
}

#[test]
fn connect_event_carries_figures() {
    let mut canvas = standard_canvas();
    canvas
        .autogenerate(AutogenerateOptions::new(2, 2).inserts_generator(flipflop))
        .unwrap();
    canvas.draw();
    assert_eq!(canvas.painter().figures, 4);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    canvas.on_connect(move |e| {
        sink.borrow_mut().push((
            e.piece,
            e.figure.cloned(),
            e.target,
            e.target_figure.cloned(),
            e.side,
        ));
    });

    let (first, second) = (PieceId(0), PieceId(1));
    canvas.disconnect(first).unwrap();
    canvas.connect_horizontally(first, second).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let (piece, figure, target, target_figure, side) = &seen[0];
    assert_eq!(*piece, first);
    assert_eq!(*target, second);
    assert_eq!(*side, Side::Right);
    assert_eq!(*figure, canvas.figure(first));
    assert_eq!(*target_figure, canvas.figure(second));
    assert!(figure.is_some());
}

#[test]
fn disconnect_event_carries_figures() {
    let mut canvas = standard_canvas();
    canvas
        .autogenerate(AutogenerateOptions::new(1, 2).inserts_generator(flipflop))
        .unwrap();
    canvas.draw();
    assert_eq!(canvas.painter().figures, 2);

    let seen: Rc<RefCell<Vec<(PieceId, Option<DummyFigure>, Option<DummyFigure>)>>> =
        Rc::default();
    let sink = Rc::clone(&seen);
    canvas.on_disconnect(move |e| {
        sink.borrow_mut()
            .push((e.piece, e.figure.cloned(), e.neighbor_figure.cloned()));
    });

    let (first, second) = (PieceId(0), PieceId(1));
    canvas.connect_horizontally(first, second).unwrap();
    canvas.disconnect(first).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, first);
    assert_eq!(seen[0].1, canvas.figure(first));
    assert_eq!(seen[0].2, canvas.figure(second));
}

#[test]
fn vertical_connect_event_reports_down_side() {
    let mut canvas = standard_canvas();
    canvas
        .autogenerate(AutogenerateOptions::new(2, 1).inserts_generator(flipflop))
        .unwrap();
    canvas.draw();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    canvas.on_connect(move |e| {
        sink.borrow_mut()
            .push((e.piece, e.target, e.side, e.figure.cloned(), e.target_figure.cloned()));
    });

    let (top, bottom) = (PieceId(0), PieceId(1));
    canvas.disconnect(top).unwrap();
    canvas.connect_vertically(top, bottom).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let (piece, target, side, figure, target_figure) = &seen[0];
    assert_eq!((*piece, *target, *side), (top, bottom, Side::Down));
    assert_eq!(*figure, canvas.figure(top));
    assert_eq!(*target_figure, canvas.figure(bottom));
    assert!(target_figure.is_some());
}

#[test]
fn vertical_links_disconnect_up_then_down() {
    let mut canvas = standard_canvas();
    canvas.autogenerate(AutogenerateOptions::new(3, 1)).unwrap();
    canvas.draw();
    let (top, middle, bottom) = (PieceId(0), PieceId(1), PieceId(2));
    assert_eq!(canvas.disconnect(middle).unwrap(), 2);
    canvas.connect_vertically(top, middle).unwrap();
    canvas.connect_vertically(middle, bottom).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    canvas.on_disconnect(move |e| sink.borrow_mut().push((e.side, e.neighbor)));
    assert_eq!(canvas.disconnect(middle).unwrap(), 2);
    assert_eq!(*seen.borrow(), [(Side::Up, top), (Side::Down, bottom)]);
}

#[test]
fn interior_disconnect_raises_four_events() {
    let mut canvas = standard_canvas();
    canvas
        .autogenerate(AutogenerateOptions::new(3, 3).inserts_generator(flipflop))
        .unwrap();
    canvas.draw();
    assert_eq!(canvas.painter().figures, 9);

    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    canvas.on_disconnect(move |_| *sink.borrow_mut() += 1);
    assert_eq!(canvas.disconnect(PieceId(4)).unwrap(), 4);
    assert_eq!(*count.borrow(), 4);
}

#[test]
fn listeners_survive_clear_and_run_in_order() {
    let mut canvas = standard_canvas();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let sink = Rc::clone(&order);
        canvas.on_disconnect(move |_| sink.borrow_mut().push(tag));
    }
    canvas.autogenerate(AutogenerateOptions::new(1, 2)).unwrap();
    canvas.clear();
    canvas.autogenerate(AutogenerateOptions::new(1, 2)).unwrap();
    canvas.disconnect(PieceId(0)).unwrap();
    assert_eq!(*order.borrow(), ["first", "second"]);
}

#[test]
fn undrawn_pieces_have_no_figure_in_events() {
    let mut canvas = standard_canvas();
    canvas.autogenerate(AutogenerateOptions::new(1, 2)).unwrap();
    let figures = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&figures);
    canvas.on_disconnect(move |e| sink.borrow_mut().push(e.figure.is_some()));
    canvas.disconnect(PieceId(1)).unwrap();
    assert_eq!(*figures.borrow(), [false]);
    assert_eq!(canvas.figure(PieceId(1)), None);
}

#[test]
fn seeded_canvases_shuffle_identically() {
    let layout = || {
        let mut canvas = standard_canvas();
        canvas.autogenerate(AutogenerateOptions::new(3, 3)).unwrap();
        canvas.shuffle(1.0).unwrap();
        canvas
            .puzzle()
            .pieces()
            .iter()
            .map(|p| p.central_anchor())
            .collect::<Vec<_>>()
    };
    assert_eq!(layout(), layout());
}
