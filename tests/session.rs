use pizarra::Config;
use pizarra::broadcast::LocalHub;
use pizarra::history::HistoryStep;
use pizarra::input::{InputState, PointerInput, ScrollViewport, TextCommit, Tool, Viewport};
use pizarra::util::{Point, Size};

fn board(width: i32, height: i32) -> InputState {
    let mut config = Config::default();
    config.canvas.initial_width = width;
    config.canvas.initial_height = height;
    let viewport = ScrollViewport::new(Size::new(width, height), Size::new(width, height));
    InputState::new(&config, Box::new(viewport)).unwrap()
}

fn drag(state: &mut InputState, from: (f64, f64), to: (f64, f64)) {
    state.on_pointer_down(&PointerInput::mouse(from.0, from.1));
    state.on_pointer_move(&PointerInput::mouse(to.0, to.1));
    state.on_pointer_up();
}

fn settle(state: &mut InputState, step: HistoryStep) {
    match step {
        HistoryStep::Scheduled(ticket) => {
            state.complete_load(ticket).unwrap();
        }
        HistoryStep::Empty => panic!("history unexpectedly empty"),
    }
}

#[test]
fn stroke_to_the_edge_grows_board_and_keeps_endpoint_in_view() {
    let mut state = board(800, 600);
    state.on_pointer_down(&PointerInput::mouse(600.0, 300.0));
    state.on_pointer_move(&PointerInput::mouse(760.0, 300.0));

    assert_eq!(state.surface_size(), Size::new(900, 600));
    assert_eq!(state.viewport().scroll_offset(), (100.0, 0.0));

    // The scrolled view still maps onto the grown board
    state.on_pointer_move(&PointerInput::mouse(760.0, 300.0));
    state.on_pointer_up();
    let endpoint = state.surface_mut().pixel(760, 300).unwrap().unwrap();
    assert_eq!(endpoint[3], 255);
    assert_eq!(state.surface_size(), Size::new(1000, 600));
}

#[test]
fn hello_at_the_corner_grows_both_axes_once() {
    let mut state = board(800, 600);
    state.select_tool(Tool::Text);
    state.on_pointer_down(&PointerInput::mouse(790.0, 590.0));
    state.set_text("Hello");

    assert_eq!(state.commit_text().unwrap(), TextCommit::Stamped);
    assert_eq!(state.surface_size(), Size::new(900, 700));
    assert_eq!(state.viewport().scroll_offset(), (0.0, 0.0));
}

#[test]
fn history_is_bounded_and_oldest_edits_are_lost() {
    let mut state = board(200, 150);
    for i in 0..60 {
        let y = 5.0 + (i % 18) as f64 * 5.0;
        drag(&mut state, (10.0, y), (100.0, y));
        assert!(state.history().undo_len() <= 50);
    }
    assert_eq!(state.history().undo_len(), 50);

    for _ in 0..50 {
        let step = state.undo().unwrap();
        settle(&mut state, step);
    }
    assert_eq!(state.undo().unwrap(), HistoryStep::Empty);
    // The first ten strokes were evicted, so some ink remains
    let pixels = state.surface_mut().pixels().unwrap();
    assert!(pixels.iter().any(|px| px[3] != 0));
}

#[test]
fn undo_then_redo_is_bit_identical() {
    let mut state = board(200, 150);
    drag(&mut state, (10.0, 10.0), (90.0, 60.0));
    state.set_brush_size(12.0);
    drag(&mut state, (20.0, 90.0), (140.0, 20.0));
    let before = state.surface_mut().pixels().unwrap();

    let step = state.undo().unwrap();
    settle(&mut state, step);
    assert_ne!(state.surface_mut().pixels().unwrap(), before);

    let step = state.redo().unwrap();
    settle(&mut state, step);
    assert_eq!(state.surface_mut().pixels().unwrap(), before);
}

#[test]
fn rapid_undos_supersede_pending_loads() {
    let mut state = board(200, 150);
    drag(&mut state, (10.0, 20.0), (100.0, 20.0));
    drag(&mut state, (10.0, 60.0), (100.0, 60.0));

    let HistoryStep::Scheduled(first) = state.undo().unwrap() else {
        panic!("expected a scheduled undo");
    };
    let HistoryStep::Scheduled(second) = state.undo().unwrap() else {
        panic!("expected a scheduled undo");
    };

    assert_eq!(
        state.complete_load(first).unwrap(),
        pizarra::history::LoadOutcome::Superseded
    );
    assert_eq!(
        state.complete_load(second).unwrap(),
        pizarra::history::LoadOutcome::Applied
    );
    assert!(
        state
            .surface_mut()
            .pixels()
            .unwrap()
            .iter()
            .all(|px| px[3] == 0)
    );
    assert_eq!(state.history().redo_len(), 2);
}

#[test]
fn shared_board_mirrors_strokes_between_sessions() {
    let hub = LocalHub::from_config(&Config::default().broadcast);
    let mut ana = board(200, 150);
    let mut luis = board(200, 150);
    ana.attach_channel(Box::new(hub.join("ana")));
    luis.attach_channel(Box::new(hub.join("luis")));

    drag(&mut ana, (10.0, 40.0), (120.0, 40.0));
    drag(&mut luis, (10.0, 90.0), (120.0, 90.0));

    assert_eq!(ana.sync_remote(), 3);
    assert_eq!(luis.sync_remote(), 3);
    assert_eq!(ana.surface_mut().pixel(60, 90).unwrap().unwrap()[3], 255);
    assert_eq!(luis.surface_mut().pixel(60, 40).unwrap().unwrap()[3], 255);
    // Remote strokes are not part of local history
    assert_eq!(ana.history().undo_len(), 1);
    assert_eq!(luis.history().undo_len(), 1);
}

#[test]
fn late_joiner_starts_from_the_shared_board() {
    let hub = LocalHub::from_config(&Config::default().broadcast);
    let mut ana = board(200, 150);
    ana.attach_channel(Box::new(hub.join("ana")));
    drag(&mut ana, (10.0, 20.0), (120.0, 20.0));

    let mut luis = board(200, 150);
    luis.attach_channel(Box::new(hub.join("luis")));
    assert_eq!(luis.sync_remote(), 3);
    assert_eq!(luis.surface_mut().pixel(60, 20).unwrap().unwrap()[3], 255);

    ana.clear_canvas();
    let mut eva = board(200, 150);
    eva.attach_channel(Box::new(hub.join("eva")));
    assert_eq!(eva.sync_remote(), 0);
    assert!(
        eva.surface_mut()
            .pixels()
            .unwrap()
            .iter()
            .all(|px| px[3] == 0)
    );
    // Participants already present receive the clear live
    assert_eq!(luis.sync_remote(), 1);
    assert_eq!(luis.surface_mut().pixel(60, 20).unwrap().unwrap()[3], 0);
}

#[test]
fn text_commit_is_undoable() {
    let mut state = board(400, 300);
    state.insert_text(Point::new(40.0, 80.0), "pizarra").unwrap();
    assert_eq!(state.history().undo_len(), 1);

    let step = state.undo().unwrap();
    settle(&mut state, step);
    assert!(
        state
            .surface_mut()
            .pixels()
            .unwrap()
            .iter()
            .all(|px| px[3] == 0)
    );
}
