use super::*;
use crate::draw::{BLACK, RED, Rgba};
use crate::util::Point;

fn surface() -> RasterSurface {
    RasterSurface::new(64, 48).unwrap()
}

fn scribble(surface: &mut RasterSurface, y: f64) {
    surface.stroke_segment(Point::new(2.0, y), Point::new(60.0, y + 3.0), RED, 4.0);
}

fn pixels(surface: &mut RasterSurface) -> Vec<Rgba> {
    surface.pixels().unwrap()
}

fn apply(history: &mut HistoryStore, surface: &mut RasterSurface, step: HistoryStep) {
    match step {
        HistoryStep::Scheduled(ticket) => {
            assert_eq!(
                history.complete_load(surface, ticket).unwrap(),
                LoadOutcome::Applied
            );
        }
        HistoryStep::Empty => panic!("expected a scheduled load"),
    }
}

#[test]
fn undo_stack_never_exceeds_capacity() {
    let surface = surface();
    let mut history = HistoryStore::default();
    for _ in 0..75 {
        history.capture(&surface).unwrap();
        assert!(history.undo_len() <= DEFAULT_CAPACITY);
    }
    assert_eq!(history.undo_len(), DEFAULT_CAPACITY);
}

#[test]
fn eviction_drops_the_oldest_snapshot() {
    let mut surface = surface();
    let mut history = HistoryStore::new(2);

    history.capture(&surface).unwrap(); // blank, evicted below
    scribble(&mut surface, 5.0);
    history.capture(&surface).unwrap();
    let first_edit = pixels(&mut surface);
    scribble(&mut surface, 20.0);
    history.capture(&surface).unwrap();
    scribble(&mut surface, 35.0);

    let step = history.undo(&surface).unwrap();
    apply(&mut history, &mut surface, step);
    let step = history.undo(&surface).unwrap();
    apply(&mut history, &mut surface, step);

    assert_eq!(pixels(&mut surface), first_edit);
    assert_eq!(history.undo(&surface).unwrap(), HistoryStep::Empty);
}

#[test]
fn undo_restores_pre_edit_pixels() {
    let mut surface = surface();
    scribble(&mut surface, 10.0);
    let before_edit = pixels(&mut surface);

    let mut history = HistoryStore::default();
    history.capture(&surface).unwrap();
    surface.stroke_segment(Point::new(0.0, 0.0), Point::new(64.0, 48.0), BLACK, 9.0);
    surface.erase(Point::new(30.0, 12.0), 8.0);

    let step = history.undo(&surface).unwrap();
    apply(&mut history, &mut surface, step);

    assert_eq!(pixels(&mut surface), before_edit);
    assert_eq!(history.redo_len(), 1);
}

#[test]
fn undo_then_redo_is_bit_identical() {
    let mut surface = surface();
    let mut history = HistoryStore::default();
    history.capture(&surface).unwrap();
    scribble(&mut surface, 10.0);
    surface.erase(Point::new(20.5, 12.25), 5.0);
    let before_undo = pixels(&mut surface);

    let step = history.undo(&surface).unwrap();
    apply(&mut history, &mut surface, step);
    assert_ne!(pixels(&mut surface), before_undo);

    let step = history.redo(&surface).unwrap();
    apply(&mut history, &mut surface, step);
    assert_eq!(pixels(&mut surface), before_undo);
    assert_eq!(history.undo_len(), 1);
    assert_eq!(history.redo_len(), 0);
}

#[test]
fn capture_clears_redo_unconditionally() {
    let mut surface = surface();
    let mut history = HistoryStore::default();
    history.capture(&surface).unwrap();
    scribble(&mut surface, 10.0);
    history.capture(&surface).unwrap();
    scribble(&mut surface, 30.0);

    for _ in 0..2 {
        let step = history.undo(&surface).unwrap();
        apply(&mut history, &mut surface, step);
    }
    assert_eq!(history.redo_len(), 2);

    history.capture(&surface).unwrap();
    assert_eq!(history.redo_len(), 0);
    assert!(!history.can_redo());
    assert_eq!(history.redo(&surface).unwrap(), HistoryStep::Empty);
}

#[test]
fn empty_stacks_are_silent_noops() {
    let mut surface = surface();
    scribble(&mut surface, 10.0);
    let before = pixels(&mut surface);
    let mut history = HistoryStore::default();

    assert_eq!(history.undo(&surface).unwrap(), HistoryStep::Empty);
    assert_eq!(history.redo(&surface).unwrap(), HistoryStep::Empty);
    assert!(!history.finish_pending(&mut surface).unwrap());
    assert_eq!(pixels(&mut surface), before);
}

#[test]
fn newer_undo_supersedes_pending_load() {
    let mut surface = surface();
    let mut history = HistoryStore::default();
    let blank = pixels(&mut surface);

    history.capture(&surface).unwrap();
    scribble(&mut surface, 5.0);
    history.capture(&surface).unwrap();
    scribble(&mut surface, 25.0);
    let latest = pixels(&mut surface);

    let HistoryStep::Scheduled(first) = history.undo(&surface).unwrap() else {
        panic!("expected scheduled load");
    };
    let HistoryStep::Scheduled(second) = history.undo(&surface).unwrap() else {
        panic!("expected scheduled load");
    };

    // Nothing applied yet
    assert_eq!(pixels(&mut surface), latest);

    assert_eq!(
        history.complete_load(&mut surface, first).unwrap(),
        LoadOutcome::Superseded
    );
    assert_eq!(pixels(&mut surface), latest);

    assert_eq!(
        history.complete_load(&mut surface, second).unwrap(),
        LoadOutcome::Applied
    );
    assert_eq!(pixels(&mut surface), blank);
    assert_eq!(history.pending_ticket(), None);

    // Redo walks back through the superseded state, then the original edit
    let step = history.redo(&surface).unwrap();
    apply(&mut history, &mut surface, step);
    let step = history.redo(&surface).unwrap();
    apply(&mut history, &mut surface, step);
    assert_eq!(pixels(&mut surface), latest);
}

#[test]
fn completing_twice_reports_superseded() {
    let mut surface = surface();
    let mut history = HistoryStore::default();
    history.capture(&surface).unwrap();
    scribble(&mut surface, 5.0);

    let HistoryStep::Scheduled(ticket) = history.undo(&surface).unwrap() else {
        panic!("expected scheduled load");
    };
    assert_eq!(
        history.complete_load(&mut surface, ticket).unwrap(),
        LoadOutcome::Applied
    );
    assert_eq!(
        history.complete_load(&mut surface, ticket).unwrap(),
        LoadOutcome::Superseded
    );
}

#[test]
fn decode_failure_aborts_without_side_effects() {
    let mut surface = surface();
    let mut history = HistoryStore::default();

    let mut broken = surface.export_snapshot().unwrap().as_png().to_vec();
    broken.truncate(48);
    history.capture_snapshot(Snapshot::from_png(broken).unwrap());
    scribble(&mut surface, 10.0);
    let before = pixels(&mut surface);

    let err = history.undo(&surface).unwrap_err();
    assert!(matches!(err, SurfaceError::Decode(_)));
    assert_eq!(history.undo_len(), 1);
    assert_eq!(history.redo_len(), 0);
    assert_eq!(history.pending_ticket(), None);
    assert_eq!(pixels(&mut surface), before);
}

#[test]
fn capture_during_pending_load_records_the_pending_target() {
    let mut surface = surface();
    let mut history = HistoryStore::default();
    let blank = pixels(&mut surface);

    history.capture(&surface).unwrap();
    scribble(&mut surface, 5.0);
    assert!(matches!(
        history.undo(&surface).unwrap(),
        HistoryStep::Scheduled(_)
    ));

    history.capture(&surface).unwrap();
    assert!(history.finish_pending(&mut surface).unwrap());

    scribble(&mut surface, 30.0);
    let step = history.undo(&surface).unwrap();
    apply(&mut history, &mut surface, step);
    assert_eq!(pixels(&mut surface), blank);
}
