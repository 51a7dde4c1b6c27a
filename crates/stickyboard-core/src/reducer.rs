//! The command reducer.
//!
//! [`reduce`] is total: commands aimed at missing ids, and commands this
//! version does not understand, leave the content untouched instead of
//! failing. Every content-mutating command records exactly one history
//! snapshot, however many elements it touched.

use crate::command::{Command, SelectionTransform};
use crate::config::{BoardConfig, ConnectorPolicy};
use crate::document::{Board, BoardContent};
use crate::elements::{BoardElement, ElementId, ElementKind, Endpoint};
use crate::history::HistorySnapshot;
use std::time::{SystemTime, UNIX_EPOCH};

/// Label of the baseline snapshot recorded before the first edit of a
/// board whose history is empty.
pub const BASELINE_LABEL: &str = "baseline";

/// Inputs to [`reduce`] that do not come from the board or the command.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    /// Milliseconds since the Unix epoch, stamped on snapshots and updates.
    pub timestamp: u64,
    pub config: &'a BoardConfig,
}

impl<'a> DispatchContext<'a> {
    pub fn new(config: &'a BoardConfig, timestamp: u64) -> Self {
        Self { timestamp, config }
    }

    /// Context stamped with the current system time.
    pub fn now(config: &'a BoardConfig) -> Self {
        Self::new(config, unix_millis())
    }
}

/// Current time in milliseconds since the Unix epoch (0 if the clock is
/// before the epoch).
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Apply `command` to `board` and return the next board.
pub fn reduce(mut board: Board, command: Command, ctx: &DispatchContext<'_>) -> Board {
    let label = command.label();
    let mutating = command.is_content_mutating();

    if mutating && board.history.is_empty() {
        record_snapshot(&mut board, BASELINE_LABEL, ctx);
    }

    match command {
        Command::AddNote { mut note } => {
            note.clamp_size(ctx.config.min_note_size);
            if note.created_at == 0 {
                note.created_at = ctx.timestamp;
                note.updated_at = ctx.timestamp;
            }
            board.content.notes.push(note);
        }
        Command::UpdateNote { id, patch } => match board.content.note_mut(&id) {
            Some(note) => {
                patch.apply_to(note);
                note.clamp_size(ctx.config.min_note_size);
                note.updated_at = ctx.timestamp;
            }
            None => log::trace!("update_note: no note {}", id),
        },
        Command::DeleteNote { id } => delete_element(&mut board, &id, ElementKind::Note, ctx),

        Command::AddDrawingElement { element } => board.content.drawing_elements.push(element),
        Command::UpdateDrawingElement { id, patch } => match board.content.drawing_mut(&id) {
            Some(element) => patch.apply_to(element),
            None => log::trace!("update_drawing_element: no drawing {}", id),
        },
        Command::DeleteDrawingElement { id } => {
            delete_element(&mut board, &id, ElementKind::Drawing, ctx)
        }

        Command::AddConnector { connector } => board.content.connectors.push(connector),
        Command::UpdateConnector { id, patch } => match board.content.connector_mut(&id) {
            Some(connector) => patch.apply_to(connector),
            None => log::trace!("update_connector: no connector {}", id),
        },
        Command::DeleteConnector { id } => {
            board.content.remove_connector(&id);
            board.selection.remove(&id);
        }

        Command::Select { id } => board.selection.select(id),
        Command::AddToSelection { id } => board.selection.add(id),
        Command::ClearSelection => board.selection.clear(),
        Command::SelectAll => {
            board.selection = board
                .content
                .notes
                .iter()
                .map(|n| n.id.clone())
                .chain(board.content.drawing_elements.iter().map(|d| d.id.clone()))
                .collect();
        }

        Command::ApplyTransformToSelected(transform) => {
            transform_selected(&mut board, &transform, ctx.config.min_note_size)
        }
        Command::DeleteSelected => {
            let ids: Vec<ElementId> = board.selection.iter().cloned().collect();
            for id in &ids {
                board.content.remove_connector(id);
                for kind in [ElementKind::Note, ElementKind::Drawing] {
                    remove_element(&mut board.content, id, kind, ctx);
                }
            }
            board.selection.clear();
        }

        Command::BringToFront { id } => {
            if let Some(top) = z_extreme(&board.content, &id, Extreme::Top) {
                set_z_index(&mut board.content, &id, top.saturating_add(1));
            }
        }
        Command::SendToBack { id } => {
            if let Some(bottom) = z_extreme(&board.content, &id, Extreme::Bottom) {
                set_z_index(&mut board.content, &id, bottom.saturating_sub(1));
            }
        }

        Command::SetZoom { zoom } => board.viewport.zoom = zoom,
        Command::SetPan { pan } => board.viewport.pan = pan,

        Command::Undo => {
            if let Some(snapshot) = board.history.undo() {
                board.content = snapshot.content.clone();
            }
        }
        Command::Redo => {
            if let Some(snapshot) = board.history.redo() {
                board.content = snapshot.content.clone();
            }
        }
        Command::SaveSnapshot { label: custom } => {
            record_snapshot(&mut board, custom.as_deref().unwrap_or(label), ctx)
        }
        Command::InitializeBoard { content } => {
            board.content = content;
            board.selection.clear();
            let snapshot = snapshot_of(&board.content, "initialize_board", ctx);
            board.history.reset(snapshot);
        }

        Command::Unknown => log::trace!("ignoring unknown command"),
    }

    if mutating {
        record_snapshot(&mut board, label, ctx);
    }
    board
}

fn snapshot_of(content: &BoardContent, label: &str, ctx: &DispatchContext<'_>) -> HistorySnapshot {
    HistorySnapshot {
        content: content.clone(),
        timestamp: ctx.timestamp,
        action_label: label.to_string(),
        user_id: ctx.config.user_id.clone(),
    }
}

/// Append a snapshot of the current content, discarding any redo branch.
fn record_snapshot(board: &mut Board, label: &str, ctx: &DispatchContext<'_>) {
    let snapshot = snapshot_of(&board.content, label, ctx);
    board.history.push(snapshot);
    if let Some(limit) = ctx.config.history_limit {
        board.history.trim_oldest(limit);
    }
}

fn delete_element(board: &mut Board, id: &ElementId, kind: ElementKind, ctx: &DispatchContext<'_>) {
    remove_element(&mut board.content, id, kind, ctx);
    board.selection.remove(id);
}

/// Remove a note or drawing, and under [`ConnectorPolicy::Cascade`] the
/// connectors attached to it. Connectors to a same-id element of the other
/// kind are kept.
fn remove_element(
    content: &mut BoardContent,
    id: &ElementId,
    kind: ElementKind,
    ctx: &DispatchContext<'_>,
) {
    let removed = match kind {
        ElementKind::Note => content.remove_note(id),
        ElementKind::Drawing => content.remove_drawing(id),
    };
    if removed == 0 || ctx.config.connector_policy != ConnectorPolicy::Cascade {
        return;
    }
    let endpoint = Endpoint {
        element_id: id.clone(),
        element_kind: kind,
    };
    let dropped = content.remove_connectors_referencing(&endpoint);
    if dropped > 0 {
        log::debug!("cascade: removed {} connector(s) attached to {}", dropped, id);
    }
}

fn transform_selected(board: &mut Board, transform: &SelectionTransform, min_note_size: f64) {
    let offset = transform.translation();
    let selection = &board.selection;

    for note in board
        .content
        .notes
        .iter_mut()
        .filter(|n| selection.contains(&n.id))
    {
        note.translate(offset);
        note.resize(transform.dw, transform.dh);
        note.clamp_size(min_note_size);
    }

    for element in board
        .content
        .drawing_elements
        .iter_mut()
        .filter(|d| selection.contains(&d.id))
    {
        element.shape.translate(offset);
        element.shape.resize(transform.dw, transform.dh);
        element.rotation += transform.rotate;
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Top,
    Bottom,
}

/// Highest or lowest z-index among the elements other than `id`.
/// None when `id` is not a note or drawing, or when it is the only one.
fn z_extreme(content: &BoardContent, id: &ElementId, extreme: Extreme) -> Option<i32> {
    let elements = content.elements_by_z();
    if !elements.iter().any(|e| e.id() == id) {
        return None;
    }
    let others = elements.iter().filter(|e| e.id() != id).map(|e| e.z_index());
    match extreme {
        Extreme::Top => others.max(),
        Extreme::Bottom => others.min(),
    }
}

fn set_z_index(content: &mut BoardContent, id: &ElementId, z_index: i32) {
    if let Some(note) = content.note_mut(id) {
        note.set_z_index(z_index);
    } else if let Some(element) = content.drawing_mut(id) {
        element.set_z_index(z_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        Connector, ConnectorPatch, DrawingElement, DrawingPatch, DrawingShape, Note, NotePatch,
        SerializableColor,
    };
    use kurbo::{Point, Vec2};

    fn note(id: &str, x: f64, y: f64) -> Note {
        Note::new(id, Point::new(x, y), 100.0, 100.0)
    }

    fn run(board: Board, commands: Vec<Command>, config: &BoardConfig) -> Board {
        let ctx = DispatchContext::new(config, 1_000);
        commands
            .into_iter()
            .fold(board, |board, command| reduce(board, command, &ctx))
    }

    fn initialized() -> Board {
        run(
            Board::new(),
            vec![Command::InitializeBoard {
                content: BoardContent::new(),
            }],
            &BoardConfig::default(),
        )
    }

    #[test]
    fn test_add_undo_redo_scenario() {
        let config = BoardConfig::default();
        let ctx = DispatchContext::new(&config, 1_000);

        let board = initialized();
        let board = reduce(board, Command::AddNote { note: note("n1", 0.0, 0.0) }, &ctx);
        assert_eq!(board.content.notes.len(), 1);
        assert_eq!(board.history.len(), 2);
        assert_eq!(board.history.cursor(), Some(1));

        let board = reduce(board, Command::Undo, &ctx);
        assert!(board.content.notes.is_empty());
        assert_eq!(board.history.cursor(), Some(0));

        let board = reduce(board, Command::Redo, &ctx);
        assert_eq!(board.content.notes.len(), 1);
        assert_eq!(board.content.notes[0].id.as_str(), "n1");
        assert_eq!(board.history.cursor(), Some(1));
    }

    #[test]
    fn test_first_edit_on_empty_history_records_baseline() {
        let config = BoardConfig::default();
        let board = run(
            Board::new(),
            vec![Command::AddNote { note: note("n1", 0.0, 0.0) }],
            &config,
        );
        assert_eq!(board.history.len(), 2);
        assert_eq!(board.history.snapshots()[0].action_label, BASELINE_LABEL);

        let board = run(board, vec![Command::Undo], &config);
        assert!(board.content.is_empty());
    }

    #[test]
    fn test_update_missing_id_is_noop_on_content() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![Command::AddNote { note: note("n1", 0.0, 0.0) }],
            &config,
        );
        let before = board.content.clone();

        let board = run(
            board,
            vec![
                Command::UpdateNote {
                    id: "missing".into(),
                    patch: NotePatch {
                        text: Some("x".to_string()),
                        ..Default::default()
                    },
                },
                Command::DeleteNote { id: "missing".into() },
                Command::DeleteDrawingElement { id: "missing".into() },
                Command::DeleteConnector { id: "missing".into() },
            ],
            &config,
        );
        assert_eq!(board.content, before);
        // Still one snapshot per dispatched mutating command.
        assert_eq!(board.history.len(), 6);
    }

    #[test]
    fn test_update_note_merges_clamps_and_stamps() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0).with_text("old") },
                Command::UpdateNote {
                    id: "n1".into(),
                    patch: NotePatch {
                        width: Some(10.0),
                        ..Default::default()
                    },
                },
            ],
            &config,
        );
        let n1 = &board.content.notes[0];
        assert_eq!(n1.text, "old");
        assert!((n1.width - 50.0).abs() < f64::EPSILON);
        assert!((n1.height - 100.0).abs() < f64::EPSILON);
        assert_eq!(n1.created_at, 1_000);
        assert_eq!(n1.updated_at, 1_000);
    }

    #[test]
    fn test_add_note_clamps_to_minimum() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![Command::AddNote {
                note: Note::new("n1", Point::ZERO, 20.0, 30.0),
            }],
            &config,
        );
        assert!((board.content.notes[0].width - 50.0).abs() < f64::EPSILON);
        assert!((board.content.notes[0].height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bulk_transform_is_one_snapshot() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("a", 0.0, 0.0) },
                Command::AddNote { note: note("b", 10.0, 10.0) },
                Command::AddNote { note: note("c", 20.0, 20.0) },
                Command::AddNote { note: note("d", 30.0, 30.0) },
                Command::Select { id: "a".into() },
                Command::AddToSelection { id: "b".into() },
                Command::AddToSelection { id: "c".into() },
            ],
            &config,
        );
        let snapshots_before = board.history.len();

        let board = run(
            board,
            vec![Command::ApplyTransformToSelected(SelectionTransform::offset(10.0, 5.0))],
            &config,
        );
        assert_eq!(board.history.len(), snapshots_before + 1);

        let position = |id: &str| board.content.note(&id.into()).unwrap().position;
        assert_eq!(position("a"), Point::new(10.0, 5.0));
        assert_eq!(position("b"), Point::new(20.0, 15.0));
        assert_eq!(position("c"), Point::new(30.0, 25.0));
        assert_eq!(position("d"), Point::new(30.0, 30.0));
    }

    #[test]
    fn test_transform_rotates_drawings_not_notes() {
        let config = BoardConfig::default();
        let rect = DrawingElement::new(
            "r1",
            DrawingShape::Rectangle {
                position: Point::ZERO,
                width: 40.0,
                height: 20.0,
            },
        );
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::AddDrawingElement { element: rect },
                Command::SelectAll,
                Command::ApplyTransformToSelected(SelectionTransform {
                    dx: 1.0,
                    dy: 2.0,
                    dw: 10.0,
                    dh: -80.0,
                    rotate: 0.5,
                }),
            ],
            &config,
        );

        let n1 = board.content.note(&"n1".into()).unwrap();
        assert_eq!(n1.position, Point::new(1.0, 2.0));
        assert!((n1.width - 110.0).abs() < f64::EPSILON);
        // 100 - 80 clamps to the minimum.
        assert!((n1.height - 50.0).abs() < f64::EPSILON);

        let r1 = board.content.drawing(&"r1".into()).unwrap();
        assert!((r1.rotation - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            r1.shape,
            DrawingShape::Rectangle {
                position: Point::new(1.0, 2.0),
                width: 50.0,
                height: 0.0,
            }
        );
    }

    #[test]
    fn test_selection_changes_do_not_snapshot() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![Command::AddNote { note: note("n1", 0.0, 0.0) }],
            &config,
        );
        let snapshots = board.history.len();
        let board = run(
            board,
            vec![
                Command::Select { id: "n1".into() },
                Command::ClearSelection,
                Command::SelectAll,
                Command::SetZoom { zoom: 3.0 },
                Command::SetPan { pan: Vec2::new(5.0, 5.0) },
            ],
            &config,
        );
        assert_eq!(board.history.len(), snapshots);
        assert!((board.viewport.zoom - 3.0).abs() < f64::EPSILON);
        assert!(board.is_selected(&"n1".into()));
    }

    #[test]
    fn test_locked_elements_still_transform() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::UpdateNote {
                    id: "n1".into(),
                    patch: NotePatch {
                        locked: Some(true),
                        ..Default::default()
                    },
                },
                Command::Select { id: "n1".into() },
                Command::ApplyTransformToSelected(SelectionTransform::offset(5.0, 0.0)),
            ],
            &config,
        );
        let n1 = board.content.note(&"n1".into()).unwrap();
        assert!(n1.is_locked());
        assert_eq!(n1.position, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_zoom_is_not_clamped() {
        let config = BoardConfig::default();
        let board = run(initialized(), vec![Command::SetZoom { zoom: 500.0 }], &config);
        assert!((board.viewport.zoom - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_edit_after_undo_drops_redo() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::AddNote { note: note("n2", 0.0, 0.0) },
                Command::Undo,
                Command::AddNote { note: note("n3", 0.0, 0.0) },
            ],
            &config,
        );
        assert!(!board.can_redo());
        let board = run(board, vec![Command::Redo], &config);
        let ids: Vec<&str> = board.content.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n3"]);
    }

    #[test]
    fn test_undo_restores_a_copy() {
        let config = BoardConfig::default();
        let mut board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::AddNote { note: note("n2", 0.0, 0.0) },
                Command::Undo,
            ],
            &config,
        );
        // Mutating the live content must not reach the stored snapshot.
        board.content.notes[0].text = "scribbled".to_string();
        let board = run(board, vec![Command::Undo, Command::Redo], &config);
        assert_eq!(board.content.notes.len(), 1);
        assert!(board.content.notes[0].text.is_empty());
    }

    #[test]
    fn test_delete_tolerates_dangling_connectors_by_default() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::AddNote { note: note("n2", 0.0, 0.0) },
                Command::AddConnector {
                    connector: Connector::new("c1", Endpoint::note("n1"), Endpoint::note("n2")),
                },
                Command::Select { id: "n1".into() },
                Command::DeleteNote { id: "n1".into() },
            ],
            &config,
        );
        assert_eq!(board.content.connectors.len(), 1);
        assert_eq!(board.dangling_connectors().count(), 1);
        assert_eq!(board.resolved_connectors().count(), 0);
        assert!(board.selection.is_empty());
    }

    #[test]
    fn test_delete_cascades_when_configured() {
        let config = BoardConfig {
            connector_policy: ConnectorPolicy::Cascade,
            ..BoardConfig::default()
        };
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::AddDrawingElement {
                    element: DrawingElement::new("d1", DrawingShape::Path { points: vec![] }),
                },
                Command::AddConnector {
                    connector: Connector::new("c1", Endpoint::note("n1"), Endpoint::drawing("d1")),
                },
                Command::DeleteDrawingElement { id: "d1".into() },
            ],
            &config,
        );
        assert!(board.content.connectors.is_empty());

        // Undo brings back both the drawing and its connector.
        let board = run(board, vec![Command::Undo], &config);
        assert_eq!(board.content.connectors.len(), 1);
        assert_eq!(board.content.drawing_elements.len(), 1);
    }

    #[test]
    fn test_delete_selected_is_one_edit() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::AddNote { note: note("n2", 0.0, 0.0) },
                Command::AddConnector {
                    connector: Connector::new("c1", Endpoint::note("n1"), Endpoint::note("n2")),
                },
                Command::Select { id: "n1".into() },
                Command::AddToSelection { id: "c1".into() },
            ],
            &config,
        );
        let snapshots = board.history.len();
        let board = run(board, vec![Command::DeleteSelected], &config);

        assert_eq!(board.history.len(), snapshots + 1);
        assert_eq!(board.content.notes.len(), 1);
        assert!(board.content.connectors.is_empty());
        assert!(board.selection.is_empty());
    }

    #[test]
    fn test_z_order_commands() {
        let config = BoardConfig::default();
        let mut low = note("low", 0.0, 0.0);
        low.z_index = 1;
        let mut high = note("high", 0.0, 0.0);
        high.z_index = 7;
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: low },
                Command::AddNote { note: high },
                Command::BringToFront { id: "low".into() },
            ],
            &config,
        );
        assert_eq!(board.content.note(&"low".into()).unwrap().z_index, 8);

        let board = run(board, vec![Command::SendToBack { id: "low".into() }], &config);
        assert_eq!(board.content.note(&"low".into()).unwrap().z_index, 6);

        let before = board.content.clone();
        let board = run(board, vec![Command::BringToFront { id: "nope".into() }], &config);
        assert_eq!(board.content, before);
    }

    #[test]
    fn test_snapshots_take_user_and_time_from_context() {
        let config = BoardConfig {
            user_id: "alice".to_string(),
            ..BoardConfig::default()
        };
        let ctx = DispatchContext::new(&config, 42_000);
        let board = reduce(initialized(), Command::AddNote { note: note("n1", 0.0, 0.0) }, &ctx);

        let snapshot = board.history.current().unwrap();
        assert_eq!(snapshot.user_id, "alice");
        assert_eq!(snapshot.timestamp, 42_000);
    }

    #[test]
    fn test_z_order_saturates_at_extremes() {
        let config = BoardConfig::default();
        let mut top = note("top", 0.0, 0.0);
        top.z_index = i32::MAX;
        let mut bottom = note("bottom", 0.0, 0.0);
        bottom.z_index = i32::MIN;
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: top },
                Command::AddNote { note: bottom },
                Command::AddNote { note: note("mid", 0.0, 0.0) },
                Command::BringToFront { id: "mid".into() },
            ],
            &config,
        );
        assert_eq!(board.content.note(&"mid".into()).unwrap().z_index, i32::MAX);

        let board = run(board, vec![Command::SendToBack { id: "mid".into() }], &config);
        assert_eq!(board.content.note(&"mid".into()).unwrap().z_index, i32::MIN);
    }

    #[test]
    fn test_cascade_keeps_connectors_of_same_id_other_kind() {
        let config = BoardConfig {
            connector_policy: ConnectorPolicy::Cascade,
            ..BoardConfig::default()
        };
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("x", 0.0, 0.0) },
                Command::AddNote { note: note("n2", 0.0, 0.0) },
                Command::AddDrawingElement {
                    element: DrawingElement::new("x", DrawingShape::Path { points: vec![] }),
                },
                Command::AddConnector {
                    connector: Connector::new("c1", Endpoint::drawing("x"), Endpoint::note("n2")),
                },
                Command::AddConnector {
                    connector: Connector::new("c2", Endpoint::note("x"), Endpoint::note("n2")),
                },
                Command::DeleteNote { id: "x".into() },
            ],
            &config,
        );
        assert!(board.content.drawing(&"x".into()).is_some());
        let ids: Vec<&str> = board.content.connectors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
        assert_eq!(board.resolved_connectors().count(), 1);
    }

    #[test]
    fn test_delete_selected_cascades_per_kind() {
        let config = BoardConfig {
            connector_policy: ConnectorPolicy::Cascade,
            ..BoardConfig::default()
        };
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("a", 0.0, 0.0) },
                Command::AddNote { note: note("b", 0.0, 0.0) },
                Command::AddConnector {
                    connector: Connector::new("c1", Endpoint::note("a"), Endpoint::note("b")),
                },
                Command::AddConnector {
                    connector: Connector::new("c2", Endpoint::drawing("a"), Endpoint::note("b")),
                },
                Command::Select { id: "a".into() },
                Command::DeleteSelected,
            ],
            &config,
        );
        let ids: Vec<&str> = board.content.connectors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2"]);
    }

    #[test]
    fn test_update_drawing_element_merges() {
        let config = BoardConfig::default();
        let mut element = DrawingElement::new(
            "d1",
            DrawingShape::Line {
                start: Point::ZERO,
                end: Point::new(10.0, 0.0),
            },
        );
        element.stroke_width = 3.0;
        let board = run(
            initialized(),
            vec![
                Command::AddDrawingElement { element },
                Command::UpdateDrawingElement {
                    id: "d1".into(),
                    patch: DrawingPatch {
                        color: Some(SerializableColor::white()),
                        locked: Some(true),
                        ..Default::default()
                    },
                },
            ],
            &config,
        );
        let d1 = board.content.drawing(&"d1".into()).unwrap();
        assert_eq!(d1.color, SerializableColor::white());
        assert!(d1.locked);
        assert!((d1.stroke_width - 3.0).abs() < f64::EPSILON);
        assert_eq!(
            d1.shape,
            DrawingShape::Line {
                start: Point::ZERO,
                end: Point::new(10.0, 0.0),
            }
        );
        assert_eq!(board.history.current().unwrap().action_label, "update_drawing_element");
    }

    #[test]
    fn test_update_drawing_element_missing_id() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![Command::AddDrawingElement {
                element: DrawingElement::new("d1", DrawingShape::Path { points: vec![] }),
            }],
            &config,
        );
        let before = board.content.clone();
        let snapshots = board.history.len();

        let board = run(
            board,
            vec![Command::UpdateDrawingElement {
                id: "d2".into(),
                patch: DrawingPatch {
                    stroke_width: Some(9.0),
                    ..Default::default()
                },
            }],
            &config,
        );
        assert_eq!(board.content, before);
        assert_eq!(board.history.len(), snapshots + 1);
    }

    #[test]
    fn test_update_connector_merges() {
        let config = BoardConfig::default();
        let mut connector = Connector::new("c1", Endpoint::note("n1"), Endpoint::note("n2"));
        connector.label = Some("old".to_string());
        let board = run(
            initialized(),
            vec![
                Command::AddConnector { connector },
                Command::UpdateConnector {
                    id: "c1".into(),
                    patch: ConnectorPatch {
                        to: Some(Endpoint::drawing("d1")),
                        stroke_width: Some(5.0),
                        ..Default::default()
                    },
                },
            ],
            &config,
        );
        let c1 = board.content.connector(&"c1".into()).unwrap();
        assert_eq!(c1.from, Endpoint::note("n1"));
        assert_eq!(c1.to, Endpoint::drawing("d1"));
        assert!((c1.stroke_width - 5.0).abs() < f64::EPSILON);
        assert_eq!(c1.label.as_deref(), Some("old"));
    }

    #[test]
    fn test_update_connector_missing_id() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![Command::AddConnector {
                connector: Connector::new("c1", Endpoint::note("n1"), Endpoint::note("n2")),
            }],
            &config,
        );
        let before = board.content.clone();
        let snapshots = board.history.len();

        let board = run(
            board,
            vec![Command::UpdateConnector {
                id: "c9".into(),
                patch: ConnectorPatch {
                    label: Some(None),
                    ..Default::default()
                },
            }],
            &config,
        );
        assert_eq!(board.content, before);
        assert_eq!(board.history.len(), snapshots + 1);
    }

    #[test]
    fn test_save_snapshot_truncates_redo() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::Undo,
                Command::SaveSnapshot {
                    label: Some("checkpoint".to_string()),
                },
            ],
            &config,
        );
        assert_eq!(board.history.len(), 2);
        assert!(!board.can_redo());
        assert_eq!(board.history.current().unwrap().action_label, "checkpoint");
    }

    #[test]
    fn test_initialize_board_resets_history() {
        let config = BoardConfig::default();
        let mut content = BoardContent::new();
        content.notes.push(note("loaded", 0.0, 0.0));

        let board = run(
            initialized(),
            vec![
                Command::AddNote { note: note("n1", 0.0, 0.0) },
                Command::Select { id: "n1".into() },
                Command::InitializeBoard {
                    content: content.clone(),
                },
            ],
            &config,
        );
        assert_eq!(board.content, content);
        assert_eq!(board.history.len(), 1);
        assert_eq!(board.history.cursor(), Some(0));
        assert!(board.selection.is_empty());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_history_limit_applies() {
        let config = BoardConfig {
            history_limit: Some(3),
            ..BoardConfig::default()
        };
        let commands = (0..10)
            .map(|i| Command::AddNote {
                note: note(&format!("n{}", i), 0.0, 0.0),
            })
            .collect();
        let board = run(initialized(), commands, &config);
        assert_eq!(board.history.len(), 3);
        assert_eq!(board.history.cursor(), Some(2));
    }

    #[test]
    fn test_unknown_command_returns_board_unchanged() {
        let config = BoardConfig::default();
        let board = run(
            initialized(),
            vec![Command::AddNote { note: note("n1", 0.0, 0.0) }],
            &config,
        );
        let content = board.content.clone();
        let snapshots = board.history.len();

        let board = run(board, vec![Command::Unknown], &config);
        assert_eq!(board.content, content);
        assert_eq!(board.history.len(), snapshots);
    }
}
