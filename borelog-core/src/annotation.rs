//! Annotation session model and state machine.
//!
//! The interactive flow is a typed state machine: dialog choices arrive as
//! [`SessionEvent`]s and every cancellation path returns to `Idle` without
//! touching the committed sequence.

use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Builds a normalized region from two drag corners.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self {
            x,
            y,
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }

    /// Point-in-rectangle test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A committed user annotation: a region tied to a label and an external file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    pub region: Region,
    pub label: String,
    pub linked_file: PathBuf,
}

/// Session state. `Finished` is terminal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Waiting for the user to supply region geometry.
    Drawing,
    /// Region confirmed; waiting for a label.
    Labeling { region: Region },
    /// Label accepted; waiting for a file to link.
    Linking { region: Region, label: String },
    Finished,
}

/// Events driving the session. Each user choice is a transition trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    BeginRegion,
    RegionDrawn(Region),
    LabelEntered(String),
    FileLinked(PathBuf),
    Cancel,
    ClearAll,
    Finish,
}

/// What activating a committed annotation should do, decided at interaction
/// time so files deleted after creation degrade to a warning.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    Open(PathBuf),
    Missing(PathBuf),
}

/// The annotation sequence and its editing state machine.
///
/// Insertion order is z-order: redraws replay the whole sequence in order, and
/// hit tests prefer the latest insertion.
#[derive(Debug, Default)]
pub struct AnnotationSession {
    annotations: Vec<Annotation>,
    state: SessionState,
}

impl AnnotationSession {
    /// Starts an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from a previously persisted sequence.
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        Self {
            annotations,
            state: SessionState::Idle,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Committed annotations in insertion (z-) order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether the interactive loop has exited.
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Replaces the whole sequence (session reload; last-saved-wins).
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// Applies one event. Returns `true` when the committed sequence changed
    /// and the caller must redraw.
    ///
    /// Unexpected events for the current state are ignored; a cancel in any
    /// in-progress state discards the draft with no sequence mutation. An
    /// empty or blank label behaves as a cancel.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        let state = std::mem::take(&mut self.state);
        let (next, changed) = match (state, event) {
            (SessionState::Idle, SessionEvent::BeginRegion) => (SessionState::Drawing, false),
            (SessionState::Drawing, SessionEvent::RegionDrawn(region)) => {
                (SessionState::Labeling { region }, false)
            }
            (SessionState::Labeling { region }, SessionEvent::LabelEntered(label)) => {
                let label = label.trim().to_string();
                if label.is_empty() {
                    (SessionState::Idle, false)
                } else {
                    (SessionState::Linking { region, label }, false)
                }
            }
            (SessionState::Linking { region, label }, SessionEvent::FileLinked(path)) => {
                self.annotations.push(Annotation {
                    region,
                    label,
                    linked_file: path,
                });
                (SessionState::Idle, true)
            }
            (
                SessionState::Drawing | SessionState::Labeling { .. } | SessionState::Linking { .. },
                SessionEvent::Cancel,
            ) => (SessionState::Idle, false),
            (SessionState::Idle, SessionEvent::ClearAll) => {
                let changed = !self.annotations.is_empty();
                self.annotations.clear();
                (SessionState::Idle, changed)
            }
            (SessionState::Idle, SessionEvent::Finish) => (SessionState::Finished, false),
            (state, _) => (state, false),
        };
        self.state = next;
        changed
    }

    /// Index of the topmost annotation containing the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.annotations
            .iter()
            .enumerate()
            .rev()
            .find(|(_, a)| a.region.contains(x, y))
            .map(|(i, _)| i)
    }

    /// Activation decision for one annotation: open the linked file if it
    /// still exists, report it missing otherwise.
    pub fn activate(&self, index: usize) -> Option<Activation> {
        let annotation = self.annotations.get(index)?;
        if Path::new(&annotation.linked_file).exists() {
            Some(Activation::Open(annotation.linked_file.clone()))
        } else {
            Some(Activation::Missing(annotation.linked_file.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        }
    }

    fn commit_one(session: &mut AnnotationSession, label: &str, file: &str) {
        assert!(!session.apply(SessionEvent::BeginRegion));
        assert!(!session.apply(SessionEvent::RegionDrawn(region())));
        assert!(!session.apply(SessionEvent::LabelEntered(label.into())));
        assert!(session.apply(SessionEvent::FileLinked(PathBuf::from(file))));
    }

    #[test]
    fn test_full_flow_appends_annotation() {
        let mut session = AnnotationSession::new();
        commit_one(&mut session, "Fault", "report.pdf");
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(session.annotations().len(), 1);
        assert_eq!(session.annotations()[0].label, "Fault");
    }

    #[test]
    fn test_empty_label_discards_draft() {
        let mut session = AnnotationSession::new();
        session.apply(SessionEvent::BeginRegion);
        session.apply(SessionEvent::RegionDrawn(region()));
        assert!(!session.apply(SessionEvent::LabelEntered("   ".into())));
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn test_cancel_from_every_in_progress_state() {
        for steps in 1..=3 {
            let mut session = AnnotationSession::new();
            let events = [
                SessionEvent::BeginRegion,
                SessionEvent::RegionDrawn(region()),
                SessionEvent::LabelEntered("X".into()),
            ];
            for event in events.into_iter().take(steps) {
                session.apply(event);
            }
            assert!(!session.apply(SessionEvent::Cancel));
            assert_eq!(session.state(), &SessionState::Idle);
            assert!(session.annotations().is_empty());
        }
    }

    #[test]
    fn test_clear_all_only_from_idle() {
        let mut session = AnnotationSession::new();
        commit_one(&mut session, "A", "a.pdf");
        session.apply(SessionEvent::BeginRegion);
        assert!(!session.apply(SessionEvent::ClearAll));
        assert_eq!(session.annotations().len(), 1);
        session.apply(SessionEvent::Cancel);
        assert!(session.apply(SessionEvent::ClearAll));
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn test_finish_is_terminal() {
        let mut session = AnnotationSession::new();
        assert!(!session.apply(SessionEvent::Finish));
        assert!(session.is_finished());
        assert!(!session.apply(SessionEvent::BeginRegion));
        assert_eq!(session.state(), &SessionState::Finished);
    }

    #[test]
    fn test_hit_test_prefers_latest_insertion() {
        let mut session = AnnotationSession::new();
        commit_one(&mut session, "under", "a.pdf");
        commit_one(&mut session, "over", "b.pdf");
        let hit = session.hit_test(2.0, 3.0).unwrap();
        assert_eq!(session.annotations()[hit].label, "over");
        assert!(session.hit_test(100.0, 100.0).is_none());
    }

    #[test]
    fn test_activate_reports_missing_file() {
        let mut session = AnnotationSession::new();
        commit_one(&mut session, "X", "definitely-missing.pdf");
        match session.activate(0) {
            Some(Activation::Missing(path)) => {
                assert_eq!(path, PathBuf::from("definitely-missing.pdf"));
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_region_from_corners_normalizes() {
        let r = Region::from_corners((5.0, 1.0), (2.0, 4.0));
        assert_eq!((r.x, r.y, r.width, r.height), (2.0, 1.0, 3.0, 3.0));
        assert!(r.contains(3.0, 2.0));
        assert!(!r.contains(6.0, 2.0));
    }
}
