use crate::models::{LineKey, StationId};
use super::staging::{StagingBuffer, VertexRef};

/// Which sidebar tab is in front. Station drags only work on the stations tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    #[default]
    Stations,
    Lines,
}

/// Editing state attached to a selected line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEditSession {
    pub key: LineKey,
    pub staging: StagingBuffer,
    pub path_editing: bool,
    pub active_vertex: Option<VertexRef>,
}

impl LineEditSession {
    #[must_use]
    pub fn new(key: LineKey, staging: StagingBuffer) -> Self {
        Self {
            key,
            staging,
            path_editing: false,
            active_vertex: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Station(StationId),
    Line(LineEditSession),
}

impl Selection {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    #[must_use]
    pub fn station_id(&self) -> Option<StationId> {
        match self {
            Selection::Station(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn line_key(&self) -> Option<&LineKey> {
        match self {
            Selection::Line(session) => Some(&session.key),
            _ => None,
        }
    }

    #[must_use]
    pub fn line_session(&self) -> Option<&LineEditSession> {
        match self {
            Selection::Line(session) => Some(session),
            _ => None,
        }
    }

    pub fn line_session_mut(&mut self) -> Option<&mut LineEditSession> {
        match self {
            Selection::Line(session) => Some(session),
            _ => None,
        }
    }

    /// The session, but only while path editing is on.
    pub fn path_session_mut(&mut self) -> Option<&mut LineEditSession> {
        self.line_session_mut().filter(|s| s.path_editing)
    }

    #[must_use]
    pub fn is_path_editing(&self) -> bool {
        self.line_session().is_some_and(|s| s.path_editing)
    }

    #[must_use]
    pub fn active_vertex(&self) -> Option<&VertexRef> {
        self.line_session().and_then(|s| s.active_vertex.as_ref())
    }
}

/// Observable editor state, derived from the selection and the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Browsing,
    StationSelected,
    LineSelected,
    PathEditing,
    VertexSelected,
    VertexDragging,
}

impl EditorMode {
    #[must_use]
    pub fn derive(selection: &Selection, dragging_vertex: bool) -> Self {
        match selection {
            Selection::None => EditorMode::Browsing,
            Selection::Station(_) => EditorMode::StationSelected,
            Selection::Line(session) if !session.path_editing => EditorMode::LineSelected,
            Selection::Line(session) => match (&session.active_vertex, dragging_vertex) {
                (None, _) => EditorMode::PathEditing,
                (Some(_), false) => EditorMode::VertexSelected,
                (Some(_), true) => EditorMode::VertexDragging,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(path_editing: bool, active: Option<VertexRef>) -> Selection {
        let mut session = LineEditSession::new(LineKey::new("Nether", "Red"), StagingBuffer::default());
        session.path_editing = path_editing;
        session.active_vertex = active;
        Selection::Line(session)
    }

    #[test]
    fn test_mode_derivation() {
        assert_eq!(EditorMode::derive(&Selection::None, false), EditorMode::Browsing);
        assert_eq!(EditorMode::derive(&Selection::Station(4), true), EditorMode::StationSelected);
        assert_eq!(EditorMode::derive(&session(false, None), false), EditorMode::LineSelected);
        assert_eq!(EditorMode::derive(&session(true, None), false), EditorMode::PathEditing);

        let vertex = Some(VertexRef::new("Main line", 0));
        assert_eq!(EditorMode::derive(&session(true, vertex.clone()), false), EditorMode::VertexSelected);
        assert_eq!(EditorMode::derive(&session(true, vertex), true), EditorMode::VertexDragging);
    }

    #[test]
    fn test_path_session_requires_path_editing() {
        let mut selection = session(false, None);
        assert!(selection.path_session_mut().is_none());
        assert!(selection.line_session_mut().is_some());

        let mut selection = session(true, None);
        assert!(selection.path_session_mut().is_some());
        assert!(selection.is_path_editing());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Selection::Station(7).station_id(), Some(7));
        assert_eq!(Selection::Station(7).line_key(), None);
        assert_eq!(session(false, None).line_key(), Some(&LineKey::new("Nether", "Red")));
        assert!(Selection::default().is_none());
    }
}
