use crate::models::{LineKey, StationId, Vertex};
use super::selection::Selection;

/// Lightweight description of the selection, for list panels that mirror it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectedItem {
    #[default]
    None,
    Station(StationId),
    Line(LineKey),
}

impl From<&Selection> for SelectedItem {
    fn from(selection: &Selection) -> Self {
        match selection {
            Selection::None => SelectedItem::None,
            Selection::Station(id) => SelectedItem::Station(*id),
            Selection::Line(session) => SelectedItem::Line(session.key.clone()),
        }
    }
}

/// Notifications pushed to observers after the engine changes state.
///
/// Coordinates are always already rounded to hundredths.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A station drag moved the station in the dataset.
    StationDragged { id: StationId, position: Vertex },
    /// The active vertex moved, or `None` once no vertex is active.
    VertexChanged(Option<Vertex>),
    SelectionChanged(SelectedItem),
    PathEditingChanged(bool),
}

pub type Observer = Box<dyn Fn(&EngineEvent)>;

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub struct Observers {
    observers: Vec<Observer>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: impl Fn(&EngineEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn emit(&self, event: &EngineEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}
