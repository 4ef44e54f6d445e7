use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Which widget emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetKind {
    BarChart,
    DonutChart,
}

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetContext {
    pub kind: WidgetKind,
    pub now_ms: f64,
    pub grouped: bool,
    pub has_data: bool,
    pub canvas_count: usize,
}

/// Lifecycle events exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetEvent {
    DataReplaced,
    DataCleared,
    /// The widget forced its `grouped` binding back to `false`.
    GroupedReset,
    RenderScheduled { due_ms: f64 },
    RenderCancelled,
    Rendered { canvases: usize },
    ModeChanged { grouped: bool },
    CanvasInserted { id: String },
    CanvasRemoved { id: String },
    TooltipShown,
    TooltipHidden,
}

/// Hook interface for hosts that mirror widget state elsewhere.
///
/// Observers see events and a context snapshot; they cannot mutate the widget.
pub trait WidgetObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &WidgetEvent, context: WidgetContext);
}

/// Ordered list of uniquely named observers.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn WidgetObserver>>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|observer| observer.id()))
            .finish()
    }
}

impl ObserverRegistry {
    pub fn register(&mut self, observer: Box<dyn WidgetObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.contains(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id. Returns `true` when removed.
    pub fn unregister(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn contains(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&mut self, event: &WidgetEvent, context: WidgetContext) {
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}
