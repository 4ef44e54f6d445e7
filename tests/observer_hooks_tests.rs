use std::cell::RefCell;
use std::rc::Rc;

use stat_charts::ChartError;
use stat_charts::api::{DonutChartConfig, DonutChartWidget};
use stat_charts::core::{DonutViewModel, PieDatum};
use stat_charts::extensions::{WidgetContext, WidgetEvent, WidgetKind, WidgetObserver};
use stat_charts::render::NullRenderer;

type EventLog = Rc<RefCell<Vec<(WidgetEvent, WidgetContext)>>>;

struct Recorder {
    id: &'static str,
    log: EventLog,
}

impl WidgetObserver for Recorder {
    fn id(&self) -> &str {
        self.id
    }

    fn on_event(&mut self, event: &WidgetEvent, context: WidgetContext) {
        self.log.borrow_mut().push((event.clone(), context));
    }
}

fn model() -> DonutViewModel {
    DonutViewModel::new(
        vec![
            PieDatum::new("blog", 3.0, 3.0, "#aa0000"),
            PieDatum::new("wiki", 1.0, 1.0, "#00aa00"),
        ],
        vec![
            vec![PieDatum::new("blog", 1.0, 1.0, "#aa0000").with_profile("teacher")],
            vec![PieDatum::new("wiki", 1.0, 1.0, "#00aa00").with_profile("student")],
            vec![PieDatum::new("blog", 2.0, 2.0, "#aa0000").with_profile("guest")],
        ],
    )
}

#[test]
fn duplicate_and_empty_ids_are_rejected() {
    let log = EventLog::default();
    let mut widget =
        DonutChartWidget::new(NullRenderer::default(), DonutChartConfig::default()).expect("widget");
    widget
        .register_observer(Box::new(Recorder {
            id: "mirror",
            log: Rc::clone(&log),
        }))
        .expect("first registration");

    let duplicate = widget.register_observer(Box::new(Recorder {
        id: "mirror",
        log: Rc::clone(&log),
    }));
    assert!(matches!(duplicate, Err(ChartError::InvalidData(_))));

    let empty = widget.register_observer(Box::new(Recorder {
        id: "",
        log: Rc::clone(&log),
    }));
    assert!(matches!(empty, Err(ChartError::InvalidData(_))));

    assert!(widget.unregister_observer("mirror"));
    assert!(!widget.unregister_observer("mirror"));
}

#[test]
fn donut_lifecycle_events_are_reported_in_order() {
    let log = EventLog::default();
    let mut widget =
        DonutChartWidget::new(NullRenderer::default(), DonutChartConfig::default()).expect("widget");
    widget
        .register_observer(Box::new(Recorder {
            id: "mirror",
            log: Rc::clone(&log),
        }))
        .expect("register");

    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 10.0);
    widget.set_grouped(false, 1_000.0);
    widget.set_val(None, 2_000.0);

    let events: Vec<WidgetEvent> = log.borrow().iter().map(|(event, _)| event.clone()).collect();
    assert_eq!(
        events,
        vec![
            WidgetEvent::DataReplaced,
            WidgetEvent::ModeChanged { grouped: true },
            WidgetEvent::CanvasInserted {
                id: "piechart1".to_owned()
            },
            WidgetEvent::CanvasInserted {
                id: "piechart2".to_owned()
            },
            WidgetEvent::ModeChanged { grouped: false },
            WidgetEvent::CanvasRemoved {
                id: "piechart1".to_owned()
            },
            WidgetEvent::CanvasRemoved {
                id: "piechart2".to_owned()
            },
            WidgetEvent::DataCleared,
        ]
    );

    let contexts: Vec<WidgetContext> = log.borrow().iter().map(|(_, context)| *context).collect();
    assert!(contexts.iter().all(|context| context.kind == WidgetKind::DonutChart));
    assert_eq!(contexts[3].canvas_count, 4);
    assert!((contexts[3].now_ms - 10.0).abs() <= 1e-9);
    assert!(!contexts[7].has_data);
}
