//! Structured logging: targets, levels and fields emitted by the session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lumen_core::{Instant, PointerEvent, Size};
use lumen_viewer::{Direction, MediaCatalog, ViewerConfig, ViewerSession};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

const VIEWPORT: Size = Size::new(1000.0, 800.0);

// Tracing capture infrastructure
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn session(items: usize) -> ViewerSession {
    let catalog = MediaCatalog::from_links((0..items).map(|i| (format!("{i}.webp"), None)));
    let mut s = ViewerSession::new();
    s.init(ViewerConfig::default(), catalog).unwrap();
    s
}

#[test]
fn uninitialized_open_warns() {
    let events = with_captured_tracing(|| {
        let mut s = ViewerSession::new();
        s.open(0, None, VIEWPORT, Instant::now());
    });
    let warn = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("warn event");
    assert_eq!(warn.target, "lumen.session");
    assert!(warn.message().contains("not initialized"));
    assert_eq!(warn.fields.get("index").map(String::as_str), Some("0"));
}

#[test]
fn navigation_logs_decision_and_recycle() {
    let events = with_captured_tracing(|| {
        let mut s = session(3);
        let t0 = Instant::now();
        s.open(0, None, VIEWPORT, t0);
        for event in [
            PointerEvent::down(1, 800.0, 400.0),
            PointerEvent::moved(1, 500.0, 400.0),
            PointerEvent::up(1, 500.0, 400.0),
        ] {
            s.handle_pointer(&event, VIEWPORT, t0);
        }
        s.tick(VIEWPORT, t0 + lumen_core::Duration::from_millis(260));
    });

    let decided = events
        .iter()
        .find(|e| e.message() == "release decided")
        .expect("release decision logged");
    assert_eq!(decided.target, "lumen.nav");
    assert_eq!(decided.level, tracing::Level::DEBUG);
    assert_eq!(
        decided.fields.get("decision").map(String::as_str),
        Some(format!("{:?}", lumen_viewer::ReleaseDecision::Navigate(Direction::Forward)).as_str())
    );

    let recycled = events
        .iter()
        .find(|e| e.message() == "slides recycled")
        .expect("recycle logged");
    assert_eq!(recycled.target, "lumen.nav");
    assert_eq!(recycled.fields.get("index").map(String::as_str), Some("1"));

    assert!(
        events
            .iter()
            .any(|e| e.target == "lumen.anim" && e.message() == "animation complete")
    );
    assert!(
        events
            .iter()
            .any(|e| e.target == "lumen.gesture" && e.message() == "pan start")
    );
}

#[test]
fn close_logs_teardown_delay() {
    let events = with_captured_tracing(|| {
        let mut s = session(1);
        let t0 = Instant::now();
        s.open(0, None, VIEWPORT, t0);
        s.close(t0);
    });
    let closing = events
        .iter()
        .find(|e| e.message() == "closing")
        .expect("close logged");
    assert_eq!(closing.target, "lumen.session");
    assert_eq!(closing.fields.get("teardown_ms").map(String::as_str), Some("300"));
}
