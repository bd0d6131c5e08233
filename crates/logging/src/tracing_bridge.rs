//! crates/logging/src/tracing_bridge.rs
//! Forwards `tracing` events into the global logger.
//!
//! Libraries that report through the `tracing` macros end up in the same
//! sinks, with the same encoding, as direct calls to this crate.
//!
//! # Architecture
//!
//! - [`FacadeLayer`]: a tracing-subscriber layer that turns each event into a
//!   record on whichever global logger is installed when the event fires
//! - The `message` field becomes the record message; every other field is
//!   kept as a typed [`Field`], and the event target is added as `target`
//! - The event's own file and line are used as the caller
//! - Events this crate emits about itself (target `logfacade::internal`) are
//!   not forwarded
//!
//! # Usage
//!
//! ```rust,no_run
//! use logfacade::{Options, init, init_tracing};
//!
//! init(Options::default());
//! init_tracing().expect("no other subscriber installed");
//!
//! tracing::info!(user = "alice", "logged in");
//! ```

use std::fmt;

use tracing::field::{Field as TracingField, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::engine::Caller;
use crate::field::{Field, Value};
use crate::global;
use crate::severity::Severity;

/// A tracing layer writing events through the installed global logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct FacadeLayer {
    _private: (),
}

impl FacadeLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl<S> Layer<S> for FacadeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // The global threshold can change with every init, so interest is never cached.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !is_internal(metadata) && global::enabled(Severity::from(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal(metadata) {
            return;
        }
        let severity = Severity::from(*metadata.level());
        let logger = global::logger();
        if !logger.enabled(severity) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor
            .fields
            .push(Field::string("target", metadata.target()));

        let caller = metadata
            .file()
            .zip(metadata.line())
            .map(|(file, line)| Caller::new(file, line));
        logger.log_at(severity, &visitor.message, &visitor.fields, caller);
    }
}

fn is_internal(metadata: &Metadata<'_>) -> bool {
    metadata.target() == global::INTERNAL_TARGET
}

/// Collects the message and typed fields of one event.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: Value) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(Field::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.push(field, Value::debug(&value));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, Value::I64(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, Value::U64(value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, Value::F64(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::Error(value.to_string()));
    }
}

/// Returned when another global `tracing` subscriber is already installed.
#[derive(Debug, thiserror::Error)]
#[error("cannot install the tracing bridge: {0}")]
pub struct TracingInitError(#[from] TryInitError);

/// Installs a registry with [`FacadeLayer`] as the global `tracing`
/// subscriber.
pub fn init_tracing() -> Result<(), TracingInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(FacadeLayer::new())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    type Captured = Arc<Mutex<Vec<(String, Vec<Field>)>>>;

    struct Recording(Captured);

    impl<S: Subscriber> Layer<S> for Recording {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.0
                .lock()
                .expect("capture lock")
                .push((visitor.message, visitor.fields));
        }
    }

    #[test]
    fn visitor_separates_message_from_typed_fields() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(Recording(Arc::clone(&captured)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(user = "alice", attempt = 2, ok = true, ratio = 0.5, "logged in {}", 1);
        });

        let captured = captured.lock().expect("capture lock");
        let (message, fields) = &captured[0];
        assert_eq!(message, "logged in 1");
        assert_eq!(
            fields,
            &vec![
                Field::string("user", "alice"),
                Field::int("attempt", 2),
                Field::bool("ok", true),
                Field::float("ratio", 0.5),
            ]
        );
    }

    #[test]
    fn debug_formatted_fields_keep_debug_text() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(Recording(Arc::clone(&captured)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(ids = ?vec![1, 2], "batch");
        });

        let captured = captured.lock().expect("capture lock");
        assert_eq!(captured[0].1, vec![Field::new("ids", Value::Debug("[1, 2]".to_owned()))]);
    }
}
