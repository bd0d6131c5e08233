//! crates/logging/src/engine/encoder.rs
//! JSON and console record encodings.

use std::str::FromStr;
use std::time::Duration;

use anstyle::{AnsiColor, Color, Style};
use serde_json::{Number, Value as Json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use super::Record;
use super::config::{CallerEncoding, DurationEncoding, EncoderConfig, LevelEncoding, TimeEncoding};
use crate::field::Value;
use crate::severity::Severity;

/// Record encodings understood by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// One JSON object per record.
    Json,
    /// Tab-separated human readable columns.
    Console,
}

/// Returned when an encoding name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no encoder registered for name {0:?}")]
pub struct UnknownEncoding(pub String);

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "json" => Ok(Self::Json),
            "console" => Ok(Self::Console),
            other => Err(UnknownEncoding(other.to_owned())),
        }
    }
}

/// Renders records into bytes.
#[derive(Clone, Debug)]
pub(crate) struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
}

impl Encoder {
    pub(crate) const fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self { encoding, config }
    }

    pub(crate) fn encode(
        &self,
        record: &Record<'_>,
        time: OffsetDateTime,
        stack: Option<&str>,
    ) -> String {
        match self.encoding {
            Encoding::Json => self.encode_json(record, time, stack),
            Encoding::Console => self.encode_console(record, time, stack),
        }
    }

    /// Timestamp rendering shared with the engine's own error reports.
    pub(crate) fn time_text(&self, time: OffsetDateTime) -> String {
        match self.time_json(time) {
            Json::String(text) => text,
            other => other.to_string(),
        }
    }

    fn encode_json(&self, record: &Record<'_>, time: OffsetDateTime, stack: Option<&str>) -> String {
        let config = &self.config;
        let mut object = JsonLine::default();

        object.push(&config.level_key, &Json::String(self.level_text(record.severity)));
        object.push(&config.time_key, &self.time_json(time));
        if let Some(name) = record.name {
            object.push(&config.name_key, &Json::String(name.to_owned()));
        }
        if let Some(caller) = self.caller_text(record) {
            object.push(&config.caller_key, &Json::String(caller));
        }
        object.push(&config.message_key, &Json::String(record.message.to_owned()));
        for field in record.context.iter().chain(record.fields) {
            object.push(field.key(), &self.value_json(field.value()));
        }
        if let Some(stack) = stack {
            object.push(&config.stacktrace_key, &Json::String(stack.to_owned()));
        }

        object.finish(&config.line_ending)
    }

    fn encode_console(
        &self,
        record: &Record<'_>,
        time: OffsetDateTime,
        stack: Option<&str>,
    ) -> String {
        let config = &self.config;
        let mut columns: Vec<String> = Vec::with_capacity(6);

        if !config.time_key.is_empty() {
            columns.push(self.time_text(time));
        }
        if !config.level_key.is_empty() {
            columns.push(self.level_text(record.severity));
        }
        if let Some(name) = record.name.filter(|_| !config.name_key.is_empty()) {
            columns.push(name.to_owned());
        }
        if let Some(caller) = self.caller_text(record) {
            columns.push(caller);
        }
        if !config.message_key.is_empty() {
            columns.push(record.message.to_owned());
        }
        if !record.context.is_empty() || !record.fields.is_empty() {
            let mut object = JsonLine::default();
            for field in record.context.iter().chain(record.fields) {
                object.push(field.key(), &self.value_json(field.value()));
            }
            columns.push(object.finish(""));
        }

        let mut line = columns.join("\t");
        line.push_str(&config.line_ending);
        if let Some(stack) = stack.filter(|_| !config.stacktrace_key.is_empty()) {
            line.push_str(stack.trim_end());
            line.push_str(&config.line_ending);
        }
        line
    }

    fn level_text(&self, severity: Severity) -> String {
        match self.config.level_encoding {
            LevelEncoding::Lowercase => severity.as_str().to_owned(),
            LevelEncoding::Capital => severity.as_capital_str().to_owned(),
            LevelEncoding::CapitalColor => {
                let style = level_style(severity);
                format!(
                    "{}{}{}",
                    style.render(),
                    severity.as_capital_str(),
                    style.render_reset()
                )
            }
        }
    }

    fn time_json(&self, time: OffsetDateTime) -> Json {
        match self.config.time_encoding {
            TimeEncoding::Layout => Json::String(
                time.format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
                ))
                .unwrap_or_else(|_| time.unix_timestamp().to_string()),
            ),
            TimeEncoding::Rfc3339 => Json::String(
                time.format(&Rfc3339)
                    .unwrap_or_else(|_| time.unix_timestamp().to_string()),
            ),
            TimeEncoding::EpochMillis => {
                let millis = time.unix_timestamp_nanos() / 1_000_000;
                Json::Number(Number::from(i64::try_from(millis).unwrap_or(i64::MAX)))
            }
        }
    }

    fn caller_text(&self, record: &Record<'_>) -> Option<String> {
        if self.config.caller_key.is_empty() {
            return None;
        }
        record.caller.map(|caller| match self.config.caller_encoding {
            CallerEncoding::Short => caller.short(),
            CallerEncoding::Full => caller.full(),
        })
    }

    fn value_json(&self, value: &Value) -> Json {
        match value {
            Value::Str(text) | Value::Error(text) | Value::Debug(text) => Json::String(text.clone()),
            Value::Bool(flag) => Json::Bool(*flag),
            Value::I64(number) => Json::Number(Number::from(*number)),
            Value::U64(number) => Json::Number(Number::from(*number)),
            Value::F64(number) => float_json(*number),
            Value::Duration(elapsed) => self.duration_json(*elapsed),
            Value::Json(json) => json.clone(),
        }
    }

    fn duration_json(&self, elapsed: Duration) -> Json {
        match self.config.duration_encoding {
            DurationEncoding::Millis => float_json(elapsed.as_nanos() as f64 / 1_000_000.0),
            DurationEncoding::Nanos => {
                Json::Number(Number::from(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)))
            }
            DurationEncoding::Text => Json::String(format!("{elapsed:?}")),
        }
    }
}

/// NaN and infinities have no JSON number form and are kept as text.
fn float_json(number: f64) -> Json {
    Number::from_f64(number).map_or_else(|| Json::String(number.to_string()), Json::Number)
}

fn level_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Debug => AnsiColor::Magenta,
        Severity::Info => AnsiColor::Blue,
        Severity::Warn => AnsiColor::Yellow,
        Severity::Error | Severity::Panic | Severity::Fatal => AnsiColor::Red,
    };
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Builds a JSON object in insertion order, skipping empty keys.
#[derive(Default)]
struct JsonLine {
    text: String,
}

impl JsonLine {
    fn push(&mut self, key: &str, value: &Json) {
        if key.is_empty() {
            return;
        }
        self.text.push(if self.text.is_empty() { '{' } else { ',' });
        self.text.push_str(&Json::String(key.to_owned()).to_string());
        self.text.push(':');
        self.text.push_str(&value.to_string());
    }

    fn finish(mut self, line_ending: &str) -> String {
        if self.text.is_empty() {
            self.text.push('{');
        }
        self.text.push('}');
        self.text.push_str(line_ending);
        self.text
    }
}

/// Renders just the field object, for encoder tests.
#[cfg(test)]
pub(crate) fn fields_json(encoder: &Encoder, fields: &[crate::field::Field]) -> String {
    let mut object = JsonLine::default();
    for field in fields {
        object.push(field.key(), &encoder.value_json(field.value()));
    }
    object.finish("")
}
