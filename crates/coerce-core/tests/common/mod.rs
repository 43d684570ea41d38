use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use coerce_core::{ChronoDateParser, Converter, DateParser, DynamicValue, Result};

/// Converter with default parser and empty registry
#[allow(dead_code)]
pub fn converter() -> Converter {
    Converter::new()
}

/// Sequence of text values
#[allow(dead_code)]
pub fn texts(items: &[&str]) -> DynamicValue {
    DynamicValue::from(items.to_vec())
}

#[allow(dead_code)]
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Date parser that counts how often it is invoked
///
/// Delegates to the chrono parser; the counter is shared with the handle
/// returned by [`counting_converter`].
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct CountingParser {
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingParser {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DateParser for CountingParser {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ChronoDateParser.parse(text)
    }
}

/// Converter wired to a counting parser, plus the counter handle
#[allow(dead_code)]
pub fn counting_converter() -> (Converter, CountingParser) {
    let parser = CountingParser::default();
    (Converter::with_date_parser(parser.clone()), parser)
}
