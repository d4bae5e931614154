//! Serializers rendering `Duration`s the way the summary reports them.
use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serializer;

const MS_PER_SEC: f64 = 1_000.0;

#[expect(
    clippy::float_arithmetic,
    reason = "JSON durations are fractional milliseconds"
)]
pub(super) fn to_millis(value: Duration) -> f64 {
    value.as_secs_f64() * MS_PER_SEC
}

pub(super) fn millis<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(to_millis(*value))
}

pub(super) fn seconds<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}

pub(super) fn percentiles<S>(
    value: &Option<BTreeMap<u8, Duration>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(table) => serializer.collect_map(
            table
                .iter()
                .map(|(percent, latency)| (percent.to_string(), to_millis(*latency))),
        ),
        None => serializer.serialize_none(),
    }
}
