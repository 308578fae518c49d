//! Reduce 3-hour forecast samples to one summary per calendar day.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    calendar::CalendarPolicy,
    model::{DailySummary, ForecastSample},
};

/// Running reduction for one day.
#[derive(Debug)]
struct Bucket {
    temperature_min: f64,
    temperature_max: f64,
    /// `(code, count)` in order of first appearance.
    counts: Vec<(i32, usize)>,
    sample_count: usize,
}

impl Bucket {
    fn seed(sample: &ForecastSample) -> Self {
        Self {
            temperature_min: sample.temperature_min,
            temperature_max: sample.temperature_max,
            counts: vec![(sample.condition_code, 1)],
            sample_count: 1,
        }
    }

    // Plain comparisons on purpose: NaN never replaces or is replaced.
    fn absorb(&mut self, sample: &ForecastSample) {
        if sample.temperature_min < self.temperature_min {
            self.temperature_min = sample.temperature_min;
        }
        if sample.temperature_max > self.temperature_max {
            self.temperature_max = sample.temperature_max;
        }
        match self.counts.iter_mut().find(|(code, _)| *code == sample.condition_code) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((sample.condition_code, 1)),
        }
        self.sample_count += 1;
    }

    /// Most frequent code; on equal counts the one seen first wins.
    fn dominant_code(&self) -> i32 {
        let mut best = self.counts[0];
        for &(code, count) in &self.counts[1..] {
            if count > best.1 {
                best = (code, count);
            }
        }
        best.0
    }

    fn finish(self, day: DateTime<Utc>) -> DailySummary {
        DailySummary {
            day,
            dominant_condition_code: self.dominant_code(),
            temperature_max: self.temperature_max,
            temperature_min: self.temperature_min,
            sample_count: self.sample_count,
        }
    }
}

/// Group `samples` by calendar day and summarise each day.
///
/// Input order does not matter for bucketing; it only decides ties between
/// equally frequent condition codes. The result is sorted ascending by
/// [`DailySummary::day`] with one entry per distinct day.
pub fn aggregate<C>(samples: &[ForecastSample], calendar: &C) -> Vec<DailySummary>
where
    C: CalendarPolicy + ?Sized,
{
    let mut buckets: BTreeMap<DateTime<Utc>, Bucket> = BTreeMap::new();

    for sample in samples {
        let day = calendar.start_of_day(sample.timestamp);
        buckets
            .entry(day)
            .and_modify(|bucket| bucket.absorb(sample))
            .or_insert_with(|| Bucket::seed(sample));
    }

    tracing::debug!(samples = samples.len(), days = buckets.len(), "aggregated forecast");

    buckets.into_iter().map(|(day, bucket)| bucket.finish(day)).collect()
}

/// Lowest minimum and highest maximum across all days.
pub fn temperature_range(days: &[DailySummary]) -> Option<(f64, f64)> {
    let (first, rest) = days.split_first()?;
    let mut low = first.temperature_min;
    let mut high = first.temperature_max;
    for day in rest {
        if day.temperature_min < low {
            low = day.temperature_min;
        }
        if day.temperature_max > high {
            high = day.temperature_max;
        }
    }
    Some((low, high))
}
