use chrono::{DateTime, Utc};
use weather_core::{
    CalendarPolicy, DailySummary, ImageVariant, SchemeTable, TemperatureUnit, temperature_range,
};

const BAR_WIDTH: usize = 20;

/// One output line per day: weekday, date, label, low, range bar, high,
/// and the scheme image for `variant` when a table is loaded.
pub fn daily_lines<C>(
    days: &[DailySummary],
    calendar: &C,
    unit: TemperatureUnit,
    schemes: Option<&SchemeTable>,
    variant: ImageVariant,
) -> Vec<String>
where
    C: CalendarPolicy + ?Sized,
{
    let range = temperature_range(days);

    days.iter()
        .map(|day| {
            let date = calendar.local_date(day.day);
            let category = day.category();
            let icon = schemes
                .and_then(|t| t.image(category, variant).ok())
                .map(|image| format!(" [{image}]"))
                .unwrap_or_default();

            format!(
                "{:<9} {}  {:<10} {:>6} {} {:<6}{}",
                date.format("%A"),
                date.format("%Y-%m-%d"),
                category.label(),
                unit.format(day.temperature_min),
                range_bar(day, range),
                unit.format(day.temperature_max),
                icon,
            )
        })
        .collect()
}

// The day's span drawn inside the overall span of the forecast.
fn range_bar(day: &DailySummary, range: Option<(f64, f64)>) -> String {
    let Some((low, high)) = range else {
        return " ".repeat(BAR_WIDTH);
    };
    let span = high - low;
    if !(span.is_finite() && span > 0.0) {
        return "=".repeat(BAR_WIDTH);
    }

    let scale = |t: f64| {
        let pos = ((t - low) / span * BAR_WIDTH as f64).round();
        if pos.is_nan() { 0 } else { pos.clamp(0.0, BAR_WIDTH as f64) as usize }
    };
    // keep at least one cell for a day sitting at the top of the range
    let start = scale(day.temperature_min).min(BAR_WIDTH - 1);
    let end = scale(day.temperature_max).max(start);

    let mut bar = String::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        bar.push(if i >= start && i < end.max(start + 1) { '=' } else { '-' });
    }
    bar
}

pub fn header(location: Option<&str>, now: DateTime<Utc>) -> String {
    let generated = now.format("%Y-%m-%d %H:%M UTC");
    match location {
        Some(name) => format!("Daily forecast for {name} (generated {generated})"),
        None => format!("Daily forecast (generated {generated})"),
    }
}
