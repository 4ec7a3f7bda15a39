//! HTML fragments written into the panel's output elements

use crate::error::WeatherError;
use crate::models::{Estimate, WeatherReading};

/// Placeholder while a lookup is running
pub const LOADING_HTML: &str = "<div>Loading…</div>";

const ERROR_COLOR: &str = "#b91c1c";
const MUTED_COLOR: &str = "#6b7280";

/// Inline red message
pub fn error_html(message: &str) -> String {
    format!(
        r#"<div style="color:{}">{}</div>"#,
        ERROR_COLOR,
        escape_html(message)
    )
}

pub fn estimate_html(estimate: &Estimate) -> String {
    let mut html = format!(
        "<div><strong>{}</strong> required</div>",
        escape_html(&estimate.amount_display())
    );
    match estimate.cost_display() {
        Some(cost) => html.push_str(&format!(
            r#"<div style="margin-top:6px;"><strong>Estimated cost:</strong> {}</div>"#,
            escape_html(&cost)
        )),
        None => html.push_str(&format!(
            r#"<div style="margin-top:6px;color:{}">Enter price to see estimated cost</div>"#,
            MUTED_COLOR
        )),
    }
    html
}

pub fn weather_html(reading: &WeatherReading) -> String {
    reading
        .rows()
        .iter()
        .map(|row| {
            format!(
                r#"<div style="display:flex;justify-content:space-between"><span>{}</span><strong>{}</strong></div>"#,
                row.label,
                escape_html(&row.value)
            )
        })
        .collect()
}

/// Reading, or the inline message for a failed lookup
pub fn outcome_html(outcome: &Result<WeatherReading, WeatherError>) -> String {
    match outcome {
        Ok(reading) => weather_html(reading),
        Err(e) => error_html(e.user_message()),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
