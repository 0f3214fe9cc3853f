//! Prediction page
//!
//! One form with a numeric input per feature spread over three columns,
//! followed by either the result section or an inline error.

use super::chart::render_bar_chart;
use super::escape_html;
use crate::constants::{FORM_COLUMNS, INPUT_DEFAULT, INPUT_STEP};
use crate::logic::features::FeatureLayout;
use crate::logic::model::SaltReport;

/// One input widget
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    /// Widgets at their initial value
    pub fn defaults(layout: &FeatureLayout) -> Vec<Self> {
        layout
            .names()
            .iter()
            .map(|name| Self {
                name: name.clone(),
                value: format!("{:.2}", INPUT_DEFAULT),
            })
            .collect()
    }

    /// Widgets showing what was submitted; fields left out fall back to the default
    pub fn echo(layout: &FeatureLayout, submitted: &[(String, String)]) -> Vec<Self> {
        layout
            .names()
            .iter()
            .map(|name| Self {
                name: name.clone(),
                value: submitted
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(|| format!("{:.2}", INPUT_DEFAULT)),
            })
            .collect()
    }
}

/// What follows the form after a submission
#[derive(Debug, Clone)]
pub enum Outcome {
    Report(SaltReport),
    Error(String),
}

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 1100px; margin: 0 auto; padding: 1rem 2rem; }
.header { text-align: center; }
.columns { display: flex; gap: 1.5rem; }
.column { flex: 1; display: flex; flex-direction: column; gap: 0.75rem; }
.column label { display: flex; flex-direction: column; font-size: 0.9rem; gap: 0.25rem; }
.column input { padding: 0.4rem; }
button.primary { width: 100%; margin-top: 1rem; padding: 0.6rem; background: #FF4B4B; color: white; border: none; border-radius: 6px; font-size: 1rem; cursor: pointer; }
.result { display: flex; gap: 2rem; margin-top: 1.5rem; }
.summary { flex: 2; }
.overview { flex: 1; }
.success { background: #D4EFDF; color: #1E8449; padding: 0.8rem; border-radius: 6px; }
.error { background: #FADBD8; color: #922B21; padding: 0.8rem; border-radius: 6px; margin-top: 1.5rem; }
progress { width: 100%; height: 1rem; }
.caption { color: #7F8C8D; font-size: 0.85rem; }
.note { text-align: center; color: grey; }
.footer { text-align: center; color: #85929E; }
"#;

pub fn render_page(fields: &[FormField], outcome: Option<&Outcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>💧 Water Salt Level Predictor</title>");
    html.push_str(&format!("<style>{}</style></head><body>", STYLE));

    html.push_str(
        r#"<div class="header">
<h1 style="color:#2E86C1;">💧 Water Salt Level Prediction</h1>
<h4 style="color:#5D6D7E;">Predict water salinity and drinkability using key water quality parameters</h4>
<hr style="border:1px solid #2E86C1;">
</div>"#,
    );

    html.push_str("<h3>🌿 Enter Water Properties</h3>");
    html.push_str(&render_form(fields));

    match outcome {
        Some(Outcome::Report(report)) => html.push_str(&render_report(report)),
        Some(Outcome::Error(message)) => {
            html.push_str(&format!(
                r#"<div class="error">⚠️ Error during prediction: {}</div>"#,
                escape_html(message)
            ));
        }
        None => {}
    }

    html.push_str(
        r#"<hr><div class="footer">Developed with ❤️ using <b>Rust</b> and <b>Machine Learning</b></div>"#,
    );
    html.push_str("</body></html>");
    html
}

/// Field `i` goes to column `i % FORM_COLUMNS`
fn render_form(fields: &[FormField]) -> String {
    let mut columns = vec![String::new(); FORM_COLUMNS];

    for (i, field) in fields.iter().enumerate() {
        let name = escape_html(&field.name);
        columns[i % FORM_COLUMNS].push_str(&format!(
            r#"<label>{name}<input type="number" name="{name}" value="{value}" step="{step}"></label>"#,
            name = name,
            value = escape_html(&field.value),
            step = INPUT_STEP
        ));
    }

    let mut form = String::from(r#"<form method="post" action="/predict"><div class="columns">"#);
    for column in columns {
        form.push_str(&format!(r#"<div class="column">{}</div>"#, column));
    }
    form.push_str(r#"</div><button type="submit" class="primary">🔮 Predict Salt Level</button></form>"#);
    form
}

fn render_report(report: &SaltReport) -> String {
    let mut html = String::new();

    html.push_str(r#"<div class="result"><div class="summary">"#);
    html.push_str("<h3>🧾 Prediction Summary</h3>");
    html.push_str(&format!(r#"<div class="success"><b>{}</b></div>"#, escape_html(&report.headline)));

    if report.drinkable {
        html.push_str(&format!("<h3 style='color:green;'>✅ {}</h3>", report.verdict));
    } else {
        html.push_str(&format!("<h3 style='color:red;'>🚫 {}</h3>", report.verdict));
    }

    html.push_str("<h3>⚙️ Salt Level Indicator</h3>");
    html.push_str(&format!(
        r#"<progress value="{:.4}" max="1"></progress><div class="caption">{}</div>"#,
        report.progress,
        report.progress_caption
    ));
    html.push_str("</div>");

    html.push_str(r#"<div class="overview"><h3>📊 Feature Overview</h3>"#);
    html.push_str(&render_bar_chart(&report.chart));
    html.push_str("</div></div>");

    html.push_str(
        r#"<hr><div class="note"><b>Note:</b> This prediction is based on machine learning trained with physical &amp; chemical water properties.<br>
Ensure laboratory testing for accurate analysis.</div>"#,
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::InputRecord;

    fn layout() -> FeatureLayout {
        let names = ["ph", "Hardness", "Solids", "Chloramines", "Sulfate"];
        FeatureLayout::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn columns(html: &str) -> Vec<&str> {
        html.split(r#"<div class="column">"#).skip(1).collect()
    }

    #[test]
    fn test_fields_round_robin_over_three_columns() {
        let html = render_page(&FormField::defaults(&layout()), None);
        let cols = columns(&html);
        assert_eq!(cols.len(), 3);
        assert!(cols[0].contains(r#"name="ph""#) && cols[0].contains(r#"name="Chloramines""#));
        assert!(cols[1].contains(r#"name="Hardness""#) && cols[1].contains(r#"name="Sulfate""#));
        assert!(cols[2].contains(r#"name="Solids""#));
        assert_eq!(html.matches(r#"type="number""#).count(), 5);
        assert_eq!(html.matches(r#"value="0.00" step="0.01""#).count(), 5);
        assert!(!html.contains("Prediction Summary"));
    }

    #[test]
    fn test_echo_keeps_submitted_values() {
        let submitted = vec![("Hardness".to_string(), "204.89".to_string())];
        let fields = FormField::echo(&layout(), &submitted);
        assert_eq!(fields[1].value, "204.89");
        assert_eq!(fields[0].value, "0.00");
    }

    #[test]
    fn test_report_section() {
        let names = layout();
        let record = InputRecord::defaults(&names);
        let report = SaltReport::new(123.456, &record);
        let html = render_page(&FormField::defaults(&names), Some(&Outcome::Report(report)));

        assert!(html.contains("Predicted Salt Level: 123.46 mg/L"));
        assert!(html.contains("✅ Water is Drinkable"));
        assert!(html.contains("12.3% of unsafe limit"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_error_is_escaped() {
        let outcome = Outcome::Error("bad <input>".to_string());
        let html = render_page(&FormField::defaults(&layout()), Some(&outcome));
        assert!(html.contains("⚠️ Error during prediction: bad &lt;input&gt;"));
        // form is still there to try again
        assert!(html.contains("🔮 Predict Salt Level"));
    }
}
