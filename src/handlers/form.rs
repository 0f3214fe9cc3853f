//! Prediction page handlers
//!
//! Errors never leave this module as HTTP errors: a failed prediction is
//! rendered inline and the form stays usable.

use axum::{extract::State, response::Html, Form};

use crate::AppState;
use crate::logic::features::InputRecord;
use crate::logic::model::{InferenceError, SaltReport};
use crate::views::{render_page, FormField, Outcome};

/// Empty form
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let fields = FormField::defaults(state.predictor.layout());
    Html(render_page(&fields, None))
}

/// Form submission
pub async fn submit(
    State(state): State<AppState>,
    Form(submitted): Form<Vec<(String, String)>>,
) -> Html<String> {
    let layout = state.predictor.layout();
    let fields = FormField::echo(layout, &submitted);

    let outcome = match run(&state, &submitted) {
        Ok(report) => Outcome::Report(report),
        Err(e) => Outcome::Error(e.to_string()),
    };

    Html(render_page(&fields, Some(&outcome)))
}

fn run(state: &AppState, submitted: &[(String, String)]) -> Result<SaltReport, InferenceError> {
    let record = InputRecord::from_form(state.predictor.layout(), submitted)?;
    let prediction = state.predictor.predict(&record)?;
    Ok(SaltReport::new(prediction, &record))
}
