//! Webhook handlers
//!
//! Turn provider form posts into caller input, advance the call flow and
//! answer with the rendered document. Missing or unparseable form bodies are
//! treated as absent input so the caller always gets a document back.

use axum::{
    extract::{rejection::FormRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ivr_core::flow::{self, CallStep, CallerInput};

use crate::error::Result;
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Form fields posted with a finished recording
#[derive(Debug, Default, Deserialize)]
pub struct RecordingForm {
    #[serde(rename = "CallSid", default)]
    pub call_sid: Option<String>,
    /// URL of the captured audio; empty when nothing was recorded
    #[serde(rename = "RecordingUrl", default)]
    pub recording_url: Option<String>,
}

/// Form fields posted after a gather
#[derive(Debug, Default, Deserialize)]
pub struct GatherForm {
    #[serde(rename = "CallSid", default)]
    pub call_sid: Option<String>,
    /// Keys pressed by the caller; empty when the gather timed out
    #[serde(rename = "Digits", default)]
    pub digits: Option<String>,
}

/// Form fields common to every webhook
#[derive(Debug, Default, Deserialize)]
pub struct CallForm {
    #[serde(rename = "CallSid", default)]
    pub call_sid: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub production: bool,
}

/// Voice response body served as `text/xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Twiml(pub String);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.0).into_response()
    }
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        production: state.config.app_env.is_production(),
    })
}

/// Inbound call: long greeting, then record
pub async fn voice(form: std::result::Result<Form<CallForm>, FormRejection>) -> Result<Twiml> {
    let form = form_or_default(form, CallStep::Greeting);
    respond(CallStep::Greeting, form.call_sid.as_deref(), &CallerInput::Nothing)
}

/// Repeat: short greeting, then record
pub async fn voice_repeat(
    form: std::result::Result<Form<CallForm>, FormRejection>,
) -> Result<Twiml> {
    let form = form_or_default(form, CallStep::RepeatGreeting);
    respond(CallStep::RepeatGreeting, form.call_sid.as_deref(), &CallerInput::Nothing)
}

/// Recording finished: play it back or start over
pub async fn record(
    form: std::result::Result<Form<RecordingForm>, FormRejection>,
) -> Result<Twiml> {
    let form = form_or_default(form, CallStep::AwaitingRecording);
    let input = CallerInput::Recording(form.recording_url);
    respond(CallStep::AwaitingRecording, form.call_sid.as_deref(), &input)
}

/// Caller's choice after playback: record again or hang up
pub async fn playback(
    form: std::result::Result<Form<GatherForm>, FormRejection>,
) -> Result<Twiml> {
    let form = form_or_default(form, CallStep::PostPlayback);
    let input = CallerInput::Keypress(form.digits);
    respond(CallStep::PostPlayback, form.call_sid.as_deref(), &input)
}

fn form_or_default<T: Default>(
    form: std::result::Result<Form<T>, FormRejection>,
    step: CallStep,
) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(step = %step, "Unreadable webhook form, treating input as absent: {}", rejection);
            T::default()
        }
    }
}

fn respond(step: CallStep, call_sid: Option<&str>, input: &CallerInput) -> Result<Twiml> {
    let transition = flow::advance(step, input);
    info!(
        call_sid = call_sid.unwrap_or("-"),
        step = %step,
        next = %transition.next,
        "Webhook handled"
    );
    Ok(Twiml(transition.response.to_xml()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_renders_engine_document() {
        let Twiml(body) = respond(CallStep::PostPlayback, None, &CallerInput::Keypress(Some("1".into()))).unwrap();
        assert_eq!(body, flow::on_playback_choice(Some("1")).to_xml().unwrap());
    }

    #[tokio::test]
    async fn test_record_without_form_asks_again() {
        let Twiml(body) = record(Ok(Form(RecordingForm::default()))).await.unwrap();
        assert!(body.contains("<Redirect>/voice/repeat</Redirect>"));
    }

    #[tokio::test]
    async fn test_playback_digit_from_form() {
        let form = GatherForm {
            call_sid: Some("CA123".to_string()),
            digits: Some("2".to_string()),
        };
        let Twiml(body) = playback(Ok(Form(form))).await.unwrap();
        assert_eq!(body, flow::goodbye().to_xml().unwrap());
    }

    #[test]
    fn test_twiml_content_type() {
        let response = Twiml("<Response/>".to_string()).into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/xml"
        );
    }
}
