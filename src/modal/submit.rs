use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;
use web_sys::FormData;

use crate::config;
use crate::modal::state::BookingModal;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not read form: {0}")]
    Form(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("submission rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn into_result(self) -> Result<(), SubmitError> {
        if self.success {
            Ok(())
        } else {
            Err(SubmitError::Rejected(self.message))
        }
    }
}

pub fn parse_response(body: &str) -> Result<(), SubmitError> {
    serde_json::from_str::<SubmitResponse>(body)
        .map_err(|e| SubmitError::Decode(e.to_string()))?
        .into_result()
}

/// Posts the booking form. There is no timeout; a request that never
/// settles leaves the caller waiting.
pub async fn send_booking(body: FormData) -> Result<(), SubmitError> {
    let response = Request::post(config::FORM_ENDPOINT)
        .body(body)
        .send()
        .await
        .map_err(|e| SubmitError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(SubmitError::Status(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| SubmitError::Decode(e.to_string()))?;
    parse_response(&text)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitButton {
    Idle,
    Sending,
}

impl SubmitButton {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitButton::Idle => config::SUBMIT_DEFAULT_LABEL,
            SubmitButton::Sending => config::SUBMIT_SENDING_LABEL,
        }
    }

    pub fn disabled(&self) -> bool {
        *self == SubmitButton::Sending
    }
}

/// One visible step of the submit workflow, applied to the page in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitEffect {
    Button(SubmitButton),
    Render,
    Alert(&'static str),
}

pub fn begin_submit() -> Vec<SubmitEffect> {
    vec![SubmitEffect::Button(SubmitButton::Sending)]
}

/// Applies a finished submission to the modal. The button is handed back
/// last, whatever the outcome.
pub fn finish_submit(modal: &mut BookingModal, result: &Result<(), SubmitError>) -> Vec<SubmitEffect> {
    let mut effects = vec![SubmitEffect::Render];
    match result {
        Ok(()) => {
            modal.submit_succeeded();
        }
        Err(_) => effects.push(SubmitEffect::Alert(config::SUBMIT_FALLBACK_MESSAGE)),
    }
    effects.push(SubmitEffect::Button(SubmitButton::Idle));
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::state::ModalState;

    fn open_modal() -> BookingModal {
        let mut modal = BookingModal::new();
        modal.open();
        modal
    }

    #[test]
    fn truthy_success_is_ok() {
        assert!(parse_response(r#"{"success": true, "message": "Email sent"}"#).is_ok());
    }

    #[test]
    fn falsy_or_missing_success_is_rejected() {
        let err = parse_response(r#"{"success": false, "message": "Invalid access key"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(Some(ref m)) if m == "Invalid access key"));
        assert!(matches!(parse_response("{}"), Err(SubmitError::Rejected(None))));
    }

    #[test]
    fn non_json_is_a_decode_error() {
        assert!(matches!(parse_response("<html>502</html>"), Err(SubmitError::Decode(_))));
    }

    fn alerts(effects: &[SubmitEffect]) -> usize {
        effects.iter().filter(|e| matches!(e, SubmitEffect::Alert(_))).count()
    }

    #[test]
    fn sending_disables_the_button_first() {
        assert_eq!(begin_submit(), vec![SubmitEffect::Button(SubmitButton::Sending)]);
    }

    #[test]
    fn success_moves_to_success_pane_without_alert() {
        let mut modal = open_modal();
        let effects = finish_submit(&mut modal, &Ok(()));
        assert_eq!(
            effects,
            vec![SubmitEffect::Render, SubmitEffect::Button(SubmitButton::Idle)]
        );
        assert_eq!(modal.state(), ModalState::OpenSuccess);
    }

    #[test]
    fn every_failure_raises_one_fallback_alert() {
        let failures = [
            SubmitError::Form("detached form".into()),
            SubmitError::Network("connection reset".into()),
            SubmitError::Status(500),
            SubmitError::Decode("expected value".into()),
            SubmitError::Rejected(None),
        ];
        for failure in failures {
            let mut modal = open_modal();
            let effects = finish_submit(&mut modal, &Err(failure));
            assert_eq!(alerts(&effects), 1);
            assert!(effects.contains(&SubmitEffect::Alert(config::SUBMIT_FALLBACK_MESSAGE)));
            assert_eq!(effects.last(), Some(&SubmitEffect::Button(SubmitButton::Idle)));
            assert_eq!(modal.state(), ModalState::OpenForm);
        }
    }

    #[test]
    fn button_is_restored_after_the_alert() {
        let mut modal = open_modal();
        let effects = finish_submit(&mut modal, &Err(SubmitError::Status(502)));
        let alert_at = effects.iter().position(|e| matches!(e, SubmitEffect::Alert(_))).unwrap();
        let idle_at = effects
            .iter()
            .position(|e| *e == SubmitEffect::Button(SubmitButton::Idle))
            .unwrap();
        assert!(alert_at < idle_at);
    }

    #[test]
    fn button_labels() {
        assert!(SubmitButton::Sending.disabled());
        assert!(!SubmitButton::Idle.disabled());
        assert!(SubmitButton::Sending.label().contains("Sending..."));
        assert!(SubmitButton::Idle.label().contains("Send Request"));
    }

    #[test]
    fn error_messages() {
        assert_eq!(SubmitError::Status(404).to_string(), "endpoint answered with status 404");
        assert_eq!(
            SubmitError::Rejected(None).to_string(),
            "submission rejected: no reason given"
        );
    }
}
