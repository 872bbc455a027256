//! Submission Form Controller
//!
//! Owns the form fields, the in-flight flag, the current result and the
//! history. Front ends bind their inputs to it and call into it on submit.

use chrono::NaiveDate;

use super::client::SubmissionClient;
use super::error::{ClientError, SubmitError};
use super::types::{FormState, HealthData, SubmissionRequest, SubmissionResult};
use crate::display::{History, HistoryEntry};
use crate::wallet::WalletState;

/// Button label while idle
pub const SUBMIT_LABEL: &str = "Submit & Anchor On-Chain";

/// Button label while a request is in flight
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Shows a message to the user (browser alert, toast, stderr...)
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// State of one health submission form
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    fields: FormState,
    submitting: bool,
    result: Option<SubmissionResult>,
    history: History,
    /// Values captured when the in-flight request was built
    pending: Option<HealthData>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormState {
        &self.fields
    }

    pub fn set_weight(&mut self, value: impl Into<String>) {
        self.fields.weight = value.into();
    }

    pub fn set_blood_pressure(&mut self, value: impl Into<String>) {
        self.fields.blood_pressure = value.into();
    }

    pub fn set_steps(&mut self, value: impl Into<String>) {
        self.fields.steps = value.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Inputs are editable only while a wallet is connected
    pub fn inputs_enabled(&self, wallet: &WalletState) -> bool {
        wallet.is_connected()
    }

    pub fn can_submit(&self, wallet: &WalletState) -> bool {
        wallet.is_connected() && !self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Check preconditions and build the request.
    ///
    /// On success the form is marked as submitting and the previous result
    /// is cleared. On error nothing changes.
    pub fn begin_submit(&mut self, wallet: &WalletState) -> Result<SubmissionRequest, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        let address = match wallet.address() {
            Some(address) if wallet.is_connected() => address.to_string(),
            _ => return Err(SubmitError::WalletNotConnected),
        };

        let data = self.fields.validate()?;

        self.submitting = true;
        self.result = None;
        self.pending = Some(data.clone());

        Ok(SubmissionRequest {
            wallet_address: address,
            data,
        })
    }

    /// Record the outcome of the request started by [`begin_submit`].
    ///
    /// Clears the submitting flag whatever the outcome.
    ///
    /// [`begin_submit`]: SubmissionForm::begin_submit
    pub fn complete_submit(
        &mut self,
        outcome: Result<SubmissionResult, ClientError>,
        today: NaiveDate,
    ) -> Result<(), SubmitError> {
        self.submitting = false;
        let pending = self.pending.take();

        let result = outcome?;

        if let Some(data) = pending {
            self.history
                .push(HistoryEntry::new(data.weight, data.steps, today));
        }
        self.result = Some(result);

        Ok(())
    }

    /// Run one full submit: preconditions, a single request, bookkeeping.
    ///
    /// Every failure is logged and reported through `notifier`.
    pub async fn submit<C, N>(
        &mut self,
        wallet: &WalletState,
        client: &C,
        notifier: &N,
        today: NaiveDate,
    ) -> Result<(), SubmitError>
    where
        C: SubmissionClient + ?Sized,
        N: Notifier + ?Sized,
    {
        let request = match self.begin_submit(wallet) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Submission rejected: {}", e);
                notifier.alert(&e.user_message());
                return Err(e);
            }
        };

        let outcome = client.submit(&request).await;

        match self.complete_submit(outcome, today) {
            Ok(()) => {
                if let Some(result) = &self.result {
                    tracing::info!(tx_hash = %result.tx_hash, "Health data anchored");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error submitting health data: {}", e);
                notifier.alert(&e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HISTORY_CAPACITY;
    use crate::submission::error::{CONNECT_WALLET_MESSAGE, GENERIC_FAILURE_MESSAGE};
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    /// Client returning a canned outcome and counting calls
    struct StubClient {
        outcome: Result<SubmissionResult, ClientError>,
        calls: Cell<usize>,
        last_request: RefCell<Option<SubmissionRequest>>,
    }

    impl StubClient {
        fn ok() -> Self {
            Self::with(Ok(SubmissionResult {
                summary: "ok".to_string(),
                tx_hash: "0xabc".to_string(),
                explorer_url: "https://sepolia.basescan.org/tx/0xabc".to_string(),
            }))
        }

        fn failing(status: u16) -> Self {
            Self::with(Err(ClientError::Status { status }))
        }

        fn with(outcome: Result<SubmissionResult, ClientError>) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    #[async_trait(?Send)]
    impl SubmissionClient for StubClient {
        async fn submit(
            &self,
            request: &SubmissionRequest,
        ) -> Result<SubmissionResult, ClientError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn filled_form(steps: &str) -> SubmissionForm {
        let mut form = SubmissionForm::new();
        form.set_weight("65.5");
        form.set_blood_pressure("120/80");
        form.set_steps(steps);
        form
    }

    fn wallet() -> WalletState {
        WalletState::connected("0x0000000000000000000000000000000000000001")
    }

    #[tokio::test]
    async fn test_disconnected_wallet_sends_nothing() {
        let mut form = filled_form("8200");
        let client = StubClient::ok();
        let notifier = RecordingNotifier::default();

        let err = form
            .submit(&WalletState::disconnected(), &client, &notifier, today())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::WalletNotConnected);
        assert_eq!(client.calls.get(), 0);
        assert_eq!(*notifier.alerts.borrow(), vec![CONNECT_WALLET_MESSAGE]);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_input_sends_nothing() {
        let mut form = filled_form("lots");
        let client = StubClient::ok();
        let notifier = RecordingNotifier::default();

        let err = form.submit(&wallet(), &client, &notifier, today()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Input(_)));
        assert_eq!(client.calls.get(), 0);
        assert_eq!(notifier.alerts.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_success_sets_result_and_history() {
        let mut form = filled_form("8200");
        let client = StubClient::ok();
        let notifier = RecordingNotifier::default();

        form.submit(&wallet(), &client, &notifier, today()).await.unwrap();

        assert_eq!(client.calls.get(), 1);
        let sent = client.last_request.borrow().clone().unwrap();
        assert_eq!(sent.wallet_address, "0x0000000000000000000000000000000000000001");
        assert_eq!(sent.data.steps, 8200);

        assert_eq!(form.result().unwrap().tx_hash, "0xabc");
        assert_eq!(form.history().len(), 1);
        let entry = form.history().latest().unwrap();
        assert_eq!(entry.steps, 8200);
        assert_eq!(entry.weight, 65.5);
        assert_eq!(entry.date, today());
        assert!(notifier.alerts.borrow().is_empty());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_failure_leaves_result_unset() {
        let mut form = filled_form("8200");
        let notifier = RecordingNotifier::default();

        // A previous success must be cleared by the new attempt
        form.submit(&wallet(), &StubClient::ok(), &notifier, today())
            .await
            .unwrap();
        assert!(form.result().is_some());

        let err = form
            .submit(&wallet(), &StubClient::failing(500), &notifier, today())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::Client(ClientError::Status { status: 500 }));
        assert!(form.result().is_none());
        assert!(!form.is_submitting());
        assert_eq!(form.history().len(), 1);
        assert_eq!(*notifier.alerts.borrow(), vec![GENERIC_FAILURE_MESSAGE]);
    }

    #[tokio::test]
    async fn test_eight_submissions_keep_last_seven() {
        let mut form = SubmissionForm::new();
        let client = StubClient::ok();
        let notifier = RecordingNotifier::default();

        for i in 1..=8u64 {
            let before = form.history().len();
            form.set_weight(format!("{}", 60 + i));
            form.set_blood_pressure("120/80");
            form.set_steps((i * 1000).to_string());
            form.submit(&wallet(), &client, &notifier, today()).await.unwrap();
            assert_eq!(form.history().len(), (before + 1).min(HISTORY_CAPACITY));
        }

        let steps: Vec<u64> = form.history().iter().map(|e| e.steps).collect();
        assert_eq!(steps, vec![2000, 3000, 4000, 5000, 6000, 7000, 8000]);
    }

    #[test]
    fn test_begin_submit_marks_in_flight() {
        let mut form = filled_form("8200");
        assert_eq!(form.submit_label(), SUBMIT_LABEL);

        form.begin_submit(&wallet()).unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), SUBMITTING_LABEL);
        assert!(!form.can_submit(&wallet()));

        // Overlapping submit is refused
        assert_eq!(form.begin_submit(&wallet()), Err(SubmitError::InFlight));

        // History uses the values captured at submit time
        form.set_steps("1");
        form.complete_submit(
            Ok(SubmissionResult {
                summary: "ok".into(),
                tx_hash: "0x1".into(),
                explorer_url: "https://x".into(),
            }),
            today(),
        )
        .unwrap();
        assert_eq!(form.history().latest().unwrap().steps, 8200);
        assert!(form.can_submit(&wallet()));
    }

    #[test]
    fn test_inputs_follow_connection() {
        let form = SubmissionForm::new();
        assert!(!form.inputs_enabled(&WalletState::disconnected()));
        assert!(form.inputs_enabled(&wallet()));
        assert!(!form.can_submit(&WalletState::disconnected()));
    }
}
