//! Health Data Submission
//!
//! ## Flow
//!
//! 1. The user edits the three form fields
//! 2. On submit the wallet connection is checked and the fields validated
//! 3. One request goes to the submission API
//! 4. A success stores the result and extends the history; a failure
//!    only raises an alert
//!
//! The `submitting` flag is cleared on every path so the submit button
//! never stays disabled.

mod client;
mod error;
mod form;
mod types;

pub use client::{submit_url, SubmissionClient, SUBMIT_PATH};
#[cfg(feature = "native")]
pub use client::HttpSubmissionClient;
pub use error::{
    ClientError, InputError, SubmitError, CONNECT_WALLET_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use form::{Notifier, SubmissionForm, SUBMITTING_LABEL, SUBMIT_LABEL};
pub use types::{FormState, HealthData, SubmissionRequest, SubmissionResult};
