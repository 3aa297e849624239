//! Per-form submission state.
//!
//! A [`FormSession`] drives one form through
//! `Idle -> Validating -> Submitting -> Success | SubmitFailed`, or back to
//! `Idle` when validation fails. Only one submission may be in flight at a
//! time; the busy flag is held by a guard that is released on every exit path.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use shiptalk_core::{
    CandidateRecord, ExpertRecord, Field, FormMode, TransportPayload, serialize, validate,
    validate_field,
};
use tracing::{debug, warn};

use crate::error::{Error, SubmitError};

/// Sends a serialized form to the API.
pub trait Submitter: Send + Sync {
    /// Submit a payload. `mode` decides between create and update.
    fn submit(
        &self,
        mode: &FormMode,
        payload: TransportPayload,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Where a form session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Success,
    SubmitFailed,
}

/// Holds the busy flag for the duration of a submission.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One create or update form bound to a submitter.
pub struct FormSession<'a, S> {
    submitter: &'a S,
    mode: FormMode,
    initial: CandidateRecord,
    busy: AtomicBool,
    state: Mutex<FormState>,
}

impl<'a, S: Submitter> FormSession<'a, S> {
    /// A session for registering a new expert, starting from an empty draft.
    pub fn create(submitter: &'a S) -> Self {
        Self::with_mode(submitter, FormMode::Create, CandidateRecord::new())
    }

    /// A session for editing `record`, starting from a hydrated draft.
    pub fn update(submitter: &'a S, record: &ExpertRecord) -> Self {
        Self::with_mode(
            submitter,
            FormMode::Update(record.id.clone()),
            CandidateRecord::from_record(record),
        )
    }

    /// A session with an explicit mode and starting draft.
    pub fn with_mode(submitter: &'a S, mode: FormMode, initial: CandidateRecord) -> Self {
        Self {
            submitter,
            mode,
            initial,
            busy: AtomicBool::new(false),
            state: Mutex::new(FormState::Idle),
        }
    }

    /// The session's mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// A fresh copy of the starting draft.
    pub fn draft(&self) -> CandidateRecord {
        self.initial.clone()
    }

    /// Current state.
    pub fn state(&self) -> FormState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn set_state(&self, next: FormState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = *state;
        debug!(from = ?previous, to = ?next, "form state transition");
        *state = next;
    }

    /// Check one field after it changed.
    pub fn check_field(&self, field: Field, candidate: &CandidateRecord) -> Result<(), String> {
        validate_field(field, candidate, &self.mode)
    }

    /// Validate, serialize and send a draft.
    ///
    /// Returns [`SubmitError::Busy`] without doing anything if a submission
    /// from this session is still in flight.
    pub async fn submit(&self, candidate: &CandidateRecord) -> Result<(), SubmitError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            warn!("submission rejected: another submission is in flight");
            return Err(SubmitError::Busy);
        };

        self.set_state(FormState::Validating);
        let record = match validate(candidate, &self.mode) {
            Ok(record) => record,
            Err(errors) => {
                debug!(invalid_fields = errors.len(), "form failed validation");
                self.set_state(FormState::Invalid);
                self.set_state(FormState::Idle);
                return Err(SubmitError::Invalid(errors));
            }
        };

        let payload = serialize(&record, self.mode.existing_id());

        self.set_state(FormState::Submitting);
        match self.submitter.submit(&self.mode, payload).await {
            Ok(()) => {
                self.set_state(FormState::Success);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "form submission failed");
                self.set_state(FormState::SubmitFailed);
                Err(SubmitError::Operation(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use shiptalk_core::{ExpertId, ImageBlob, PartValue};
    use tokio::sync::Notify;

    /// Records submissions and optionally holds them until released.
    #[derive(Default)]
    struct MockSubmitter {
        calls: AtomicUsize,
        last: Mutex<Option<(FormMode, TransportPayload)>>,
        hold: bool,
        entered: Notify,
        release: Notify,
        fail_with: Option<String>,
    }

    impl Submitter for MockSubmitter {
        async fn submit(&self, mode: &FormMode, payload: TransportPayload) -> Result<(), Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((mode.clone(), payload));
            if self.hold {
                self.entered.notify_one();
                self.release.notified().await;
            }
            match &self.fail_with {
                Some(message) => Err(Error::Api {
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    fn valid_draft() -> CandidateRecord {
        let mut draft = CandidateRecord::new();
        draft.set(Field::Name, "Ada Lovelace");
        draft.set(Field::Phone, "1234567890");
        draft.set(Field::Linkedin, "https://www.linkedin.com/in/ada");
        draft.set(Field::Email, "ada@example.com");
        draft.set(Field::Company, "Analytical Engines");
        draft.set(Field::Designation, "Navigator");
        draft.set(Field::YearsInIndustry, "12");
        draft.set_picture_file(ImageBlob::new("ada.png", "image/png", vec![1, 2, 3]));
        draft
    }

    fn stored_record() -> ExpertRecord {
        serde_json::from_value(serde_json::json!({
            "id": "42",
            "name": "Ada Lovelace",
            "phone": "1234567890",
            "linkedin": "https://www.linkedin.com/in/ada",
            "email": "ada@example.com",
            "company": "Analytical Engines",
            "designation": "Navigator",
            "years_in_industry": 12,
            "profile_picture": "/uploads/ada.png"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn successful_create() {
        let submitter = MockSubmitter::default();
        let session = FormSession::create(&submitter);
        assert_eq!(session.state(), FormState::Idle);

        session.submit(&valid_draft()).await.unwrap();

        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state(), FormState::Success);
        assert!(!session.is_busy());

        let (mode, payload) = submitter.last.lock().unwrap().take().unwrap();
        assert_eq!(mode, FormMode::Create);
        assert!(!payload.contains("id"));
        assert!(matches!(
            payload.get("profile_picture"),
            Some(PartValue::File(_))
        ));
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_submitter() {
        let submitter = MockSubmitter::default();
        let session = FormSession::create(&submitter);

        let err = session.submit(&session.draft()).await.unwrap_err();

        assert_eq!(err.field_errors().map(|e| e.len()), Some(Field::ALL.len()));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), FormState::Idle);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn failed_submission_releases_busy_flag() {
        let submitter = MockSubmitter {
            fail_with: Some("Email already registered".into()),
            ..MockSubmitter::default()
        };
        let session = FormSession::create(&submitter);

        let err = session.submit(&valid_draft()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Operation(Error::Api { .. })));
        assert_eq!(session.state(), FormState::SubmitFailed);
        assert!(!session.is_busy());

        // The form stays usable for a retry.
        let err = session.submit(&valid_draft()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Operation(_)));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn resubmission_while_in_flight_is_rejected() {
        let submitter = MockSubmitter {
            hold: true,
            ..MockSubmitter::default()
        };
        let session = FormSession::create(&submitter);
        let draft = valid_draft();

        let first = session.submit(&draft);
        let second = async {
            submitter.entered.notified().await;
            assert!(session.is_busy());
            assert_eq!(session.state(), FormState::Submitting);
            let result = session.submit(&draft).await;
            submitter.release.notify_one();
            result
        };
        let (first, second) = tokio::join!(first, second);

        first.unwrap();
        assert!(matches!(second, Err(SubmitError::Busy)));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn dropped_submission_releases_busy_flag() {
        let submitter = MockSubmitter {
            hold: true,
            ..MockSubmitter::default()
        };
        let session = FormSession::create(&submitter);
        let draft = valid_draft();

        {
            let pending = session.submit(&draft);
            let abandoned =
                tokio::time::timeout(std::time::Duration::from_millis(20), pending).await;
            assert!(abandoned.is_err());
        }
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn update_keeps_existing_picture_and_sends_id() {
        let submitter = MockSubmitter::default();
        let record = stored_record();
        let session = FormSession::update(&submitter, &record);

        let mut draft = session.draft();
        draft.set(Field::Designation, "Captain");
        session.submit(&draft).await.unwrap();

        let (mode, payload) = submitter.last.lock().unwrap().take().unwrap();
        assert_eq!(mode, FormMode::Update(ExpertId::new("42")));
        assert_eq!(payload.get("id").and_then(PartValue::as_text), Some("42"));
        assert_eq!(
            payload.get("designation").and_then(PartValue::as_text),
            Some("Captain")
        );
        assert_eq!(
            payload.get("profile_picture").and_then(PartValue::as_text),
            Some("/uploads/ada.png")
        );
    }

    #[tokio::test]
    async fn update_without_picture_omits_part() {
        let submitter = MockSubmitter::default();
        let mut record = stored_record();
        record.profile_picture = None;
        let session = FormSession::update(&submitter, &record);

        session.submit(&session.draft()).await.unwrap();

        let (_, payload) = submitter.last.lock().unwrap().take().unwrap();
        assert!(!payload.contains("profile_picture"));
        assert!(payload.contains("id"));
    }

    #[test]
    fn check_field_uses_session_mode() {
        let submitter = MockSubmitter::default();
        let create = FormSession::create(&submitter);
        let record = stored_record();
        let update = FormSession::update(&submitter, &record);

        let draft = CandidateRecord::new();
        assert_eq!(
            create.check_field(Field::ProfilePicture, &draft),
            Err("Profile picture is required".to_owned())
        );
        assert_eq!(update.check_field(Field::ProfilePicture, &draft), Ok(()));
    }
}
