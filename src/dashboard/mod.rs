//! Application dashboard controller
//!
//! [`Dashboard`] owns the local application registry and drives the
//! create/edit form through `Idle → ModalOpen → Submitting`. Every change to
//! the registry goes through the service first; the local copy is updated
//! only once the service confirmed it. Outcomes are reported through the
//! single-slot [`Notifier`].

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::Mutex;

pub mod clipboard;
pub mod notify;
pub mod registry;

pub use clipboard::{Clipboard, SystemClipboard, login_url};
pub use notify::{CopiedMarks, Notification, Notifier};
pub use registry::ApplicationRegistry;

use crate::client::RegistryApi;
use crate::client::models::{AppId, Application};
use crate::error::{ApiError, Error, Result, ValidationError};
use crate::session::{Credential, Session};
use crate::validation::validate_app_fields;

/// Default bound on a create/update round trip
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

pub const MSG_CREATED: &str = "Application created successfully";
pub const MSG_UPDATED: &str = "Application updated successfully";
pub const MSG_DELETED: &str = "Application deleted successfully";
pub const MSG_COPIED: &str = "URL copied to clipboard";
pub const MSG_CREATE_FAILED: &str = "Failed to create application";
pub const MSG_UPDATE_FAILED: &str = "Failed to update application";
pub const MSG_DELETE_FAILED: &str = "Failed to delete application";
pub const MSG_LOAD_FAILED: &str = "Failed to load applications";
pub const MSG_COPY_FAILED: &str = "Failed to copy URL";

/// In-progress form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub callback_url: String,
}

impl From<&Application> for FormDraft {
    fn from(app: &Application) -> Self {
        Self {
            name: app.name.clone(),
            callback_url: app.callback_url.clone(),
        }
    }
}

/// What the open form will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    /// Edit the application as it was when the form opened
    Edit(Application),
}

impl ModalMode {
    fn success_message(&self) -> &'static str {
        match self {
            ModalMode::Create => MSG_CREATED,
            ModalMode::Edit(_) => MSG_UPDATED,
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            ModalMode::Create => MSG_CREATE_FAILED,
            ModalMode::Edit(_) => MSG_UPDATE_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ModalOpen(ModalMode),
    Submitting(ModalMode),
}

/// Where a dismiss gesture landed
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTarget {
    /// The area outside the form
    Backdrop,
    /// The form's cancel or close control
    CancelButton,
    /// Anywhere inside the form content
    ModalBody,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The service accepted the change and the registry reflects it
    Saved(Application),
    /// Local validation failed; nothing was sent
    Rejected(ValidationError),
    /// The service call failed; the form stays open
    Failed(Error),
    /// No form was open, or a submission is already in flight
    Ignored,
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// The listing replaced the registry; carries the new size
    Applied(usize),
    /// A newer load was issued while this one was in flight
    Stale,
    /// The service rejected the credential, or there was none
    SessionExpired,
    Failed(Error),
}

/// Reaction to an invalid session
pub trait Navigator: Send + Sync {
    /// Send the user back to the sign-in entry point.
    fn redirect_to_login(&self);
}

/// Navigator that only logs; used when the host has nowhere to go.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect_to_login(&self) {
        warn!("Session is no longer valid; sign in again");
    }
}

struct ViewState {
    phase: Phase,
    draft: Option<FormDraft>,
    registry: ApplicationRegistry,
}

/// Application dashboard controller.
///
/// Shared by `&self`. The view state lock is never held across a service
/// call, so the rest of the dashboard stays usable while a submission is in
/// flight.
pub struct Dashboard<C> {
    client: Arc<C>,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
    clipboard: Arc<dyn Clipboard>,
    notifier: Notifier,
    copied: CopiedMarks,
    state: Mutex<ViewState>,
    origin: String,
    submit_timeout: Duration,
}

impl<C: RegistryApi> Dashboard<C> {
    pub fn new(client: Arc<C>, session: Arc<Session>) -> Self {
        Self {
            client,
            session,
            navigator: Arc::new(LogNavigator),
            clipboard: Arc::new(SystemClipboard::default()),
            notifier: Notifier::new(),
            copied: CopiedMarks::new(),
            state: Mutex::new(ViewState {
                phase: Phase::Idle,
                draft: None,
                registry: ApplicationRegistry::new(),
            }),
            origin: crate::client::DEFAULT_BASE_URL.to_string(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Origin used to build login URLs
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    // ========================================================================
    // Session
    // ========================================================================

    async fn require_credential(&self) -> Result<Credential> {
        match self.session.credential().await {
            Some(credential) => Ok(credential),
            None => {
                self.navigator.redirect_to_login();
                Err(ApiError::Unauthorized { message: None }.into())
            }
        }
    }

    /// Drop the rejected credential and redirect, once per credential.
    async fn expire_session(&self) {
        if self.session.sign_out().await {
            warn!("Service rejected the session credential");
            self.navigator.redirect_to_login();
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Fetch the full listing and replace the registry with it.
    ///
    /// Loads may overlap; only the most recently started one is applied.
    pub async fn load(&self) -> LoadOutcome {
        let credential = match self.require_credential().await {
            Ok(credential) => credential,
            Err(_) => return LoadOutcome::SessionExpired,
        };

        let ticket = self.state.lock().await.registry.begin_load();
        let result = self.client.list_applications(&credential).await;

        match result {
            Ok(apps) => {
                let mut state = self.state.lock().await;
                if state.registry.finish_load(ticket, apps) {
                    debug!("Loaded {} applications", state.registry.len());
                    LoadOutcome::Applied(state.registry.len())
                } else {
                    LoadOutcome::Stale
                }
            }
            Err(err) if err.is_unauthorized() => {
                self.expire_session().await;
                LoadOutcome::SessionExpired
            }
            Err(err) => {
                if !self.state.lock().await.registry.is_current(ticket) {
                    debug!("Ignoring failure of superseded load: {}", err);
                    return LoadOutcome::Stale;
                }
                warn!("Failed to load applications: {}", err);
                self.notifier.error(MSG_LOAD_FAILED).await;
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Explicit refresh signal; same as [`load`](Self::load).
    #[allow(dead_code)]
    pub async fn refresh(&self) -> LoadOutcome {
        self.load().await
    }

    // ========================================================================
    // Form lifecycle
    // ========================================================================

    /// Open an empty form for a new application.
    pub async fn open_create(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        ensure_idle(&state.phase)?;
        state.phase = Phase::ModalOpen(ModalMode::Create);
        state.draft = Some(FormDraft::default());
        Ok(())
    }

    /// Open the form seeded with the current fields of application `id`.
    pub async fn open_edit(&self, id: &AppId) -> Result<()> {
        let mut state = self.state.lock().await;
        ensure_idle(&state.phase)?;

        let target = state.registry.get(id).cloned().ok_or_else(|| {
            ValidationError::InvalidInput(format!("No application with id {}", id))
        })?;

        state.draft = Some(FormDraft::from(&target));
        state.phase = Phase::ModalOpen(ModalMode::Edit(target));
        Ok(())
    }

    /// Change the draft while the form is open.
    pub async fn update_draft(&self, edit: impl FnOnce(&mut FormDraft)) -> Result<()> {
        let mut state = self.state.lock().await;
        if !matches!(state.phase, Phase::ModalOpen(_)) {
            return Err(ValidationError::InvalidInput("No form is open".to_string()).into());
        }
        edit(state.draft.get_or_insert_with(FormDraft::default));
        Ok(())
    }

    /// Close the form and discard the draft.
    ///
    /// Clicks inside the form content do not close it, and nothing closes it
    /// while a submission is in flight. Returns whether the form closed.
    #[allow(dead_code)]
    pub async fn dismiss(&self, target: DismissTarget) -> bool {
        if target == DismissTarget::ModalBody {
            return false;
        }

        let mut state = self.state.lock().await;
        match state.phase {
            Phase::ModalOpen(_) => {
                state.phase = Phase::Idle;
                state.draft = None;
                true
            }
            Phase::Idle | Phase::Submitting(_) => false,
        }
    }

    /// Submit the open form.
    ///
    /// At most one submission runs at a time: a submit while one is in
    /// flight, or with no form open, is ignored without a service call.
    pub async fn submit(&self) -> SubmitOutcome {
        let (mode, draft) = {
            let mut state = self.state.lock().await;
            let mode = match &state.phase {
                Phase::ModalOpen(mode) => mode.clone(),
                Phase::Idle | Phase::Submitting(_) => return SubmitOutcome::Ignored,
            };
            let draft = state.draft.clone().unwrap_or_default();

            if let Err(invalid) = validate_app_fields(&draft.name, &draft.callback_url) {
                drop(state);
                self.notifier.error(invalid.to_string()).await;
                return SubmitOutcome::Rejected(invalid);
            }

            state.phase = Phase::Submitting(mode.clone());
            (mode, draft)
        };

        let result = match self.require_credential().await {
            Ok(credential) => self.send_draft(&credential, &mode, &draft).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(app) => {
                {
                    let mut state = self.state.lock().await;
                    match &mode {
                        ModalMode::Create => state.registry.apply_create(app.clone()),
                        ModalMode::Edit(_) => state.registry.apply_update(app.clone()),
                    }
                    state.phase = Phase::Idle;
                    state.draft = None;
                }
                self.notifier.success(mode.success_message()).await;
                SubmitOutcome::Saved(app)
            }
            Err(err) => {
                self.state.lock().await.phase = Phase::ModalOpen(mode.clone());
                warn!("{}: {}", mode.failure_message(), err);

                if err.is_unauthorized() {
                    self.expire_session().await;
                }
                let message = err
                    .server_message()
                    .unwrap_or(mode.failure_message())
                    .to_string();
                self.notifier.error(message).await;
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn send_draft(
        &self,
        credential: &Credential,
        mode: &ModalMode,
        draft: &FormDraft,
    ) -> Result<Application> {
        let call = async {
            match mode {
                ModalMode::Create => {
                    self.client
                        .create_application(credential, &draft.name, &draft.callback_url)
                        .await
                }
                ModalMode::Edit(target) => {
                    self.client
                        .update_application(
                            credential,
                            &target.id,
                            &draft.name,
                            &draft.callback_url,
                        )
                        .await
                }
            }
        };

        match tokio::time::timeout(self.submit_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Network("Request timed out".to_string()).into()),
        }
    }

    // ========================================================================
    // Row actions
    // ========================================================================

    /// Delete application `id`; the registry changes only after the service
    /// confirmed the deletion.
    pub async fn delete(&self, id: &AppId) -> Result<()> {
        ensure_idle(&self.state.lock().await.phase)?;
        let credential = self.require_credential().await?;

        match self.client.delete_application(&credential, id).await {
            Ok(()) => {
                if !self.state.lock().await.registry.apply_delete(id) {
                    debug!("Deleted application {} was not in the local registry", id);
                }
                self.notifier.success(MSG_DELETED).await;
                Ok(())
            }
            Err(err) => {
                warn!("Failed to delete application {}: {}", id, err);
                if err.is_unauthorized() {
                    self.expire_session().await;
                }
                self.notifier.error(MSG_DELETE_FAILED).await;
                Err(err)
            }
        }
    }

    /// Copy the login URL of application `id` to the clipboard.
    pub async fn copy_login_url(&self, id: &AppId) -> Result<String> {
        let url = login_url(&self.origin, id);

        match self.clipboard.write_text(&url) {
            Ok(()) => {
                self.copied.mark(id).await;
                self.notifier.success(MSG_COPIED).await;
                Ok(url)
            }
            Err(err) => {
                warn!("Failed to copy login URL: {}", err);
                self.notifier.error(MSG_COPY_FAILED).await;
                Err(err)
            }
        }
    }

    // ========================================================================
    // Readers
    // ========================================================================

    #[allow(dead_code)]
    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase.clone()
    }

    #[allow(dead_code)]
    pub async fn is_submitting(&self) -> bool {
        matches!(self.state.lock().await.phase, Phase::Submitting(_))
    }

    #[allow(dead_code)]
    pub async fn draft(&self) -> Option<FormDraft> {
        self.state.lock().await.draft.clone()
    }

    /// Snapshot of the registry, `None` if it was never loaded.
    pub async fn apps(&self) -> Option<Vec<Application>> {
        self.state.lock().await.registry.apps().map(<[Application]>::to_vec)
    }

    pub async fn notification(&self) -> Option<Notification> {
        self.notifier.current().await
    }

    #[allow(dead_code)]
    pub async fn is_copied(&self, id: &AppId) -> bool {
        self.copied.is_marked(id).await
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

fn ensure_idle(phase: &Phase) -> Result<()> {
    match phase {
        Phase::Idle => Ok(()),
        Phase::ModalOpen(_) | Phase::Submitting(_) => {
            Err(ValidationError::InvalidInput("Another form is already open".to_string()).into())
        }
    }
}
