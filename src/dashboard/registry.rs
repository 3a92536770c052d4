//! In-memory application registry
//!
//! Local mirror of the applications the service holds for this account.
//! It is only ever changed after the service confirmed the change.

use log::debug;

use crate::client::models::{AppId, Application};

/// Ticket for one in-flight load. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Ordered collection of applications.
///
/// `None` until the first load succeeds. Ids are unique; order is the
/// server's listing order, with local creations appended.
#[derive(Debug, Default)]
pub struct ApplicationRegistry {
    apps: Option<Vec<Application>>,
    issued: u64,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Whether `ticket` belongs to the most recently started load.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Replace the whole collection with a listing, if `ticket` is current.
    ///
    /// Returns `false` and leaves the collection alone for a stale ticket.
    pub fn finish_load(&mut self, ticket: LoadTicket, apps: Vec<Application>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Dropping stale application listing (request {}, latest {})",
                ticket.0, self.issued
            );
            return false;
        }

        let mut deduped: Vec<Application> = Vec::with_capacity(apps.len());
        for app in apps {
            upsert(&mut deduped, app);
        }
        self.apps = Some(deduped);
        true
    }

    /// Append a newly created application.
    ///
    /// An entry that already carries the id is replaced in place instead, so
    /// ids stay unique.
    pub fn apply_create(&mut self, app: Application) {
        upsert(self.apps.get_or_insert_with(Vec::new), app);
    }

    /// Replace the entry with the same id.
    ///
    /// An id that is not present is ignored. The collection may be behind the
    /// server (another client created it), or the server may have answered
    /// for the wrong id; which of those a miss means is still an open product
    /// question, so the miss is logged rather than acted on.
    pub fn apply_update(&mut self, app: Application) {
        let slot = self
            .apps
            .as_mut()
            .and_then(|apps| apps.iter_mut().find(|a| a.id == app.id));

        match slot {
            Some(existing) => *existing = app,
            None => debug!("Update for unknown application {} ignored", app.id),
        }
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn apply_delete(&mut self, id: &AppId) -> bool {
        let Some(apps) = self.apps.as_mut() else {
            return false;
        };
        let before = apps.len();
        apps.retain(|a| &a.id != id);
        apps.len() != before
    }

    /// Current collection, `None` if never loaded.
    pub fn apps(&self) -> Option<&[Application]> {
        self.apps.as_deref()
    }

    pub fn get(&self, id: &AppId) -> Option<&Application> {
        self.apps.as_ref()?.iter().find(|a| &a.id == id)
    }

    #[allow(dead_code)]
    pub fn is_loaded(&self) -> bool {
        self.apps.is_some()
    }

    pub fn len(&self) -> usize {
        self.apps.as_ref().map_or(0, Vec::len)
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn upsert(apps: &mut Vec<Application>, app: Application) {
    match apps.iter_mut().find(|a| a.id == app.id) {
        Some(existing) => *existing = app,
        None => apps.push(app),
    }
}
