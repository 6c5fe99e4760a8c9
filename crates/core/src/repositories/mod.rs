//! The data access service.
//!
//! [`PharmacyService`] is the single entry point the console works through:
//! one method family per entity (patients, orders, medications), the
//! pharmacy profile, dashboard counts and the sync pass. It is the only
//! place validation and cross-entity rules are enforced; presentation code
//! never touches the record store directly.
//!
//! The service is built by explicit injection (a `RecordStore` opened by
//! the caller, plus optional connectivity/transport overrides) rather than
//! being looked up from any ambient context.

pub mod inventory;
pub mod orders;
pub mod patients;
mod shared;

use crate::config::CoreConfig;
use crate::error::{DataError, DataResult};
use crate::store::RecordStore;
use crate::sync::{
    push_unsynced, AssumeOnline, Connectivity, SimulatedTransport, SyncReport, SyncTransport,
};
use crate::validation::validate_profile;
use pharmacy_types::PharmacyProfile;
use shared::MonotonicClock;

/// Totals shown on the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub patients: usize,
    pub orders: usize,
    pub medications: usize,
    /// Patients and orders whose local changes have not been pushed yet
    /// (pending or error status).
    pub unsynced: usize,
}

/// Validating façade over the record store.
pub struct PharmacyService {
    pub(crate) store: RecordStore,
    pub(crate) clock: MonotonicClock,
    connectivity: Box<dyn Connectivity>,
    transport: Box<dyn SyncTransport>,
}

impl PharmacyService {
    /// Creates a service over an opened store.
    ///
    /// Sync uses the simulated transport with the configured per-record
    /// delay and assumes connectivity unless a probe is injected via
    /// [`with_connectivity`](Self::with_connectivity).
    pub fn new(store: RecordStore, config: &CoreConfig) -> Self {
        Self {
            store,
            clock: MonotonicClock::default(),
            connectivity: Box::new(AssumeOnline),
            transport: Box::new(SimulatedTransport::new(config.sync_delay())),
        }
    }

    /// Replaces the connectivity probe consulted before each sync pass.
    pub fn with_connectivity(mut self, connectivity: impl Connectivity + 'static) -> Self {
        self.connectivity = Box::new(connectivity);
        self
    }

    /// Replaces the per-record sync transport.
    pub fn with_transport(mut self, transport: impl SyncTransport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    // ========================================================================
    // Profile
    // ========================================================================

    /// The pharmacy's own details.
    pub fn get_profile(&self) -> PharmacyProfile {
        self.store.profile().get().clone()
    }

    /// Replaces the pharmacy's details after contact validation.
    pub fn update_profile(&mut self, profile: PharmacyProfile) -> DataResult<()> {
        validate_profile(&profile)?;
        self.store.profile_mut().set(profile)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Record totals for the dashboard tiles.
    pub fn dashboard_counts(&self) -> DashboardCounts {
        let unsynced = self
            .store
            .patients()
            .all()
            .iter()
            .filter(|p| p.sync_status.needs_push())
            .count()
            + self
                .store
                .orders()
                .all()
                .iter()
                .filter(|o| o.sync_status.needs_push())
                .count();

        DashboardCounts {
            patients: self.store.patients().len(),
            orders: self.store.orders().len(),
            medications: self.store.medications().len(),
            unsynced,
        }
    }

    // ========================================================================
    // Sync
    // ========================================================================

    /// Pushes every unsynced patient and order through the transport,
    /// serially, flipping each to `synced` or `error` independently.
    ///
    /// Failed rows from earlier passes are collected again, so an `error`
    /// status clears on the next successful pass without needing a local
    /// edit.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Offline`, with no record touched, when the
    /// connectivity probe reports offline. Store persistence failures
    /// propagate; transport failures do not.
    pub fn sync_records(&mut self) -> DataResult<SyncReport> {
        if !self.connectivity.is_online() {
            return Err(DataError::Offline);
        }

        let mut report = SyncReport::default();
        push_unsynced(self.store.patients_mut(), self.transport.as_mut(), &mut report)?;
        push_unsynced(self.store.orders_mut(), self.transport.as_mut(), &mut report)?;

        tracing::debug!(
            attempted = report.attempted,
            synced = report.synced,
            failed = report.failed,
            "sync pass finished"
        );

        Ok(report)
    }

    /// Count of patients and orders still awaiting a push.
    pub fn unsynced_count(&self) -> usize {
        self.dashboard_counts().unsynced
    }
}
