//! Registry Service
//!
//! Validates inputs, enforces ownership, joins the record store against the
//! permission matrix, and applies mutations. Callers never touch the stores
//! directly.
//!
//! # Check order
//!
//! Mutations check, in order: existence, ownership, then metadata limits.
//! Creation has no record to look up and checks metadata only. The first
//! failing check returns; nothing is written before every check has passed.
//!
//! # Authorization model
//!
//! - Owner-only mutations compare the caller against the record's `owner`
//!   and fail with `OwnershipMismatch`.
//! - `fetch_details` admits the owner or any principal holding an explicit
//!   grant row; everyone else gets `AccessForbidden`.
//! - `analyze_access`, `lookup_owner` and `fetch_metrics` are open to all.
//!
//! Transfers never touch the permission matrix. A new owner is admitted by
//! owner equality alone, and a former owner keeps whatever grant row it had.

use crate::config::RegistryConfig;
use crate::facts::{FactJournal, RegistryFact};
use cairn_core::{
    validate_metadata, AccessAnalysis, BlockHeight, CallContext, ContentId, ContentMetadata,
    ContentRecord, PrincipalId, RegistryError, RegistryMetrics, Result,
};
use cairn_store::{
    GrantStore, MemoryGrantStore, MemoryRecordStore, RecordStore, RegistrySnapshot,
    SequenceCounter, SnapshotError,
};
use parking_lot::RwLock;
use tracing::{debug, info, instrument};

/// Everything behind the serialization boundary
#[derive(Debug)]
struct RegistryState<R, G> {
    records: R,
    grants: G,
    sequence: SequenceCounter,
    journal: FactJournal,
    /// Highest height seen on a mutation, for regression diagnostics only
    last_height: BlockHeight,
}

impl<R: RecordStore, G: GrantStore> RegistryState<R, G> {
    fn record(&self, content_id: ContentId) -> Result<&ContentRecord> {
        self.records
            .get(content_id)
            .ok_or_else(|| RegistryError::not_found(content_id))
    }

    /// Existing record owned by `caller`, ready for mutation
    fn owned_record_mut(
        &mut self,
        content_id: ContentId,
        caller: &PrincipalId,
    ) -> Result<&mut ContentRecord> {
        let record = self
            .records
            .get_mut(content_id)
            .ok_or_else(|| RegistryError::not_found(content_id))?;
        if !record.is_owned_by(caller) {
            return Err(RegistryError::ownership_mismatch(content_id));
        }
        Ok(record)
    }

    fn observe_height(&mut self, height: BlockHeight) {
        if height < self.last_height {
            debug!(
                %height,
                last_height = %self.last_height,
                "host height moved backwards"
            );
        } else {
            self.last_height = height;
        }
    }

    fn commit_fact(&mut self, fact: RegistryFact) {
        let (name, content_id, height) = (fact.name(), fact.content_id(), fact.height());
        let offset = self.journal.append(fact);
        debug!(offset, fact = name, %content_id, %height, "fact recorded");
    }
}

/// The registry service
///
/// Generic over its two stores; [`Registry::new`] uses the in-memory ones.
#[derive(Debug)]
pub struct Registry<R = MemoryRecordStore, G = MemoryGrantStore> {
    root_authority: PrincipalId,
    state: RwLock<RegistryState<R, G>>,
}

impl Registry {
    /// Create an empty in-memory registry
    pub fn new(config: &RegistryConfig) -> Self {
        Self::with_stores(
            config.registry.root_authority.clone(),
            MemoryRecordStore::new(),
            MemoryGrantStore::new(),
        )
    }

    /// Rebuild an in-memory registry from a snapshot
    pub fn from_snapshot(
        config: &RegistryConfig,
        snapshot: RegistrySnapshot,
    ) -> std::result::Result<Self, SnapshotError> {
        let mut records = MemoryRecordStore::new();
        let mut grants = MemoryGrantStore::new();
        let sequence = snapshot.restore_into(&mut records, &mut grants)?;
        info!(
            counter = sequence.current(),
            records = records.len(),
            grants = grants.len(),
            "registry restored from snapshot"
        );
        Ok(Self::from_parts(
            config.registry.root_authority.clone(),
            records,
            grants,
            sequence,
        ))
    }
}

impl<R: RecordStore, G: GrantStore> Registry<R, G> {
    /// Create a registry over caller-provided empty stores
    pub fn with_stores(root_authority: PrincipalId, records: R, grants: G) -> Self {
        Self::from_parts(root_authority, records, grants, SequenceCounter::new())
    }

    fn from_parts(
        root_authority: PrincipalId,
        records: R,
        grants: G,
        sequence: SequenceCounter,
    ) -> Self {
        Self {
            root_authority,
            state: RwLock::new(RegistryState {
                records,
                grants,
                sequence,
                journal: FactJournal::new(),
                last_height: BlockHeight::default(),
            }),
        }
    }

    /// Register new content owned by the caller.
    ///
    /// Assigns the next sequential identifier, stamps the call height and
    /// writes a self-grant for the caller, all under one lock.
    #[instrument(skip(self, ctx, metadata), fields(caller = %ctx.caller))]
    pub fn create_record(&self, ctx: &CallContext, metadata: ContentMetadata) -> Result<ContentId> {
        validate_metadata(&metadata).inspect_err(|err| reject("create", err))?;

        let mut state = self.state.write();
        let content_id = match state.sequence.allocate() {
            Some(content_id) => content_id,
            None => {
                let err = RegistryError::registry_full(state.sequence.current());
                reject("create", &err);
                return Err(err);
            }
        };
        state.observe_height(ctx.height);

        let record = ContentRecord::new(content_id, ctx.caller.clone(), ctx.height, metadata);
        state.records.insert(record);
        state.grants.grant(content_id, ctx.caller.clone());
        state.commit_fact(RegistryFact::Registered {
            content_id,
            owner: ctx.caller.clone(),
            height: ctx.height,
        });

        info!(%content_id, height = %ctx.height, "content registered");
        Ok(content_id)
    }

    /// Hand a record to a new owner. Only the current owner may do this.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn transfer_ownership(
        &self,
        ctx: &CallContext,
        content_id: ContentId,
        new_owner: PrincipalId,
    ) -> Result<()> {
        let mut state = self.state.write();
        let record = state
            .owned_record_mut(content_id, &ctx.caller)
            .inspect_err(|err| reject("transfer", err))?;

        let previous = std::mem::replace(&mut record.owner, new_owner.clone());
        state.observe_height(ctx.height);
        state.commit_fact(RegistryFact::OwnershipTransferred {
            content_id,
            from: previous,
            to: new_owner,
            height: ctx.height,
        });

        info!(%content_id, "ownership transferred");
        Ok(())
    }

    /// Replace a record's metadata. Only the current owner may do this.
    ///
    /// `id`, `owner` and `registered_at` are left alone.
    #[instrument(skip(self, ctx, metadata), fields(caller = %ctx.caller))]
    pub fn update_metadata(
        &self,
        ctx: &CallContext,
        content_id: ContentId,
        metadata: ContentMetadata,
    ) -> Result<()> {
        let mut state = self.state.write();
        let record = state
            .owned_record_mut(content_id, &ctx.caller)
            .inspect_err(|err| reject("update", err))?;
        validate_metadata(&metadata).inspect_err(|err| reject("update", err))?;

        record.metadata = metadata;
        state.observe_height(ctx.height);
        state.commit_fact(RegistryFact::MetadataUpdated {
            content_id,
            height: ctx.height,
        });

        debug!(%content_id, "metadata updated");
        Ok(())
    }

    /// Delete a record for good. Only the current owner may do this.
    ///
    /// Grant rows for the record are left in place; every read checks the
    /// record first, so they are unreachable.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn delete_record(&self, ctx: &CallContext, content_id: ContentId) -> Result<()> {
        let mut state = self.state.write();
        state
            .owned_record_mut(content_id, &ctx.caller)
            .inspect_err(|err| reject("delete", err))?;

        state.records.remove(content_id);
        state.observe_height(ctx.height);
        state.commit_fact(RegistryFact::Removed {
            content_id,
            height: ctx.height,
        });

        info!(%content_id, "content removed");
        Ok(())
    }

    /// Report how `target` relates to a record. Open to any caller.
    pub fn analyze_access(
        &self,
        content_id: ContentId,
        target: &PrincipalId,
    ) -> Result<AccessAnalysis> {
        let state = self.state.read();
        let record = state
            .record(content_id)
            .inspect_err(|err| reject("analyze", err))?;
        let analysis = AccessAnalysis::new(
            state.grants.has_grant(content_id, target),
            record.is_owned_by(target),
        );
        debug!(%content_id, %target, permitted = analysis.access_permitted, "access analyzed");
        Ok(analysis)
    }

    /// Current owner of a record. Open to any caller.
    pub fn lookup_owner(&self, content_id: ContentId) -> Result<PrincipalId> {
        let state = self.state.read();
        let record = state
            .record(content_id)
            .inspect_err(|err| reject("lookup", err))?;
        debug!(%content_id, owner = %record.owner, "owner looked up");
        Ok(record.owner.clone())
    }

    /// Full record, for the owner or an explicit grantee only.
    pub fn fetch_details(&self, ctx: &CallContext, content_id: ContentId) -> Result<ContentRecord> {
        let state = self.state.read();
        let record = state
            .record(content_id)
            .inspect_err(|err| reject("fetch", err))?;

        let permitted = state.grants.has_grant(content_id, &ctx.caller)
            || record.is_owned_by(&ctx.caller);
        if !permitted {
            let err = RegistryError::access_forbidden(content_id);
            reject("fetch", &err);
            return Err(err);
        }
        debug!(%content_id, caller = %ctx.caller, "details fetched");
        Ok(record.clone())
    }

    /// Sequence counter and root authority. Open to any caller.
    pub fn fetch_metrics(&self) -> RegistryMetrics {
        let state = self.state.read();
        RegistryMetrics {
            total_entries: state.sequence.current(),
            root_authority: self.root_authority.clone(),
        }
    }

    /// Facts committed at journal offsets `>= offset`
    pub fn facts_since(&self, offset: u64) -> Vec<RegistryFact> {
        self.state.read().journal.since(offset).to_vec()
    }

    /// Copy all persisted state out of the registry
    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.read();
        RegistrySnapshot::capture(state.sequence, &state.records, &state.grants)
    }
}

fn reject(operation: &'static str, err: &RegistryError) {
    debug!(operation, kind = %err.kind(), error = %err, "request rejected");
}
