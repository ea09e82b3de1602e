// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Single collaborator the view layer talks to. Keeps the local cache and
//! the remote store in sync opportunistically: every mutation lands in the
//! cache first, and remote failures degrade to `Availability::Local`
//! instead of surfacing as errors. Only local persistence failures
//! propagate.
//!
//! A write made while the remote store is unreachable is not queued or
//! retried; it lives in the cache only until the user repeats the action
//! with connectivity back. The next successful fetch replaces the cache
//! with the server's list wholesale.

use anyhow::Result;
use rusqlite::Connection;
use tracing::warn;

use crate::cache;
use crate::models::Record;
use crate::remote::RemoteStore;

/// Whether the last remote attempt in an operation succeeded. Returned
/// alongside each result rather than kept as shared process state, so a
/// reader can never observe a stale flag from an unrelated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Remote,
    Local,
}

impl Availability {
    pub fn is_remote(self) -> bool {
        matches!(self, Availability::Remote)
    }
}

pub struct SyncStore<'a, R: RemoteStore> {
    cache: &'a Connection,
    remote: R,
}

impl<'a, R: RemoteStore> SyncStore<'a, R> {
    pub fn new(cache: &'a Connection, remote: R) -> Self {
        SyncStore { cache, remote }
    }

    /// Read the full list from the remote store. On success the cache is
    /// overwritten with exactly the fetched list; on any failure the last
    /// cached list is returned unmodified. An empty remote list and a
    /// fallback from an empty cache are indistinguishable to the caller.
    pub fn fetch_all(&self) -> Result<(Vec<Record>, Availability)> {
        match self.remote.list() {
            Ok(records) => {
                cache::store_records(self.cache, &records)?;
                Ok((records, Availability::Remote))
            }
            Err(e) => {
                warn!("remote list failed, falling back to cache: {e}");
                Ok((cache::load_records(self.cache)?, Availability::Local))
            }
        }
    }

    /// Replace the cached entry with a matching id in place, or prepend if
    /// absent, then attempt the remote write. The caller always observes a
    /// successful save; a failed remote write only downgrades availability.
    pub fn upsert(&self, record: &Record) -> Result<Availability> {
        let mut records = cache::load_records(self.cache)?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record.clone(),
            None => records.insert(0, record.clone()),
        }
        cache::store_records(self.cache, &records)?;

        match self.remote.upsert(record) {
            Ok(()) => Ok(Availability::Remote),
            Err(e) => {
                warn!("remote save failed, record kept locally only: {e}");
                Ok(Availability::Local)
            }
        }
    }

    /// Remove the id from the cache unconditionally, then attempt the same
    /// delete remotely; a remote failure is logged, never surfaced.
    pub fn delete(&self, id: &str) -> Result<Availability> {
        let mut records = cache::load_records(self.cache)?;
        records.retain(|r| r.id != id);
        cache::store_records(self.cache, &records)?;

        match self.remote.delete(id) {
            Ok(()) => Ok(Availability::Remote),
            Err(e) => {
                warn!("remote delete failed, record removed locally only: {e}");
                Ok(Availability::Local)
            }
        }
    }
}
