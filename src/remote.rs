// Copyright (c) 2025 Spendwise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! REST client for the record store. The trait is the seam the sync facade
//! is generic over; tests script outcomes through it without a network.

use anyhow::Result;
use thiserror::Error;

use crate::models::Record;
use crate::utils;

pub use reqwest::StatusCode;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(StatusCode),
}

pub trait RemoteStore {
    fn list(&self) -> Result<Vec<Record>, RemoteError>;
    fn upsert(&self, record: &Record) -> Result<(), RemoteError>;
    fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

pub struct HttpRemote {
    client: reqwest::blocking::Client,
    base: String,
}

impl HttpRemote {
    pub fn from_env() -> Result<Self> {
        Ok(HttpRemote {
            client: utils::http_client()?,
            base: utils::api_base_url(),
        })
    }

    fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, RemoteError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(RemoteError::Status(resp.status()))
        }
    }
}

impl RemoteStore for HttpRemote {
    fn list(&self) -> Result<Vec<Record>, RemoteError> {
        let url = format!("{}/api/transactions", self.base);
        let resp = Self::check(self.client.get(url).send()?)?;
        Ok(resp.json()?)
    }

    fn upsert(&self, record: &Record) -> Result<(), RemoteError> {
        let url = format!("{}/api/transactions", self.base);
        Self::check(self.client.post(url).json(record).send()?)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let url = format!("{}/api/transactions/{}", self.base, id);
        Self::check(self.client.delete(url).send()?)?;
        Ok(())
    }
}
