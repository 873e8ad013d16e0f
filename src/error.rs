// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::ResourceKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodscopeError {
    #[error("Unimplemented resource type: {0}")]
    UnknownResourceKind(String),

    #[error("Cannot get object selector for resource type: {0}")]
    UnsupportedSelectorKind(ResourceKind),

    #[error("{} \"{}\" not found in namespace \"{}\"", .kind.singular(), .name, .namespace)]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    #[error("No pods found for {selection}")]
    NoPodsFound { selection: String },

    #[error("Timed out after {0:?} waiting for caches to sync")]
    SyncTimeout(Duration),

    #[error("Caches have not completed their initial sync")]
    NotReady,

    #[error("Invalid resource reference: {0}")]
    InvalidReference(String),

    #[error("Invalid label selector: {0}")]
    InvalidLabelSelector(String),

    #[error("Watch for {0} terminated before the cache synced")]
    CacheTerminated(ResourceKind),
}

/// Transport-neutral classification of a failure, for callers that map
/// errors onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    Unimplemented,
    NotFound,
    Unavailable,
    DeadlineExceeded,
}

impl PodscopeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PodscopeError::UnknownResourceKind(_) | PodscopeError::UnsupportedSelectorKind(_) => {
                ErrorCode::Unimplemented
            }
            PodscopeError::NotFound { .. } | PodscopeError::NoPodsFound { .. } => {
                ErrorCode::NotFound
            }
            PodscopeError::InvalidReference(_) | PodscopeError::InvalidLabelSelector(_) => {
                ErrorCode::InvalidArgument
            }
            PodscopeError::NotReady | PodscopeError::CacheTerminated(_) => ErrorCode::Unavailable,
            PodscopeError::SyncTimeout(_) => ErrorCode::DeadlineExceeded,
        }
    }
}

pub type Result<T> = std::result::Result<T, PodscopeError>;
