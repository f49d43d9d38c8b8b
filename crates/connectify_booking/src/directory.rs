// --- File: crates/connectify_booking/src/directory.rs ---
//! Lookup of the professionals that can be booked.

use crate::error::BookingError;
use async_trait::async_trait;
use connectify_config::BookingConfig;
use connectify_db::{ProfessionalRepository, SqlProfessionalRepository};
use std::collections::HashSet;

/// Answers whether a professional id refers to someone bookable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalDirectory: Send + Sync {
    async fn professional_exists(&self, professional_id: &str) -> Result<bool, BookingError>;
}

/// A fixed set of professional ids, usually read from [`BookingConfig`].
#[derive(Debug, Clone, Default)]
pub struct StaticProfessionalDirectory {
    professionals: HashSet<String>,
}

impl StaticProfessionalDirectory {
    pub fn new<I, S>(professionals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            professionals: professionals.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.professionals.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.professionals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.professionals.is_empty()
    }
}

#[async_trait]
impl ProfessionalDirectory for StaticProfessionalDirectory {
    async fn professional_exists(&self, professional_id: &str) -> Result<bool, BookingError> {
        Ok(self.professionals.contains(professional_id))
    }
}

#[async_trait]
impl ProfessionalDirectory for SqlProfessionalRepository {
    async fn professional_exists(&self, professional_id: &str) -> Result<bool, BookingError> {
        ProfessionalRepository::professional_exists(self, professional_id)
            .await
            .map_err(|e| BookingError::Directory(e.to_string()))
    }
}
