use async_graphql::{EmptyMutation, EmptySubscription, Error, Object, Result, Schema};

use super::email::{BulkCheckReport, EmailVerdict};
use super::health::{ServiceHealth, ServiceStats};
use crate::checker::EmailChecker;

/// Root query type exposing the whole engine over GraphQL.
pub struct QueryRoot {
    checker: EmailChecker,
    bulk_max_emails: usize,
}

#[Object]
impl QueryRoot {
    /// Component health for the whole service.
    async fn health(&self) -> ServiceHealth {
        self.checker.health().await.into()
    }

    /// Point-in-time counter snapshot.
    async fn stats(&self) -> ServiceStats {
        self.checker.stats().into()
    }

    /// Classifies a single address. Malformed input yields a verdict with
    /// `isValidFormat: false`, never a GraphQL error.
    async fn check_email(&self, email: String) -> EmailVerdict {
        self.checker.check(&email).await.into()
    }

    /// Classifies a batch, results in input order. Errors on an empty batch
    /// or one beyond the configured size cap.
    async fn check_emails(&self, emails: Vec<String>) -> Result<BulkCheckReport> {
        if emails.is_empty() {
            return Err(Error::new("emails must contain at least one address"));
        }
        if emails.len() > self.bulk_max_emails {
            return Err(Error::new(format!(
                "a batch may contain at most {} addresses, got {}",
                self.bulk_max_emails,
                emails.len()
            )));
        }
        Ok(self.checker.check_bulk(&emails).await.into())
    }
}

/// Main GraphQL Schema Definition
///
/// Combines the root query type with empty mutation and subscription types.
/// All list updates stay on the REST surface, so no mutations are exposed.
pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Builds the schema around a shared engine handle.
pub fn create_schema(checker: EmailChecker, bulk_max_emails: usize) -> AppSchema {
    Schema::build(
        QueryRoot {
            checker,
            bulk_max_emails,
        },
        EmptyMutation,
        EmptySubscription,
    )
    .finish()
}
