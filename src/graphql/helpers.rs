use async_graphql::ErrorExtensions;

use crate::errors::AppResult;

/// Converts a service result into a GraphQL result whose error carries the
/// `code` extension.
pub fn with_code<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|err| err.extend())
}
