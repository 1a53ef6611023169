//! VehicleLookup trait - the seam between the HTTP layer and a provider

use async_trait::async_trait;

use crate::error::LookupResult;
use crate::models::{CredentialsCheck, VehicleHistory};

/// A registration lookup provider.
///
/// Implementations perform exactly one outbound call per invocation and keep
/// no per-request state, so a single instance is shared across all in-flight
/// requests behind an `Arc`.
#[async_trait]
pub trait VehicleLookup: Send + Sync {
    /// Short provider name used in logs
    fn provider_name(&self) -> &str;

    /// Look up the vehicle record for a registration number.
    ///
    /// Empty input fails with `InvalidRequest` before any network traffic.
    async fn lookup_vehicle_history(&self, vehicle_number: &str) -> LookupResult<VehicleHistory>;

    /// Query the provider with a placeholder registration and report the raw
    /// outcome. Only transport failures are errors; a non-2xx answer is
    /// reported inside the returned check.
    async fn test_credentials(&self) -> LookupResult<CredentialsCheck>;
}
