//! HTTP clients for the Split off-ramp's external services.
//!
//! Three services are consumed: the rate API (fiat quotes), the aggregator
//! wrapper (institutions, account verification, payout orders), and the
//! price API (USD token prices). Each client sits behind a trait seam so the
//! orchestration layer and tests can substitute scripted implementations.

pub mod envelope;
pub mod error;
pub mod institutions;
pub mod orders;
pub mod prices;
pub mod quoter;
pub mod rates;
pub mod resolver;

mod http;

pub use envelope::ApiEnvelope;
pub use error::{ApiError, ApiResult};
pub use institutions::{AccountVerifier, HttpAccountVerifier, Institution, InstitutionClient};
pub use orders::{
    CreateOrderRequest, CreatedOrder, HttpOrderClient, OrderApi, OrderStatusSnapshot,
};
pub use prices::{PriceClient, TokenPrice};
pub use quoter::{QuoteOutcome, RateQuoter};
pub use rates::{HttpRateClient, RateSource};
pub use resolver::BeneficiaryResolver;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;
