//! quoteforge: deterministic, auditable price estimation for freelance
//! project scopes.
//!
//! The pipeline turns a free-form scope record into three price tiers bound
//! to global floors and ceilings, with every intermediate quantity captured
//! in an append-only audit trail. No number in a final price is guessed; all
//! of them trace back to the rate tables and the scope content.

pub mod audit;
pub mod config;
pub mod error;
pub mod pricing;
pub mod scope;

pub use audit::{AuditEntry, AuditStore, MemoryAuditStore, PgAuditStore};
pub use config::{DatabaseConfig, PricingConfig};
pub use error::{AuditStoreError, EstimateError};
pub use pricing::{PriceEstimate, PricingEngine};
pub use scope::{BadgeLevel, Priority, ScopeRecord};
