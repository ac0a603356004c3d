//! Typed ID definitions for all domain entities.
//!
//! Each entity gets a marker type and an `Id<Marker>` alias, so IDs cannot
//! be mixed up across entities at compile time.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Profile entities (users: clients, professionals, admins).
pub struct Profile;

/// Marker type for ServiceRequest entities (client asks).
pub struct ServiceRequest;

/// Marker type for RequestImage entities.
pub struct RequestImage;

/// Marker type for ServiceCategory entities (taxonomy).
pub struct ServiceCategory;

/// Marker type for CreditTransaction entities (ledger rows).
pub struct CreditTransaction;

/// Marker type for ContactUnlock entities.
pub struct ContactUnlock;

/// Marker type for PortfolioItem entities.
pub struct PortfolioItem;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Profile entities.
pub type ProfileId = Id<Profile>;

/// Typed ID for ServiceRequest entities.
pub type RequestId = Id<ServiceRequest>;

/// Typed ID for RequestImage entities.
pub type RequestImageId = Id<RequestImage>;

/// Typed ID for ServiceCategory entities.
pub type CategoryId = Id<ServiceCategory>;

/// Typed ID for CreditTransaction entities.
pub type TransactionId = Id<CreditTransaction>;

/// Typed ID for ContactUnlock entities.
pub type UnlockId = Id<ContactUnlock>;

/// Typed ID for PortfolioItem entities.
pub type PortfolioItemId = Id<PortfolioItem>;
