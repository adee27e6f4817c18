//! Card system: definitions, abilities, statuses, instances and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (cost, stats, abilities)
//! - `AbilityDefinition`: Trigger, target category and effects of an ability
//! - `StatusDefinition`: Status effect with its evaluation weight
//! - `Card`: Runtime card state (damage, statuses, slot)
//! - `CardRegistry`: Definition lookup

pub mod ability;
pub mod definition;
pub mod instance;
pub mod registry;
pub mod status;

pub use ability::{AbilityDefinition, AbilityId, AbilityTarget, AbilityTrigger, Effect, TargetFilter};
pub use definition::{CardDefinition, CardId, CardKind};
pub use instance::Card;
pub use registry::CardRegistry;
pub use status::{CardStatus, StatusDefinition, StatusType};
