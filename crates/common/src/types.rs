use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed identifier type.
///
/// Each entity gets its own wrapper so that, say, an order ID can never
/// be passed where a payment ID is expected.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a user account.
    UserId
}

entity_id! {
    /// Unique identifier for a catalog product.
    ProductId
}

entity_id! {
    /// Unique identifier for a single cart line.
    CartLineId
}

entity_id! {
    /// Unique identifier for an order.
    OrderId
}

entity_id! {
    /// Unique identifier for a payment.
    PaymentId
}
