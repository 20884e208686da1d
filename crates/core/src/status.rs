//! Text-backed status enums.
//!
//! Each status is stored as a lowercase `TEXT` column guarded by a `CHECK`
//! constraint; the variant names below must match those constraints.

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every valid value, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The value stored in the database and sent over the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }

            /// Parse a stored or submitted value.
            ///
            /// Unknown values are a validation error naming the field.
            pub fn parse(value: &str) -> Result<Self, CoreError> {
                match value {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "{}: invalid value '{}'. Must be one of: {}",
                        $field,
                        other,
                        [$( $val ),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_status_enum! {
    /// Product lifecycle stage.
    ProductStatus("status") {
        Draft = "draft",
        Published = "published",
        Archived = "archived",
    }
}

define_status_enum! {
    /// Demo request follow-up workflow.
    DemoStatus("status") {
        Pending = "pending",
        Contacted = "contacted",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Order fulfilment workflow. Any status may move to any other.
    OrderStatus("status") {
        Pending = "pending",
        Processing = "processing",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Which public form an inbound message came from.
    MessageKind("kind") {
        Contact = "contact",
        Portfolio = "portfolio",
    }
}
