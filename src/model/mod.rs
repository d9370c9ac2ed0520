//! Experiment data model
//!
//! Typed records for everything the experiment JSON carries. Each section
//! kind is its own struct holding only the fields the layout writers read;
//! every field is an `Option<Scalar>` (absent and `null` are the same thing).
//!
//! Records derive `Eq + Hash` so section tables can deduplicate them
//! structurally.

/// Declares a flat record of optional scalar fields.
///
/// Each field is given with its JSON key. The generated struct gets
/// `is_blank()` (no field present) and `overlay()` (copy present fields of
/// another record over this one).
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $key:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
        #[serde(default)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $key, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$crate::model::Scalar>,
            )*
        }

        impl $name {
            /// True when no field is present.
            pub fn is_blank(&self) -> bool {
                true $( && self.$field.is_none() )*
            }

            /// Copy every present field of `other` over `self`.
            pub fn overlay(&mut self, other: &Self) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            }
        }

        impl $crate::xref::Record for $name {
            fn is_blank(&self) -> bool {
                $name::is_blank(self)
            }
        }
    };
}

pub mod scalar;
pub mod experiment;
pub mod events;
pub mod control;
pub mod params;

pub use scalar::Scalar;
pub use experiment::{
    DssatInfo, EnvEntry, EnvModification, Experiment, ExperimentMeta, ExperimentSet, FieldAttrs,
    IcLayer, IcValues, InitialConditions, RootField, Sequence, SoilData, SoilDataLayer,
    SoilModifiers,
};
pub use events::{
    Chemical, CultivarRef, Event, EventKind, Fertilizer, Harvest, Irrigation, OrganicMatter,
    Planting, Tillage,
};
pub use control::{ControlEntry, SimControl};
pub use params::ParamSet;

/// Text of an optional field, or `default` when absent.
pub fn text_or<'a>(value: &'a Option<Scalar>, default: &'a str) -> &'a str {
    value.as_ref().map(|s| s.as_str()).unwrap_or(default)
}
