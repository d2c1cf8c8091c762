//! Shallow-merge helpers shared by the `*Patch` types.

use serde::{Deserialize, Deserializer};

/// Overwrite `slot` when the patch carries a value.
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`) so patches can clear optional fields.
pub(crate) fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
