//! Removal of no-op renames.

use crate::immutable::ImmutableMapping;
use crate::mapping::Mapping;

/// Keep only the pairs that actually rename something.
///
/// Classes are compared by identity. Fields and methods are compared by name
/// alone: a member whose owner or descriptor changed but whose name did not
/// is dropped, since the owner's rename is already in the class table.
pub fn strip_duplicates(mapping: &dyn Mapping) -> ImmutableMapping {
    let stripped = ImmutableMapping::new(
        mapping.classes().filter(|(original, renamed)| original != renamed),
        mapping.fields().filter(|(original, renamed)| original.name != renamed.name),
        mapping.methods().filter(|(original, renamed)| original.name != renamed.name),
    );
    tracing::trace!(remaining = stripped.len(), "stripped no-op renames");
    stripped
}
