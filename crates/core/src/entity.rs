//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Identifier type. May be unsized (e.g. `str`) so lookups borrow instead of allocate.
    type Id: Eq + core::hash::Hash + core::fmt::Debug + ?Sized;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this entity carries the given identifier.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
