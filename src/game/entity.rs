//! Entity Handles
//!
//! Entities are lightweight identifiers for game objects owned by a scene.
//! The renderer buckets and scene-level bookkeeping hold these handles
//! instead of references, so nothing outside the scene owns an object.
//!
//! Handles carry a generation so a stale handle from another scene never
//! matches an object that happens to sit in the same slot.

/// A unique identifier for a game object inside one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Index into the scene's object storage
    index: u32,
    /// Generation of the allocator that produced this handle
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Index of this entity (slot in the scene's object list).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// A null/invalid entity reference.
    /// Used for objects that have not been added to a scene yet.
    pub const NULL: Entity = Entity { index: u32::MAX, generation: 0 };

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::NULL
    }
}

/// Hands out entity handles for one scene.
///
/// Objects are never removed from a scene, so slots are handed out
/// sequentially and never reused.
pub struct EntityAllocator {
    /// Generation stamped on every handle from this allocator
    generation: u32,
    /// Next fresh index
    next_fresh: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::with_generation(0)
    }

    /// Create an allocator whose handles never match those of other generations.
    pub fn with_generation(generation: u32) -> Self {
        Self {
            generation,
            next_fresh: 0,
        }
    }

    /// Allocate a new entity.
    pub fn allocate(&mut self) -> Entity {
        let index = self.next_fresh;
        self.next_fresh += 1;
        Entity::new(index, self.generation)
    }

    /// Check if an entity was handed out by this allocator.
    pub fn is_alive(&self, entity: Entity) -> bool {
        !entity.is_null() && entity.generation == self.generation && entity.index < self.next_fresh
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sequential() {
        let mut alloc = EntityAllocator::new();

        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_eq!(e1.index(), 0);
        assert_eq!(e2.index(), 1);
        assert!(!alloc.is_alive(Entity::new(2, 0)));
        assert!(alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
    }

    #[test]
    fn test_generation_separates_allocators() {
        let mut first = EntityAllocator::with_generation(1);
        let second = EntityAllocator::with_generation(2);

        let e = first.allocate();
        assert!(first.is_alive(e));
        assert!(!second.is_alive(e));
    }

    #[test]
    fn test_null_entity() {
        let alloc = EntityAllocator::new();
        assert!(!alloc.is_alive(Entity::NULL));
        assert!(Entity::NULL.is_null());
        assert_eq!(Entity::default(), Entity::NULL);
    }
}
