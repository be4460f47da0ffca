//! Generational storage for detail objects.
//!
//! The coordinator refers to objects through [`ObjectHandle`]s instead of
//! borrowing them, so the scene may remove an object at any time and the
//! coordinator detects it on the next frame.

use crate::DetailObject;

/// Index into an [`ObjectPool`] plus the slot generation it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    /// Slot index within the pool.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    object: Option<DetailObject>,
}

/// Owns every detail object of a scene.
///
/// Removing an object bumps its slot generation, so handles issued before the
/// removal stop resolving even after the slot is reused.
#[derive(Clone, Debug, Default)]
pub struct ObjectPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` and return its handle.
    pub fn insert(&mut self, object: DetailObject) -> ObjectHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjectHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjectHandle {
            index,
            generation: 0,
        }
    }

    /// Remove and return the object, or `None` for a stale handle.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<DetailObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(object)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&DetailObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_ref()
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut DetailObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_mut()
    }

    /// Whether `handle` still resolves to a live object.
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over live objects with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &DetailObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|object| {
                (
                    ObjectHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    object,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetailLevel;
    use glam::Vec3;
    use lodestar_math::Aabb;

    fn object(cost: u32) -> DetailObject {
        DetailObject::new(
            Vec3::ZERO,
            Aabb::new(Vec3::ZERO, Vec3::ONE),
            vec![DetailLevel {
                cost,
                switch_distance: 50.0,
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut pool = ObjectPool::new();
        let a = pool.insert(object(10));
        let b = pool.insert(object(20));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(a).unwrap().costs(), vec![10]);
        assert_eq!(pool.get(b).unwrap().costs(), vec![20]);
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut pool = ObjectPool::new();
        let a = pool.insert(object(10));
        assert!(pool.remove(a).is_some());
        assert!(!pool.contains(a));
        assert!(pool.remove(a).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_reused_slot_bumps_generation() {
        let mut pool = ObjectPool::new();
        let old = pool.insert(object(10));
        pool.remove(old);
        let new = pool.insert(object(30));
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert!(pool.get(old).is_none());
        assert_eq!(pool.get(new).unwrap().costs(), vec![30]);
    }

    #[test]
    fn test_get_mut_modifies_object() {
        let mut pool = ObjectPool::new();
        let a = pool.insert(object(10));
        pool.get_mut(a).unwrap().force_level(0);
        assert_eq!(pool.get(a).unwrap().forced_level(), Some(0));
    }

    #[test]
    fn test_iter_skips_removed() {
        let mut pool = ObjectPool::new();
        let a = pool.insert(object(1));
        let b = pool.insert(object(2));
        let c = pool.insert(object(3));
        pool.remove(b);
        let handles: Vec<_> = pool.iter().map(|(h, _)| h).collect();
        assert_eq!(handles, vec![a, c]);
    }
}
