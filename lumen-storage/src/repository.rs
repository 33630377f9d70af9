//! Typed repositories over the keyed store.
//!
//! A repository owns one collection. Collections are small, so every
//! mutation is read-modify-write of the whole collection under a lock.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use lumen_core::{
    EntityIdType, EntityType, Inquiry, LumenResult, Project, SiteSettings, StorageError,
    Testimonial, ValidationError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::keyed::{decode_or_default, decode_strict, encode, KeyedStore, StoreKey};

/// An entity stored as one element of a keyed collection.
pub trait CollectionEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const STORE_KEY: StoreKey;
    const ENTITY_TYPE: EntityType;

    fn entity_id(&self) -> &str;

    /// Uniqueness rule beyond the id, checked against every other stored
    /// entity inside the write lock.
    fn conflict_with(&self, _other: &Self) -> Option<ValidationError> {
        None
    }
}

impl CollectionEntity for Project {
    const STORE_KEY: StoreKey = StoreKey::Projects;
    const ENTITY_TYPE: EntityType = EntityType::Project;

    fn entity_id(&self) -> &str {
        self.id.as_str()
    }

    /// Slugs become public portfolio ids, so two projects may not share one.
    fn conflict_with(&self, other: &Self) -> Option<ValidationError> {
        let slug = self.slug.as_deref()?;
        (other.id != self.id && other.slug.as_deref() == Some(slug)).then(|| {
            ValidationError::Duplicate {
                field: "slug".to_string(),
                value: slug.to_string(),
            }
        })
    }
}

impl CollectionEntity for Testimonial {
    const STORE_KEY: StoreKey = StoreKey::Testimonials;
    const ENTITY_TYPE: EntityType = EntityType::Testimonial;

    fn entity_id(&self) -> &str {
        self.id.as_str()
    }
}

impl CollectionEntity for Inquiry {
    const STORE_KEY: StoreKey = StoreKey::Inquiries;
    const ENTITY_TYPE: EntityType = EntityType::Inquiry;

    fn entity_id(&self) -> &str {
        self.id.as_str()
    }
}

/// CRUD over one entity collection.
pub trait EntityRepository<T>: Send + Sync {
    /// All entities in stored order.
    fn list(&self) -> LumenResult<Vec<T>>;

    fn get(&self, id: &str) -> LumenResult<Option<T>>;

    /// Append a new entity. Fails if the id is taken.
    fn insert(&self, entity: &T) -> LumenResult<()>;

    /// Replace an existing entity in place, keeping its position.
    fn update(&self, entity: &T) -> LumenResult<()>;

    fn delete(&self, id: &str) -> LumenResult<()>;
}

/// Repository storing a whole collection under the entity's store key.
pub struct KeyedRepository<T> {
    store: Arc<dyn KeyedStore>,
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: CollectionEntity> KeyedRepository<T> {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    fn load(&self) -> LumenResult<Vec<T>> {
        let bytes = self.store.get(T::STORE_KEY)?;
        Ok(decode_or_default(T::STORE_KEY, bytes))
    }

    /// Load for a mutation. Unlike reads, an undecodable collection is an
    /// error so the write cannot replace records it failed to see.
    fn load_for_write(&self) -> LumenResult<Vec<T>> {
        let bytes = self.store.get(T::STORE_KEY)?;
        decode_strict(T::STORE_KEY, bytes)
    }

    fn check_conflicts(entities: &[T], entity: &T) -> LumenResult<()> {
        match entities.iter().find_map(|other| entity.conflict_with(other)) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn save(&self, entities: &[T]) -> LumenResult<()> {
        let bytes = encode(T::STORE_KEY, entities)?;
        self.store.set(T::STORE_KEY, &bytes)
    }

    fn not_found(id: &str) -> StorageError {
        StorageError::NotFound {
            entity_type: T::ENTITY_TYPE,
            id: id.to_string(),
        }
    }
}

impl<T: CollectionEntity> EntityRepository<T> for KeyedRepository<T> {
    fn list(&self) -> LumenResult<Vec<T>> {
        self.load()
    }

    fn get(&self, id: &str) -> LumenResult<Option<T>> {
        Ok(self.load()?.into_iter().find(|e| e.entity_id() == id))
    }

    fn insert(&self, entity: &T) -> LumenResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut entities = self.load_for_write()?;
        if entities.iter().any(|e| e.entity_id() == entity.entity_id()) {
            return Err(StorageError::InsertFailed {
                entity_type: T::ENTITY_TYPE,
                reason: format!("id {} already exists", entity.entity_id()),
            }
            .into());
        }
        Self::check_conflicts(&entities, entity)?;
        entities.push(entity.clone());
        self.save(&entities)?;
        tracing::debug!(entity_type = %T::ENTITY_TYPE, id = entity.entity_id(), "Inserted entity");
        Ok(())
    }

    fn update(&self, entity: &T) -> LumenResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut entities = self.load_for_write()?;
        Self::check_conflicts(&entities, entity)?;
        let slot = entities
            .iter_mut()
            .find(|e| e.entity_id() == entity.entity_id())
            .ok_or_else(|| Self::not_found(entity.entity_id()))?;
        *slot = entity.clone();
        self.save(&entities)?;
        tracing::debug!(entity_type = %T::ENTITY_TYPE, id = entity.entity_id(), "Updated entity");
        Ok(())
    }

    fn delete(&self, id: &str) -> LumenResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut entities = self.load_for_write()?;
        let before = entities.len();
        entities.retain(|e| e.entity_id() != id);
        if entities.len() == before {
            return Err(Self::not_found(id).into());
        }
        self.save(&entities)?;
        tracing::debug!(entity_type = %T::ENTITY_TYPE, id, "Deleted entity");
        Ok(())
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Single-record repository for site settings.
pub struct SettingsRepository {
    store: Arc<dyn KeyedStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    /// Current settings, or the defaults when none were saved.
    pub fn get(&self) -> LumenResult<SiteSettings> {
        let bytes = self.store.get(StoreKey::Settings)?;
        Ok(decode_or_default(StoreKey::Settings, bytes))
    }

    /// Validate and replace the stored settings.
    pub fn put(&self, settings: &SiteSettings) -> LumenResult<()> {
        settings.validate()?;
        let bytes = encode(StoreKey::Settings, settings)?;
        self.store.set(StoreKey::Settings, &bytes)?;
        tracing::info!(company = %settings.company_name, "Site settings replaced");
        Ok(())
    }
}
