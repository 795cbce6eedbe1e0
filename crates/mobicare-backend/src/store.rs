//! # Hosted Realtime Store
//!
//! The document store seam and its in-memory implementation.
//!
//! ## Data Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Layout (one JSON tree)                         │
//! │                                                                         │
//! │  /                                                                      │
//! │  ├── users/                                                             │
//! │  │   └── <uid>           { email, role, provider?, createdAt, ... }     │
//! │  ├── products/                                                          │
//! │  │   └── <push-key>      { name, category, brand, pricePaise, ... }     │
//! │  ├── serviceRequests/                                                   │
//! │  │   └── <push-key>      { serviceId, status, completionDate, ... }     │
//! │  └── orders/                                                            │
//! │      └── <push-key>      { items, totalPaise, createdAt, ... }          │
//! │                                                                         │
//! │  Paths are slash-separated; documents are serde_json::Value.            │
//! │  Record ids live in the KEY, not in the document body. Repositories     │
//! │  strip the id before writing and inject it back when reading.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a Trait
//! The storefront is written against [`RealtimeStore`], not a concrete
//! backend. [`MemoryStore`] backs tests and local development; a hosted
//! implementation slots in behind the same trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Trait
// =============================================================================

/// Async document store keyed by slash-separated paths.
///
/// ## Usage
/// ```rust,ignore
/// let store: Arc<dyn RealtimeStore> = Arc::new(MemoryStore::new());
///
/// // Write a document at a known path
/// store.put("users/uid-1", json!({ "email": "a@b.com" })).await?;
///
/// // Append a document under a generated key
/// let key = store.push("products", json!({ "name": "AirPods" })).await?;
///
/// // List children as (key, document) pairs
/// let products = store.list("products").await?;
/// ```
#[async_trait]
pub trait RealtimeStore: Send + Sync {
    /// Reads the document at `path`, or `None` if nothing is there.
    async fn get(&self, path: &str) -> StoreResult<Option<Value>>;

    /// Writes `value` at `path`, replacing whatever was there.
    ///
    /// Intermediate path segments are created as needed.
    async fn put(&self, path: &str, value: Value) -> StoreResult<()>;

    /// Merges `fields` into the object at `path`.
    ///
    /// Existing fields not named in `fields` are kept. Fails if the
    /// document at `path` exists but is not an object.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> StoreResult<()>;

    /// Deletes the document at `path`. Deleting a missing path is a no-op.
    async fn delete(&self, path: &str) -> StoreResult<()>;

    /// Appends `value` under `path` with a generated key and returns
    /// that key.
    async fn push(&self, path: &str, value: Value) -> StoreResult<String>;

    /// Lists the children of `path` as `(key, document)` pairs in key
    /// order. A missing path lists as empty.
    async fn list(&self, path: &str) -> StoreResult<Vec<(String, Value)>>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory [`RealtimeStore`] over a single JSON tree.
///
/// Backs tests and local development. All operations take the tree
/// lock for the duration of the call; documents are small, so this is
/// never contended in practice.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: RwLock<Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore {
            tree: RwLock::new(Value::Object(Map::new())),
        }
    }

    /// Creates a store seeded with an initial tree.
    ///
    /// ## Usage
    /// Handy in tests to start from a known catalog:
    /// ```rust,ignore
    /// let store = MemoryStore::with_tree(json!({
    ///     "products": { "p-1": { "name": "AirPods" } }
    /// }));
    /// ```
    pub fn with_tree(tree: Value) -> Self {
        MemoryStore {
            tree: RwLock::new(tree),
        }
    }

    /// Snapshot of the whole tree. Test helper.
    pub async fn snapshot(&self) -> Value {
        self.tree.read().await.clone()
    }
}

/// Splits a slash path into non-empty segments.
fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Walks `tree` down to the node at `path`, if present.
fn node_at<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = tree;
    for seg in segments(path) {
        node = node.as_object()?.get(seg)?;
    }
    Some(node)
}

/// Walks `tree` down to the object at `path`, creating intermediate
/// objects along the way, and returns a mutable reference to it.
///
/// Fails if an intermediate node exists but is not an object.
fn object_at_mut<'a>(tree: &'a mut Value, path: &str) -> StoreResult<&'a mut Map<String, Value>> {
    let mut node = tree;
    for seg in segments(path) {
        if node.is_null() {
            *node = Value::Object(Map::new());
        }
        let obj = node
            .as_object_mut()
            .ok_or_else(|| StoreError::write(path, format!("'{}' is not an object", seg)))?;
        node = obj.entry(seg.to_string()).or_insert(Value::Null);
    }
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    node.as_object_mut()
        .ok_or_else(|| StoreError::write(path, "target is not an object"))
}

#[async_trait]
impl RealtimeStore for MemoryStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Value>> {
        let tree = self.tree.read().await;
        Ok(node_at(&tree, path).cloned())
    }

    async fn put(&self, path: &str, value: Value) -> StoreResult<()> {
        let segs = segments(path);
        let Some((last, parents)) = segs.split_last() else {
            // Replacing the root is only meaningful with an object
            let mut tree = self.tree.write().await;
            *tree = value;
            return Ok(());
        };

        let parent_path = parents.join("/");
        let mut tree = self.tree.write().await;
        let parent = object_at_mut(&mut tree, &parent_path)?;
        parent.insert(last.to_string(), value);
        debug!(path = %path, "Store put");
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> StoreResult<()> {
        let mut tree = self.tree.write().await;
        let target = object_at_mut(&mut tree, path)?;
        for (key, value) in fields {
            target.insert(key, value);
        }
        debug!(path = %path, "Store update");
        Ok(())
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        let segs = segments(path);
        let Some((last, parents)) = segs.split_last() else {
            let mut tree = self.tree.write().await;
            *tree = Value::Object(Map::new());
            return Ok(());
        };

        let parent_path = parents.join("/");
        let mut tree = self.tree.write().await;
        let mut node = &mut *tree;
        for seg in parents {
            match node.as_object_mut().and_then(|o| o.get_mut(*seg)) {
                Some(child) => node = child,
                // Parent chain doesn't exist, nothing to delete
                None => return Ok(()),
            }
        }
        if let Some(obj) = node.as_object_mut() {
            obj.remove(*last);
            debug!(path = %path, parent = %parent_path, "Store delete");
        }
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> StoreResult<String> {
        let key = Uuid::new_v4().to_string();
        let child_path = format!("{}/{}", path.trim_end_matches('/'), key);

        let mut tree = self.tree.write().await;
        let parent = object_at_mut(&mut tree, path)?;
        parent.insert(key.clone(), value);
        debug!(path = %child_path, "Store push");
        Ok(key)
    }

    async fn list(&self, path: &str) -> StoreResult<Vec<(String, Value)>> {
        let tree = self.tree.read().await;
        let Some(node) = node_at(&tree, path) else {
            return Ok(Vec::new());
        };

        let obj = node
            .as_object()
            .ok_or_else(|| StoreError::read(path, "listed node is not an object"))?;

        Ok(obj
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

// =============================================================================
// Typed Document Helpers
// =============================================================================

/// Deserializes a store document into `T`, wrapping failures with path
/// context.
pub fn decode<T: serde::de::DeserializeOwned>(path: &str, value: Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::serialize(path, e))
}

/// Serializes `value` into a store document, wrapping failures with
/// path context.
pub fn encode<T: serde::Serialize>(path: &str, value: &T) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|e| StoreError::serialize(path, e))
}

/// Serializes `value` and strips `id_field` from the resulting object.
///
/// Record ids live in store keys, never in document bodies. Writing a
/// record echoes the id back in on read; see [`inject_id`].
pub fn encode_without_id<T: serde::Serialize>(
    path: &str,
    value: &T,
    id_field: &str,
) -> StoreResult<Value> {
    let mut doc = encode(path, value)?;
    if let Some(obj) = doc.as_object_mut() {
        obj.remove(id_field);
    }
    Ok(doc)
}

/// Sets `id_field` on a document object from its store key, then
/// decodes it.
pub fn inject_id<T: serde::de::DeserializeOwned>(
    path: &str,
    key: &str,
    mut value: Value,
    id_field: &str,
) -> StoreResult<T> {
    if let Some(obj) = value.as_object_mut() {
        obj.insert(id_field.to_string(), Value::String(key.to_string()));
    }
    decode(path, value)
}

/// Decodes a listing into typed records with ids injected from keys.
pub fn decode_list<T: serde::de::DeserializeOwned>(
    path: &str,
    entries: Vec<(String, Value)>,
    id_field: &str,
) -> StoreResult<Vec<T>> {
    entries
        .into_iter()
        .map(|(key, value)| inject_id(path, &key, value, id_field))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        store
            .put("users/uid-1", json!({ "email": "a@b.com" }))
            .await
            .unwrap();

        let doc = store.get("users/uid-1").await.unwrap().unwrap();
        assert_eq!(doc["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_get_missing_path_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("users/nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .put("serviceRequests/r-1", json!({ "status": "Received", "phone": "9876543210" }))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("status".to_string(), json!("Ready"));
        store.update("serviceRequests/r-1", fields).await.unwrap();

        let doc = store.get("serviceRequests/r-1").await.unwrap().unwrap();
        assert_eq!(doc["status"], "Ready");
        // Untouched field survives the merge
        assert_eq!(doc["phone"], "9876543210");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put("products/p-1", json!({ "name": "X" })).await.unwrap();

        store.delete("products/p-1").await.unwrap();
        assert!(store.get("products/p-1").await.unwrap().is_none());

        // Second delete is a no-op, not an error
        store.delete("products/p-1").await.unwrap();
        store.delete("never/existed").await.unwrap();
    }

    #[tokio::test]
    async fn test_push_generates_distinct_keys() {
        let store = MemoryStore::new();
        let k1 = store.push("products", json!({ "name": "A" })).await.unwrap();
        let k2 = store.push("products", json!({ "name": "B" })).await.unwrap();
        assert_ne!(k1, k2);

        let listed = store.list("products").await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_list_missing_path_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list("orders").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_creates_intermediate_objects() {
        let store = MemoryStore::new();
        store
            .put("a/b/c/d", json!(42))
            .await
            .unwrap();
        assert_eq!(store.get("a/b/c/d").await.unwrap().unwrap(), json!(42));
        assert!(store.get("a/b").await.unwrap().unwrap().is_object());
    }

    #[tokio::test]
    async fn test_update_rejects_non_object_target() {
        let store = MemoryStore::new();
        store.put("counters/x", json!(7)).await.unwrap();

        let mut fields = Map::new();
        fields.insert("y".to_string(), json!(1));
        assert!(store.update("counters/x", fields).await.is_err());
    }

    #[test]
    fn test_id_strip_and_inject_round_trip() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Rec {
            id: String,
            name: String,
        }

        let rec = Rec {
            id: "ignored".to_string(),
            name: "AirPods".to_string(),
        };

        let doc = encode_without_id("products", &rec, "id").unwrap();
        assert!(doc.get("id").is_none());

        let back: Rec = inject_id("products", "key-1", doc, "id").unwrap();
        assert_eq!(back.id, "key-1");
        assert_eq!(back.name, "AirPods");
    }
}
