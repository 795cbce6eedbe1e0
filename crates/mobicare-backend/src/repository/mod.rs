//! # Repository Module
//!
//! Typed access to the hosted store's collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts store access behind a typed API.      │
//! │                                                                         │
//! │  Storefront command                                                     │
//! │       │                                                                 │
//! │       │  backend.products().list().await                                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── create(&self, product)                                             │
//! │  ├── get(&self, id)                                                     │
//! │  ├── list(&self)                                                        │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  JSON documents at slash paths                                  │
//! │       ▼                                                                 │
//! │  RealtimeStore (MemoryStore in dev/tests, hosted in production)         │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Path layout and id handling isolated in one place                    │
//! │  • Commands never see raw serde_json::Value                             │
//! │  • Easy to test against MemoryStore                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Convention
//! Record ids live in store KEYS. Repositories strip the `id` field
//! before writing a document and inject the key back as `id` when
//! reading one.

pub mod order;
pub mod product;
pub mod service;
pub mod user;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use service::ServiceRequestRepository;
pub use user::UserRepository;
