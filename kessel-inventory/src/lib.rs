//! # Kessel Inventory
//!
//! gRPC client for the Kessel inventory service, API version `v1beta2`.
//!
//! The crate contains the protobuf message types and service client for
//! `kessel.inventory.v1beta2.KesselInventoryService`, a [`ClientBuilder`]
//! covering the supported transport modes, and helpers for TLS and for the
//! free-form attribute maps carried by reported resources.
//!
//! ## Transport modes
//!
//! - Insecure: plaintext HTTP/2, for local development only
//! - TLS: server verified against a CA bundle, optionally mutual TLS
//! - TLS with call credentials: a bearer token from a [`TokenSource`] on each call
//!
//! ```no_run
//! use kessel_inventory::v1beta2::{
//!     CheckRequest, ReporterReference, ResourceReference, SubjectReference,
//! };
//! use kessel_inventory::ClientBuilder;
//!
//! # async fn example() -> Result<(), kessel_inventory::ApiError> {
//! let client = ClientBuilder::new("localhost:9000").insecure().build()?;
//!
//! let response = client
//!     .check(CheckRequest {
//!         object: Some(ResourceReference {
//!             resource_type: "host".to_string(),
//!             resource_id: "854589f0-3be7-4cad-8bcd-45e18f33cb81".to_string(),
//!             reporter: Some(ReporterReference {
//!                 r#type: "HBI".to_string(),
//!                 instance_id: None,
//!             }),
//!         }),
//!         relation: "member".to_string(),
//!         subject: Some(SubjectReference {
//!             relation: None,
//!             resource: Some(ResourceReference {
//!                 resource_type: "principal".to_string(),
//!                 resource_id: "redhat/38348".to_string(),
//!                 reporter: Some(ReporterReference {
//!                     r#type: "rbac".to_string(),
//!                     instance_id: None,
//!                 }),
//!             }),
//!         }),
//!         consistency: None,
//!     })
//!     .await?;
//! println!("allowed: {:?}", response.allowed());
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod error;
mod tls;
mod value;

/// Shared protobuf types from `google.rpc`
pub mod google {
    pub mod rpc {
        #![allow(clippy::all)]
        include!("generated/google.rpc.rs");
    }
}

/// Messages and service client for `kessel.inventory.v1beta2`
///
/// The `server` feature adds the service trait and server, used to host
/// in-process inventory services in tests.
pub mod v1beta2 {
    #![allow(clippy::all, clippy::doc_lazy_continuation)]
    include!("generated/kessel.inventory.v1beta2.rs");
    #[cfg(feature = "server")]
    include!("generated/kessel.inventory.v1beta2.server.rs");
}

pub use builder::ClientBuilder;
pub use client::InventoryClient;
pub use error::ApiError;
pub use kessel_auth::TokenSource;
pub use tls::{configure_tls, TlsConfig};
pub use tonic::Code;
pub use value::{from_struct, to_struct};
