//! Fault reporting client: assembles a report for a captured fault and
//! delivers it to the collector in one best-effort POST. Nothing in here
//! may fail loudly; an undeliverable report is dropped.
//!
//! ```rust,no_run
//! use lucent_client::{Handler, HostContext};
//! use lucent_core::{Fault, LucentConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LucentConfig {
//!         lucent_url: "https://collector.example".to_string(),
//!         lucent_key: "secret".to_string(),
//!         ..LucentConfig::default()
//!     };
//!     let handler = Handler::new("/srv/app", config)?;
//!
//!     let fault = Fault::new("app::DbError", "connection refused")
//!         .at("/srv/app/src/db.rs", 42);
//!     handler.report(&fault, &HostContext::default()).await;
//!     Ok(())
//! }
//! ```

pub mod handler;
pub mod transmitter;

pub use handler::*;
pub use transmitter::*;
