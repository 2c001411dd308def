//! # pmoserver - Serveur web haut niveau basé sur Axum
//!
//! Cette crate fournit une abstraction simple et ergonomique pour créer des
//! serveurs HTTP avec Axum, conçue pour les petits services exposant une API
//! JSON et quelques assets statiques.
//!
//! ## Fonctionnalités
//!
//! - 🚀 **API de haut niveau** : Interface simple pour créer des serveurs HTTP
//! - 📁 **Fichiers statiques** : Serve de fichiers statiques avec `RustEmbed`
//! - 🔀 **CORS permissif** : Toutes les réponses autorisent le cross-origin
//! - 📚 **Documentation OpenAPI** : Génération automatique de Swagger UI
//! - ⚡ **Arrêt gracieux** : Ctrl+C, SIGTERM ou arrêt programmatique
//!
//! ## Exemple d'utilisation
//!
//! ```rust,no_run
//! use pmoserver::{ServerBuilder, logs::{init_logging, LoggingOptions}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_logging(LoggingOptions::default());
//!
//!     let mut server = ServerBuilder::new("MyAPI").http_port(8080).build();
//!
//!     // Ajout d'une route JSON
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     // Démarrage : une erreur de bind remonte ici
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::{LoggingOptions, init_logging};
pub use server::{Server, ServerBuilder, ServerInfo};
