//! # Module Server - API de haut niveau pour Axum
//!
//! Ce module fournit une abstraction simple et ergonomique pour créer des
//! serveurs HTTP avec Axum, en cachant la complexité de la configuration et
//! du routage.
//!
//! ## Fonctionnalités
//!
//! - 🚀 **Routes JSON simples** : Ajoutez des endpoints API avec `add_route()`
//! - 📁 **Fichiers statiques** : Servez des assets avec `add_dir()`
//! - 🎯 **Handlers personnalisés** : Support Axum complet avec `add_handler_with_state()`
//! - 📚 **Documentation API** : OpenAPI/Swagger automatique avec `add_openapi()`
//! - 🔀 **CORS permissif** : Toutes les réponses autorisent le cross-origin
//! - ⚡ **Gestion gracieuse** : Arrêt propre sur Ctrl+C, SIGTERM ou `stop()`

use axum::handler::Handler;
use axum::routing::get;
use axum::{Json, Router};
use axum_embed::ServeEmbed;
use rust_embed::RustEmbed;
use serde::Serialize;
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

/// Info serveur sérialisable
#[derive(Clone, Serialize, utoipa::ToSchema)]
pub struct ServerInfo {
    pub name: String,
    pub address: String,
    pub http_port: u16,
}

/// Serveur principal
pub struct Server {
    name: String,
    address: IpAddr,
    http_port: u16,
    router: Arc<RwLock<Router>>,
    join_handle: Option<JoinHandle<()>>,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Crée une nouvelle instance de serveur
    ///
    /// # Arguments
    ///
    /// * `name` - Nom du serveur (pour les logs)
    /// * `address` - Adresse d'écoute (ex: 0.0.0.0 pour toutes les interfaces)
    /// * `http_port` - Port HTTP à écouter
    pub fn new(name: impl Into<String>, address: IpAddr, http_port: u16) -> Self {
        Self {
            name: name.into(),
            address,
            http_port,
            router: Arc::new(RwLock::new(Router::new())),
            join_handle: None,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Ajoute une route JSON dynamique
    ///
    /// Crée un endpoint qui retourne du JSON. La closure fournie sera appelée
    /// à chaque requête GET sur le chemin spécifié.
    pub async fn add_route<F, Fut, T>(&mut self, path: &str, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let f = Arc::new(f);
        let handler = {
            let f = f.clone();
            move || {
                let f = f.clone();
                async move { Json(f().await) }
            }
        };

        let route = Router::new().route("/", get(handler));

        let mut r = self.router.write().await;
        *r = if path == "/" {
            std::mem::take(&mut *r).merge(route)
        } else {
            std::mem::take(&mut *r).nest(path, route)
        };
    }

    /// Ajoute un handler avec état
    pub async fn add_handler_with_state<H, T, S>(&mut self, path: &str, handler: H, state: S)
    where
        H: Handler<T, S> + Clone + 'static,
        T: 'static,
        S: Clone + Send + Sync + 'static,
    {
        let route = Router::new()
            .route("/", get(handler.clone()))
            .with_state(state.clone());

        let mut r = self.router.write().await;
        *r = if path == "/" {
            std::mem::take(&mut *r).merge(route)
        } else {
            std::mem::take(&mut *r).nest(path, route)
        };
    }

    /// Ajoute un sous-router au serveur
    ///
    /// - Si `path` est "/", merge directement au router principal
    /// - Sinon, nest le router sous le chemin donné
    pub async fn add_router(&mut self, path: &str, sub_router: Router) {
        let mut r = self.router.write().await;

        let combined = if path == "/" {
            r.clone().merge(sub_router)
        } else {
            let normalized = format!("/{}", path.trim_start_matches('/'));
            r.clone().nest(&normalized, sub_router)
        };

        *r = combined;
    }

    /// Ajoute un répertoire statique embarqué dans le binaire
    pub async fn add_dir<E>(&mut self, path: &str)
    where
        E: RustEmbed + Clone + Send + Sync + 'static,
    {
        let serve = ServeEmbed::<E>::new();
        let mut r = self.router.write().await;

        let route = Router::new().fallback_service(serve);
        *r = if path == "/" {
            std::mem::take(&mut *r).merge(route)
        } else {
            std::mem::take(&mut *r).nest(path, route)
        };
    }

    /// Ajoute la documentation Swagger UI d'une API
    ///
    /// Les routes de l'API elles-mêmes sont enregistrées via `add_router` ;
    /// cette méthode ne publie que `/swagger-ui/{name}` et le JSON OpenAPI
    /// correspondant sous `/api-docs/{name}.json`.
    pub async fn add_openapi(&mut self, openapi: utoipa::openapi::OpenApi, name: &str) {
        let swagger_path = format!("/swagger-ui/{}", name);
        let swagger_path_static: &'static str = Box::leak(swagger_path.into_boxed_str());

        let openapi_json_path = format!("/api-docs/{}.json", name);
        let openapi_json_path_static: &'static str = Box::leak(openapi_json_path.into_boxed_str());

        let swagger = SwaggerUi::new(swagger_path_static).url(openapi_json_path_static, openapi);

        let mut r = self.router.write().await;
        *r = std::mem::take(&mut *r).merge(swagger);
    }

    /// Construit le router final avec les couches CORS et trace
    async fn build_router(&self) -> Router {
        let r = self.router.read().await.clone();
        r.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Démarre le serveur HTTP
    ///
    /// Le listener est lié avant de rendre la main : une erreur de bind est
    /// retournée à l'appelant au lieu d'être avalée par la tâche de fond.
    /// Le serveur tourne ensuite en arrière-plan jusqu'à un signal d'arrêt
    /// (Ctrl+C, SIGTERM) ou un appel à [`Server::stop`].
    pub async fn start(&mut self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.address, self.http_port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
        let local = listener.local_addr()?;

        info!("Server {} listening on http://{}", self.name, local);

        let router = self.build_router().await;
        let shutdown = self.shutdown.clone();
        self.join_handle = Some(tokio::spawn(async move {
            let served = axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown_requested(shutdown))
                .await;
            if let Err(e) = served {
                tracing::error!("Server error: {}", e);
            }
        }));

        Ok(())
    }

    /// Attend la fin du serveur
    pub async fn wait(&mut self) {
        if let Some(h) = self.join_handle.take() {
            let _ = h.await;
        }
    }

    /// Déclenche l'arrêt gracieux et attend la fin des connexions en cours
    pub async fn stop(&mut self) {
        self.shutdown.notify_one();
        self.wait().await;
    }

    /// Récupère les infos du serveur
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            name: self.name.clone(),
            address: self.address.to_string(),
            http_port: self.http_port,
        }
    }
}

/// Attend un signal d'arrêt : Ctrl+C, SIGTERM ou demande programmatique
async fn shutdown_requested(shutdown: Arc<Notify>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C reçu, arrêt gracieux");
        },
        _ = terminate => {
            info!("SIGTERM reçu, arrêt gracieux");
        },
        _ = shutdown.notified() => {
            info!("Arrêt demandé, fermeture des connexions en cours");
        },
    }
}

/// Builder pattern
pub struct ServerBuilder {
    name: String,
    address: IpAddr,
    http_port: u16,
}

impl ServerBuilder {
    /// Crée un nouveau builder
    ///
    /// Par défaut le serveur écoute toutes les interfaces sur le port 3000.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 3000,
        }
    }

    /// Fixe l'adresse d'écoute
    pub fn address(mut self, address: IpAddr) -> Self {
        self.address = address;
        self
    }

    /// Fixe le port HTTP
    pub fn http_port(mut self, http_port: u16) -> Self {
        self.http_port = http_port;
        self
    }

    /// Construit le serveur
    pub fn build(self) -> Server {
        Server::new(self.name, self.address, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt; // for `oneshot`

    #[test]
    fn test_builder_defaults() {
        let server = ServerBuilder::new("Test").build();
        let info = server.info();
        assert_eq!(info.name, "Test");
        assert_eq!(info.address, "0.0.0.0");
        assert_eq!(info.http_port, 3000);
    }

    #[tokio::test]
    async fn test_add_route_serves_json() {
        let mut server = ServerBuilder::new("Test").build();
        server
            .add_route("/api/status", || async { serde_json::json!({"status": "ok"}) })
            .await;

        let router = server.build_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let mut server = ServerBuilder::new("Test").build();
        server
            .add_route("/ping", || async { serde_json::json!("pong") })
            .await;

        let router = server.build_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let allow_origin = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("CORS header present");
        assert_eq!(allow_origin, "*");
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let mut server = Server::new("Test", IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        server.start().await.expect("bind on an ephemeral port");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port();

        let mut server = Server::new("Test", IpAddr::V4(Ipv4Addr::LOCALHOST), port);
        assert!(server.start().await.is_err());
    }
}
