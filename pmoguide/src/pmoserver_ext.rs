//! Extension pmoserver pour le guide TV
//!
//! Ce module fournit un trait d'extension pour ajouter l'API du guide TV
//! à un serveur pmoserver, sans que pmoserver dépende de pmoguide.

use crate::api_rest::{create_router, TvGuideState};
use crate::catalog::Catalog;
use crate::openapi::ApiDoc;
use pmoserver::Server;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

/// Trait d'extension pour pmoserver::Server
///
/// # Exemple
///
/// ```rust,no_run
/// use pmoguide::{Catalog, TvGuideExt};
/// use pmoserver::ServerBuilder;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut server = ServerBuilder::new("TVGuide").build();
///     server.init_tvguide(Arc::new(Catalog::builtin())).await;
///     server.start().await?;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait TvGuideExt {
    /// Enregistre l'API du guide TV et sa documentation Swagger
    ///
    /// # Routes enregistrées
    ///
    /// - `GET /group` - Liste des groupes de chaînes
    /// - `GET /group/{id}/channel` - Chaînes d'un groupe (`?withProgram`)
    /// - `GET /channel/{id}/program` - Programme courant/suivant
    /// - Swagger: `/swagger-ui/tvguide`
    async fn init_tvguide(&mut self, catalog: Arc<Catalog>) -> TvGuideState;
}

impl TvGuideExt for Server {
    async fn init_tvguide(&mut self, catalog: Arc<Catalog>) -> TvGuideState {
        info!("Initializing TV guide API...");

        let state = TvGuideState::new(catalog);
        let router = create_router(state.clone());
        self.add_router("/", router).await;
        self.add_openapi(ApiDoc::openapi(), "tvguide").await;

        info!("TV guide API initialized");
        state
    }
}
