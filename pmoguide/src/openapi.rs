//! Documentation OpenAPI pour l'API du guide TV.

use utoipa::OpenApi;

/// Documentation OpenAPI pour l'API du guide TV
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api_rest::get_groups,
        crate::api_rest::get_group_channels,
        crate::api_rest::get_channel_program,
    ),
    components(
        schemas(
            crate::models::Group,
            crate::models::ChannelListing,
            crate::models::ProgramWindow,
            crate::models::ResolvedProgram,
        )
    ),
    tags(
        (name = "TV Guide", description = "Groupes de chaînes et grille des programmes")
    ),
    info(
        title = "PMO TV Guide API",
        version = "1.0.0",
        description = "API REST pour les groupes de chaînes, les chaînes et le programme courant/suivant",
        license(
            name = "MIT",
        ),
    )
)]
pub struct ApiDoc;
