mod auth;
mod error;
mod handlers;
mod schema;
mod validation;
mod verification;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use aide::{
    axum::ApiRouter,
    openapi::{Info, OpenApi},
};
use axum::{middleware::from_fn_with_state, routing::get, Extension, Router, Server};
use common::{
    checkout::{CheckoutProvider, StripeCheckout},
    config::Config,
    identity::{FirebaseVerifier, TokenVerifier},
    logging,
};
use db::{Database, DatabaseConnection};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// External capabilities the API server calls into.
#[derive(Clone)]
pub(crate) struct Services {
    /// Hosted checkout provider.
    pub checkout: Arc<dyn CheckoutProvider>,

    /// Bearer token verifier, token checks are skipped when absent.
    pub identity: Option<Arc<dyn TokenVerifier>>,
}

impl Services {
    fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let Some(checkout_config) = config.checkout.as_ref() else {
            return Err(anyhow::Error::msg("unable to load checkout config"));
        };

        let identity = match config.identity.as_ref() {
            Some(identity_config) => {
                Some(Arc::new(FirebaseVerifier::new(identity_config)) as Arc<dyn TokenVerifier>)
            }
            None => {
                warn!("identity config is missing, protected routes are served without token verification");
                None
            }
        };

        Ok(Self {
            checkout: Arc::new(StripeCheckout::new(checkout_config)),
            identity,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::new()?;

    logging::init(&config);

    let Some(server_config) = config.server.as_ref() else {
        return Err(anyhow::Error::msg("unable to load server config"));
    };

    let services = Services::from_config(&config)?;

    info!("connecting to database");
    let database = Arc::new(Database::connect(&config.database.url).await?);

    info!(address = %server_config.address, "starting api server");
    Server::bind(&server_config.address)
        .serve(app_router(database, services).into_make_service())
        .await?;

    Ok(())
}

async fn index() -> &'static str {
    "zapshift is running"
}

fn app_router(database: Arc<DatabaseConnection>, services: Services) -> Router {
    let mut api = OpenApi {
        info: Info {
            title: String::from("zapshift"),
            description: Some(String::from("Parcel delivery booking API.")),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    let mut protected_routes = ApiRouter::new()
        .merge(handlers::payments::protected_routes())
        .merge(handlers::users::routes())
        .merge(handlers::riders::routes());

    if let Some(verifier) = services.identity {
        protected_routes =
            protected_routes.route_layer(from_fn_with_state(verifier, auth::require_token));
    }

    ApiRouter::new()
        .route("/", get(index))
        .merge(handlers::parcels::routes())
        .merge(handlers::payments::routes())
        .merge(protected_routes)
        .merge(handlers::docs::routes())
        .finish_api(&mut api)
        .layer(Extension(Arc::new(api)))
        .layer(Extension(services.checkout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(database)
}
