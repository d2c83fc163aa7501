use std::{convert::Infallible, sync::Arc};

use aide::operation::OperationInput;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    headers::{authorization::Bearer, Authorization},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::Response,
    TypedHeader,
};
use common::identity::{IdentityError, TokenVerifier, VerifiedIdentity};
use derive_more::{Display, Error, From};
use tracing::debug;

use crate::error::json_error;

#[derive(Debug, Display, From, Error)]
pub(super) enum AuthenticationError {
    Identity(IdentityError),

    #[display(fmt = "unauthorized access")]
    Unauthorized,
}

json_error!(AuthenticationError {
    AuthenticationError::Unauthorized => StatusCode::UNAUTHORIZED,
});

/// Verify the bearer token and attach the resolved identity to the request.
pub(super) async fn require_token<B>(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<B>,
    next: Next<B>,
) -> Result<Response, AuthenticationError> {
    let Some(TypedHeader(authorization)) = authorization else {
        return Err(AuthenticationError::Unauthorized);
    };

    let identity = match verifier.verify(authorization.token()).await {
        Ok(identity) => identity,
        Err(IdentityError::InvalidToken) => return Err(AuthenticationError::Unauthorized),
        Err(err) => return Err(err.into()),
    };

    debug!(uid = %identity.uid, "bearer token verified");

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Identity attached by [`require_token`].
///
/// Holds [`None`] on routes served without token verification.
pub(crate) struct CurrentIdentity(pub Option<VerifiedIdentity>);

impl CurrentIdentity {
    /// Check that the verified identity, if any, owns the provided email.
    pub(crate) fn permits(&self, email: &str) -> bool {
        match &self.0 {
            Some(identity) => identity.email.as_deref() == Some(email),
            None => true,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<VerifiedIdentity>().cloned()))
    }
}

impl OperationInput for CurrentIdentity {}
