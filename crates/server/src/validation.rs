use aide::{gen::GenContext, openapi::Operation, operation::OperationInput};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    Json,
};
use derive_more::{Display, Error};
use validator::{Validate, ValidationErrors};

use crate::error::json_error;

/// Errors related to JSON validation.
#[derive(Debug, Display, Error)]
pub enum ValidatedJsonRejection {
    /// Unable to parse a JSON value.
    JsonParsingError(JsonRejection),

    /// Unable to validate a JSON value.
    ValidationError(ValidationErrors),
}

json_error!(ValidatedJsonRejection {
    ValidatedJsonRejection::JsonParsingError(_) => StatusCode::UNPROCESSABLE_ENTITY,
    ValidatedJsonRejection::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
});

/// Wrapper for [`axum`] JSON value validation.
///
/// Equivalent to the [`axum`]'s [`Json`] struct
/// with [`validator`] crate support.
///
/// [`JSON`]: axum::extract::Json
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: Validate,
    B: Send + 'static,
    S: Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonParsingError)?;

        match value.validate() {
            Ok(_) => Ok(ValidatedJson(value)),
            Err(err) => Err(ValidatedJsonRejection::ValidationError(err)),
        }
    }
}

impl<T> OperationInput for ValidatedJson<T>
where
    Json<T>: OperationInput,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<T>::operation_input(ctx, operation);
    }
}
