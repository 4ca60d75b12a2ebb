use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::auth::AppState;
use crate::error::ApiError;

/// Extract and validate the bearer JWT, then expose the caller as a
/// `CurrentUser` request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::InvalidToken)?;

    let user = state.tokens.verify(bearer.token())?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
