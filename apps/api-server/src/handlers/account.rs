//! Account management handlers - profile, password, deletion.

use actix_web::{HttpResponse, web};

use quill_core::service::UpdateProfile;
use quill_shared::dto::{
    ChangePasswordRequest, DeleteAccountRequest, UpdateProfileRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// PATCH /api/account/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .accounts
        .update_profile(
            identity.user_id,
            UpdateProfile {
                email: req.email,
                display_name: req.display_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
        bio: user.bio,
        created_at: user.created_at,
    }))
}

/// PUT /api/account/password
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state
        .accounts
        .change_password(identity.user_id, &req.current_password, &req.new_password)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/account
///
/// The current password confirms intent; the posts cascade goes with the
/// account.
pub async fn delete_account(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<DeleteAccountRequest>,
) -> AppResult<HttpResponse> {
    state
        .accounts
        .delete_account(identity.user_id, &body.password)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
