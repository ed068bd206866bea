//! Wire-shape DTOs private to the HTTP adapter.

use serde::{Deserialize, Serialize};

use crate::domain::Identity;

/// Login success payload: the server names the identity field `userId`
/// here, unlike every other endpoint. Normalised before the domain sees it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginIdentityDto {
    user_id: String,
    name: String,
    email: String,
}

impl From<LoginIdentityDto> for Identity {
    fn from(value: LoginIdentityDto) -> Self {
        let LoginIdentityDto {
            user_id,
            name,
            email,
        } = value;
        Self {
            id: user_id,
            name,
            email,
        }
    }
}

/// Body of the delete-link request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteLinkRequest<'a> {
    pub(crate) id: &'a str,
}
