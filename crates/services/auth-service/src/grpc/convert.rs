//! Wire <-> domain conversion for the `Register` operation.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

use domain::{DomainResult, NewUser, User};
use proto::user::{RegisterRequest, User as UserProto};

/// Build a prepared user candidate from a register request.
///
/// Copies the request fields, then runs domain preparation (id, password hash,
/// timestamps). Nothing is returned unless preparation succeeds.
pub fn register_request_to_user(req: RegisterRequest) -> DomainResult<User> {
    let candidate = NewUser {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        role: req.role,
        avatar: req.avatar,
        password: req.password,
    };

    User::prepare_create(candidate)
}

/// Convert a canonical domain user into its wire form.
///
/// Fields are copied verbatim, password hash included.
pub fn user_model_to_proto(user: &User) -> UserProto {
    UserProto {
        uuid: user.user_id.to_string(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        password: user.password.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
        avatar: user.avatar.clone(),
        created_at: Some(to_timestamp(user.created_at)),
        updated_at: Some(to_timestamp(user.updated_at)),
    }
}

fn to_timestamp(dt: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}
