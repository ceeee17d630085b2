//! OpenAPI document for the account and student routes.

use crate::error::{ErrorBody, ErrorDetail};
use crate::models::{AccountOut, Credentials, Student, StudentInput};
use crate::response::MessageBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "student-registry"),
    paths(
        crate::handlers::accounts::register,
        crate::handlers::accounts::login,
        crate::handlers::students::create,
        crate::handlers::students::list,
        crate::handlers::students::read,
        crate::handlers::students::update,
        crate::handlers::students::delete,
    ),
    components(schemas(
        AccountOut,
        Credentials,
        Student,
        StudentInput,
        MessageBody,
        ErrorBody,
        ErrorDetail
    ))
)]
pub struct ApiDoc;
