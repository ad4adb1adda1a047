#![allow(dead_code)]
use utoipa::OpenApi;

use crate::models::{
    ListQuery, RegisterRequest, RegisterResponse, Registration, RegistrationListResponse,
};

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterRequest, example = json!({
        "name": "Ana Ruiz",
        "email": "ana@example.com",
        "message": "Looking forward to the keynote"
    })),
    responses(
        (status = 201, description = "Registration stored", body = RegisterResponse,
         example = json!({
             "success": true,
             "message": "Registration received. See you at the summit!",
             "email": "ana@example.com",
             "id": 1
         })
        ),
        (status = 400, description = "Missing fields or invalid email", body = RegisterResponse,
         example = json!({
             "success": false,
             "message": "Please enter a valid email address.",
             "error": "invalid_email"
         })
        ),
        (status = 409, description = "Email already registered", body = RegisterResponse,
         example = json!({
             "success": false,
             "message": "This email is already registered.",
             "error": "email_already_registered"
         })
        ),
        (status = 500, description = "Database unavailable or storage failure", body = RegisterResponse,
         example = json!({
             "success": false,
             "message": "Registration is temporarily unavailable. Please try again later.",
             "error": "database_unavailable"
         })
        )
    ),
    tag = "Registration"
)]
fn doc_register_handler() {}

#[utoipa::path(
    get,
    path = "/registrations",
    params(ListQuery),
    responses(
        (status = 200, description = "All registrations, newest first", body = RegistrationListResponse),
        (status = 401, description = "Missing or wrong access key"),
        (status = 404, description = "Listing is not enabled on this server"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Registration"
)]
fn doc_list_registrations_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_register_handler,
        doc_list_registrations_handler,
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            Registration,
            RegistrationListResponse,
        )
    ),
    tags(
        (name = "Registration", description = "Event registration API")
    ),
    servers(
        (url = "/api", description = "Summit registration API server")
    )
)]
pub struct RegistrationApiDoc;
