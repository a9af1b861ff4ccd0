use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, ShareRequest, ShareResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/share", web::post().to(share_gift));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Share a gift theme by email
///
/// POST /api/share
///
/// Only validates the request; the email preview is rendered client-side and
/// nothing is delivered.
async fn share_gift(body: web::Bytes) -> impl Responder {
    let request: ShareRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Error in share request: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to process request".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if !request.has_required_fields() {
        return bad_request(
            "Missing required fields",
            "recipientEmail and giftTheme are required".to_string(),
        );
    }

    if let Err(errors) = request.validate() {
        tracing::info!("Share request rejected: {}", errors);
        return bad_request("Invalid email address", errors.to_string());
    }

    tracing::debug!(
        products = request.products().len(),
        "Share preview accepted for theme {:?}",
        request.gift_theme
    );

    HttpResponse::Ok().json(ShareResponse {
        success: true,
        message: "Email preview generated successfully".to_string(),
        preview_url: None,
    })
}
