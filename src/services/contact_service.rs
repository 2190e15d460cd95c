use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::contact::{ContactReceipt, ContactRequest},
    error::AppResult,
    response::ApiResponse,
    validation::{validate_email, validate_message, validate_name, validate_phone, validate_subject},
};

/// Validates a contact message and acknowledges it. Messages are only logged.
pub fn submit_contact(payload: ContactRequest) -> AppResult<ApiResponse<ContactReceipt>> {
    validate_name(&payload.name)?;
    validate_phone(&payload.phone)?;
    validate_email(payload.email.trim())?;
    validate_subject(&payload.subject)?;
    validate_message(&payload.message)?;

    let receipt = ContactReceipt {
        reference: Uuid::new_v4(),
        received_at: Utc::now(),
    };
    tracing::info!(
        reference = %receipt.reference,
        email = %payload.email.trim(),
        subject = %payload.subject.trim(),
        "contact message received"
    );
    Ok(ApiResponse::success("Message sent", receipt, None))
}
