//! Inquiry-related API types

use lumen_core::{Inquiry, InquiryId, InquiryStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Public contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Service the visitor is interested in
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

impl CreateInquiryRequest {
    /// New inquiries always start in the `new` status.
    pub fn into_inquiry(self, now: Timestamp) -> Inquiry {
        Inquiry {
            id: InquiryId::generate(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            service: self.service.filter(|s| !s.trim().is_empty()),
            message: self.message.trim().to_string(),
            status: InquiryStatus::New,
            created_at: now,
        }
    }
}

/// Query for listing inquiries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListInquiriesRequest {
    pub status: Option<InquiryStatus>,
    pub search: Option<String>,
}

/// Response containing a list of inquiries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListInquiriesResponse {
    pub inquiries: Vec<Inquiry>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_submission_starts_as_new() {
        let inquiry = CreateInquiryRequest {
            name: " Sam ".to_string(),
            email: "sam@example.com".to_string(),
            phone: Some(" ".to_string()),
            service: Some("Retrofit".to_string()),
            message: "Quote please".to_string(),
        }
        .into_inquiry(Utc::now());

        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(inquiry.name, "Sam");
        assert_eq!(inquiry.phone, None);
        assert!(inquiry.validate().is_ok());
    }
}
