use serde::Deserialize;

use crate::errors::AppError;
use crate::models::wrapped::{NewWrapped, DEFAULT_EMOJI};

/// Upper bound on submitted `html_content`, in UTF-16 code units (the length a
/// browser reports for the string).
pub const MAX_HTML_CONTENT_LEN: usize = 500_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Body of `POST /api/wrappeds` as received. Every field is optional here so
/// that missing ones surface as a single 400 from `validate`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWrappedRequest {
    pub names: Option<String>,
    pub date_range: Option<String>,
    pub emoji: Option<String>,
    pub gradient: Option<String>,
    pub html_content: Option<String>,
    pub visibility: Option<Visibility>,
}

impl CreateWrappedRequest {
    pub fn validate(self) -> Result<NewWrapped, AppError> {
        let (Some(names), Some(date_range), Some(html_content)) = (
            non_empty(self.names),
            non_empty(self.date_range),
            non_empty(self.html_content),
        ) else {
            return Err(AppError::Validation(
                "names, date_range, and html_content are required".to_string(),
            ));
        };

        if html_content.encode_utf16().count() > MAX_HTML_CONTENT_LEN {
            return Err(AppError::Validation(format!(
                "html_content exceeds {MAX_HTML_CONTENT_LEN} character limit"
            )));
        }

        Ok(NewWrapped {
            names,
            date_range,
            emoji: non_empty(self.emoji).unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            gradient: non_empty(self.gradient),
            html_content,
            is_public: self.visibility.unwrap_or_default() == Visibility::Public,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
