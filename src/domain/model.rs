use crate::utils::error::{ContactError, Result};
use crate::utils::validation::is_blank;
use serde::{Deserialize, Serialize};

pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// A contact message as entered on the site. Lives only for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// Build a submission, rejecting blank fields. Values are kept as typed.
    pub fn parse(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        let submission = Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        };

        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(ContactError::missing_fields(missing));
        }
        Ok(submission)
    }

    /// 從任意 JSON 取出三個欄位；缺少、null、非字串或空白都算缺欄位
    ///
    /// A bare `null` body has no fields to read at all and is treated as a
    /// broken request rather than an incomplete one.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Err(ContactError::UnexpectedError {
                message: "Request body is JSON null".to_string(),
            });
        }

        let field = |key: &str| {
            value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .filter(|v| !is_blank(v))
        };

        match (field("name"), field("email"), field("message")) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name: name.to_string(),
                email: email.to_string(),
                message: message.to_string(),
            }),
            _ => Err(ContactError::missing_fields(
                REQUIRED_FIELDS.into_iter().filter(|key| field(*key).is_none()),
            )),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&self.name, &self.email, &self.message)
    }
}

/// Names of the required fields that are blank, in declaration order.
pub fn blank_fields(name: &str, email: &str, message: &str) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .zip([name, email, message])
        .filter(|(_, value)| is_blank(value))
        .map(|(key, _)| key)
        .collect()
}

/// Body of every `/api/contact` response: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// What a remote HTTP service answered: status code and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReply {
    pub status: u16,
    pub body: String,
}

impl RemoteReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
