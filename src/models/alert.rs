use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "telegram_chat_id")]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl AlertRequest {
    pub fn email_destination(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    pub fn chat_destination(&self) -> Option<&str> {
        non_blank(self.chat_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
