//! HTTP client for the academy backend.

use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::types::{Category, CategoryPage, ContactMessage, Course, CourseDetail, RegistrationForm};

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the backend origin without a trailing slash, e.g.
    /// `https://api.skillwave.uz`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Like [`ApiClient::new`], but falls back to a default-configured
    /// client when the builder fails. For app shells that have no error
    /// channel at startup.
    pub fn new_or_default(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        match Self::new(base_url.clone()) {
            Ok(client) => client,
            Err(_) => Self {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            },
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List courses, optionally filtered by category slug.
    pub async fn courses(
        &self,
        lang: &str,
        category: Option<&str>,
    ) -> Result<Vec<Course>, ApiError> {
        let path = match category {
            Some(slug) => format!("/api/courses/?category={slug}"),
            None => "/api/courses/".to_string(),
        };
        let env: Envelope<Vec<Course>> = self.get(lang, &path).await?;
        Ok(env.data.unwrap_or_default())
    }

    pub async fn categories(&self, lang: &str) -> Result<Vec<Category>, ApiError> {
        let env: Envelope<CategoryPage> = self.get(lang, "/api/categories/").await?;
        Ok(env.data.map(|page| page.results).unwrap_or_default())
    }

    pub async fn course_detail(&self, lang: &str, slug: &str) -> Result<CourseDetail, ApiError> {
        let env: Envelope<CourseDetail> = self.get(lang, &format!("/api/courses/{slug}/")).await?;
        env.data.ok_or(ApiError::Rejected)
    }

    pub async fn submit_contact(
        &self,
        lang: &str,
        message: &ContactMessage,
    ) -> Result<(), ApiError> {
        self.post_expecting_success(lang, "/api/contact/", &serde_json::to_value(message)?)
            .await
    }

    pub async fn subscribe(&self, lang: &str, email: &str) -> Result<(), ApiError> {
        self.post_expecting_success(lang, "/api/subscribe/", &json!({ "email": email }))
            .await
    }

    /// Ask the backend to text a one-time code to `phone` (digits only, no
    /// leading `+`).
    pub async fn request_otp(&self, lang: &str, phone: &str) -> Result<(), ApiError> {
        self.post_expecting_success(lang, "/api/request-otp/", &json!({ "phone": phone }))
            .await
    }

    /// Check a 6-digit code against the backend. Succeeds only when the
    /// backend both reports success and confirms `verified: true`.
    pub async fn verify_otp(&self, lang: &str, phone: &str, code: &str) -> Result<(), ApiError> {
        #[derive(Clone, Debug, Default, Deserialize)]
        struct VerifyData {
            #[serde(default)]
            verified: bool,
        }

        let body = json!({ "phone": phone, "otp_code": code });
        let response = self
            .client
            .post(format!("{}/api/verify-otp/", self.base_url))
            .header(ACCEPT_LANGUAGE, lang)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<Envelope<VerifyData>>(&bytes) {
            Ok(env) if env.is_success() && env.data.clone().unwrap_or_default().verified => Ok(()),
            Ok(env) => Err(failure_error(&env)),
            Err(_) => Err(ApiError::Status(status)),
        }
    }

    /// Submit the completed registration draft as a multipart form. A 2xx
    /// with no parseable `success` field is treated as success, matching the
    /// backend's observed behaviour.
    pub async fn register(&self, lang: &str, form: &RegistrationForm) -> Result<(), ApiError> {
        let image = Part::bytes(form.passport_image.bytes.clone())
            .file_name(form.passport_image.file_name.clone())
            .mime_str(&form.passport_image.mime_type)?;

        let mut multipart = Form::new()
            .text("course", form.course.to_string())
            .text("first_name", form.first_name.clone())
            .text("last_name", form.last_name.clone())
            .text("middle_name", form.middle_name.clone())
            .text("birth_date", form.birth_date.clone())
            .text("phone", form.phone.clone())
            .text("email", form.email.clone())
            .text("passport_series", form.passport_series.clone())
            .text("passport_number", form.passport_number.clone())
            .text("pinfl", form.pinfl.clone())
            .part("passport_image", image);
        if let Some(handle) = form.telegram_username.as_ref().filter(|h| !h.is_empty()) {
            multipart = multipart.text("telegram_username", handle.clone());
        }

        let response = self
            .client
            .post(format!("{}/api/register/", self.base_url))
            .header(ACCEPT_LANGUAGE, lang)
            .multipart(multipart)
            .send()
            .await?;

        let ok = response.status().is_success();
        let status = response.status().as_u16();
        let bytes = response.bytes().await.unwrap_or_default();
        match serde_json::from_slice::<Envelope<Value>>(&bytes) {
            Ok(env) if env.is_success() => Ok(()),
            Ok(env) => Err(failure_error(&env)),
            Err(_) if ok => Ok(()),
            Err(_) => Err(ApiError::Status(status)),
        }
    }

    async fn get<T: DeserializeOwned>(&self, lang: &str, path: &str) -> Result<Envelope<T>, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(ACCEPT_LANGUAGE, lang)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<Envelope<T>>(&bytes) {
            Ok(env) if env.is_success() => Ok(env),
            Ok(env) => Err(failure_error(&env)),
            Err(_) => Err(ApiError::Status(status)),
        }
    }

    async fn post_expecting_success(
        &self,
        lang: &str,
        path: &str,
        body: &Value,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(ACCEPT_LANGUAGE, lang)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<Envelope<Value>>(&bytes) {
            Ok(env) if env.is_success() => Ok(()),
            Ok(env) => Err(failure_error(&env)),
            Err(_) => Err(ApiError::Status(status)),
        }
    }
}

fn failure_error<T>(env: &Envelope<T>) -> ApiError {
    match env.error_message() {
        Some(message) => ApiError::server(message),
        None => ApiError::Rejected,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    Ok(client)
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Result<reqwest::Client, ApiError> {
    // The browser owns timeouts and TLS on wasm.
    Ok(reqwest::Client::new())
}
