use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageGenerationService;
use crate::image_ref::ImageRef;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

/// Returns the first inline image across all candidates and parts, in order.
///
/// Text parts, unknown parts and inline parts with an empty payload are
/// skipped. A missing media type is reported as `image/png`.
pub fn extract_image(response: &GenerateContentResponse) -> Result<ImageRef> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .find_map(|part| match part {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => Some(
                ImageRef::new(inline_data.mime_type.clone(), inline_data.data.clone()),
            ),
            _ => None,
        })
        .ok_or(Error::NoImageInResponse)
}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self::from_http(GeminiHttpClient::new_with_client(
            api_key,
            model,
            Duration::from_secs(120),
            client,
        ))
    }

    pub fn from_http(http: GeminiHttpClient) -> Self {
        Self { http }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&ImageRef>,
    ) -> Result<ImageRef> {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(reference) = reference {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: reference.mime_type().to_string(),
                    data: reference.payload().to_string(),
                },
            });
        }

        let request = ImageRequest {
            contents: vec![Content { role: None, parts }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                }),
            },
        };

        tracing::debug!(
            "Requesting image from {} ({} prompt chars, reference: {})",
            self.http.model(),
            prompt.len(),
            reference.is_some()
        );

        let gemini_response: GenerateContentResponse = self.http.generate_content(&request).await?;
        let image = extract_image(&gemini_response)?;

        tracing::debug!("Gemini returned image with mime_type: {}", image.mime_type());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

    fn make_client(server: &MockServer, api_key: &str, model: &str) -> GeminiImageClient {
        GeminiImageClient::new(api_key.to_string(), model.to_string()).with_base_url(server.uri())
    }

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_skips_text_parts() {
        let parsed = response(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your tattoo" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } },
                        { "inlineData": { "mimeType": "image/png", "data": "BBBB" } }
                    ]
                }
            }]
        }));

        let image = extract_image(&parsed).unwrap();
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_extract_searches_later_candidates() {
        let parsed = response(serde_json::json!({
            "candidates": [
                { "finishReason": "SAFETY" },
                { "content": { "parts": [{ "text": "only words" }] } },
                { "content": { "parts": [{ "inlineData": { "mimeType": "image/webp", "data": "CCCC" } }] } }
            ]
        }));

        let image = extract_image(&parsed).unwrap();
        assert_eq!(image.mime_type(), "image/webp");
        assert_eq!(image.payload(), "CCCC");
    }

    #[test]
    fn test_extract_defaults_missing_mime_type() {
        let parsed = response(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "DDDD" } }] } }]
        }));

        assert_eq!(
            extract_image(&parsed).unwrap().to_data_uri(),
            "data:image/png;base64,DDDD"
        );
    }

    #[test]
    fn test_extract_ignores_empty_payloads_and_unknown_parts() {
        let parsed = response(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "" } },
                        { "functionCall": { "name": "noop" } }
                    ]
                }
            }]
        }));

        assert!(matches!(
            extract_image(&parsed),
            Err(Error::NoImageInResponse)
        ));
    }

    #[test]
    fn test_extract_fails_without_candidates() {
        let parsed = response(serde_json::json!({}));
        assert!(matches!(
            extract_image(&parsed),
            Err(Error::NoImageInResponse)
        ));
    }

    #[tokio::test]
    async fn test_generate_image_returns_data_uri() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(header("x-goog-api-key", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" }
                        }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "key", DEFAULT_MODEL);
        let image = client.generate_image("a koi fish", None).await.unwrap();
        assert_eq!(image.to_data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn test_request_uses_square_aspect_ratio_and_image_modality() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_string_contains("\"aspectRatio\":\"1:1\""))
            .and(body_string_contains("\"responseModalities\":[\"IMAGE\"]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AA==" } }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "key", DEFAULT_MODEL);
        client.generate_image("test", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_reference_is_sent_as_second_part_without_prefix() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_string_contains(
                "\"parts\":[{\"text\":\"apply it\"},{\"inlineData\":{\"mimeType\":\"image/png\",\"data\":\"REFDATA\"}}]",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "OUT" } }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "key", DEFAULT_MODEL);
        let reference = ImageRef::parse("data:image/png;base64,REFDATA");
        let image = client
            .generate_image("apply it", Some(&reference))
            .await
            .unwrap();
        assert_eq!(image.payload(), "OUT");
    }

    #[tokio::test]
    async fn test_model_prefix_is_stripped_from_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AA==" } }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "key", "models/gemini-2.5-flash-image");
        client.generate_image("test", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = make_client(&server, "key", DEFAULT_MODEL);
        let err = client.generate_image("a rose", None).await.unwrap_err();
        match err {
            Error::AiProvider(message) => assert!(message.contains("quota exceeded")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_text_only_response_is_no_image_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "I cannot draw that" }] }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "key", DEFAULT_MODEL);
        let err = client.generate_image("a rose", None).await.unwrap_err();
        assert!(matches!(err, Error::NoImageInResponse));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = make_client(&server, "key", DEFAULT_MODEL);
        let err = client.generate_image("a rose", None).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
