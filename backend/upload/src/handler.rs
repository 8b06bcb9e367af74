//! The submit handler.

use logging::redact_sensitive_data;
use prodsafe_core::{FormInput, Submission};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::client::AnalyzeClient;
use crate::page::Page;

/// What a submit put on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The form was incomplete; the validation message is shown, nothing was sent.
    Rejected,
    /// The report came back and was rendered.
    Rendered { markdown: String, html: String },
    /// The request failed; `message` is the text shown, `Error: ...`.
    Failed { message: String },
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Handles form submissions against a single analysis server.
///
/// `submit` holds the page mutably until the response is rendered, so one
/// page never has two submissions in flight. Separate pages may share a
/// handler and submit concurrently.
#[derive(Debug, Clone)]
pub struct UploadHandler {
    client: AnalyzeClient,
}

impl UploadHandler {
    pub fn new(client: AnalyzeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AnalyzeClient {
        &self.client
    }

    /// Run one submit cycle: validate, show the loader, post, render, hide
    /// the loader.
    pub async fn submit<P: Page + ?Sized>(&self, page: &mut P, form: FormInput) -> Outcome {
        let submission = match Submission::from_form(form) {
            Ok(submission) => submission,
            Err(e) => {
                debug!("Submission rejected: {e}");
                page.set_result_text(&e.to_string());
                return Outcome::Rejected;
            }
        };

        let span = info_span!(
            "submit",
            submission_id = %Uuid::new_v4(),
            file_name = %submission.image().file_name,
            bytes = submission.image().len(),
        );
        self.run(page, submission).instrument(span).await
    }

    async fn run<P: Page + ?Sized>(&self, page: &mut P, submission: Submission) -> Outcome {
        page.show_loader();
        page.clear_result();

        info!(endpoint = %self.client.endpoint(), "Submitting image for analysis");
        let outcome = match self.client.analyze(&submission).await {
            Ok(markdown) => {
                let html = markdown::to_html(&markdown);
                page.set_result_html(&html);
                info!(markdown_len = markdown.len(), "Analysis rendered");
                Outcome::Rendered { markdown, html }
            }
            Err(e) => {
                let message = format!("Error: {e}");
                warn!(error = %redact_sensitive_data(&e.to_string()), "Analysis failed");
                page.set_result_text(&message);
                Outcome::Failed { message }
            }
        };

        page.hide_loader();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryPage, PageOp, ResultContent};
    use crate::test_server::{dead_url, TestServer};
    use prodsafe_core::{ImageFile, VALIDATION_MESSAGE};

    fn label_jpeg() -> ImageFile {
        ImageFile::new("Kurkure.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02])
    }

    fn handler_for(url: &str) -> UploadHandler {
        // Loopback test servers must not be routed through an ambient proxy.
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        UploadHandler::new(AnalyzeClient::with_http_client(http, url).unwrap())
    }

    #[tokio::test]
    async fn empty_key_is_rejected_without_a_request() {
        let server = TestServer::json(200, r#"{"result": "unused"}"#, None).await;
        let mut page = MemoryPage::new();

        let outcome = handler_for(&server.url)
            .submit(&mut page, FormInput::new("", Some(label_jpeg())))
            .await;

        assert_eq!(outcome, Outcome::Rejected);
        assert!(server.requests().is_empty());
        assert_eq!(page.text(), Some(VALIDATION_MESSAGE));
        assert_eq!(page.history(), &[PageOp::Text(VALIDATION_MESSAGE.to_string())]);
    }

    #[tokio::test]
    async fn missing_file_is_rejected_without_a_request() {
        let server = TestServer::json(200, r#"{"result": "unused"}"#, None).await;
        let mut page = MemoryPage::new();

        let outcome = handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", None))
            .await;

        assert_eq!(outcome, Outcome::Rejected);
        assert!(server.requests().is_empty());
        assert!(!page.loader_visible());
        assert_eq!(page.text(), Some(VALIDATION_MESSAGE));
    }

    #[tokio::test]
    async fn posts_key_and_image_once() {
        let server = TestServer::json(200, r#"{"result": "ok"}"#, None).await;
        let mut page = MemoryPage::new();

        handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        let key = request.field("api_key").expect("api_key field");
        assert_eq!(key.data, b"abc");
        assert_eq!(key.file_name, None);

        let image = request.field("image").expect("image field");
        assert_eq!(image.file_name.as_deref(), Some("Kurkure.jpg"));
        assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(image.data, label_jpeg().data.to_vec());
    }

    #[tokio::test]
    async fn success_renders_markdown_as_html() {
        let mut page = MemoryPage::new();
        let server = TestServer::json(200, r#"{"result": "**bold**"}"#, Some(page.loader_flag())).await;

        let outcome = handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert!(outcome.is_rendered());
        let html = page.html().expect("html result");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!page.loader_visible());
        assert_eq!(server.requests()[0].loader_visible, Some(true));
        assert_eq!(
            page.history(),
            &[
                PageOp::ShowLoader,
                PageOp::Clear,
                PageOp::Html(html.to_string()),
                PageOp::HideLoader,
            ]
        );
        match outcome {
            Outcome::Rendered { markdown, .. } => assert_eq!(markdown, "**bold**"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_error_surfaces_server_message() {
        let mut page = MemoryPage::new();
        let server = TestServer::json(400, r#"{"error": "bad key"}"#, Some(page.loader_flag())).await;

        let outcome = handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert_eq!(
            outcome,
            Outcome::Failed {
                message: "Error: bad key".to_string()
            }
        );
        assert_eq!(page.text(), Some("Error: bad key"));
        assert_eq!(server.requests()[0].loader_visible, Some(true));
        assert!(!page.loader_visible());
    }

    #[tokio::test]
    async fn server_error_without_json_uses_fallback() {
        let server = TestServer::html(500, "<h1>Internal Server Error</h1>").await;
        let mut page = MemoryPage::new();

        handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert_eq!(page.text(), Some("Error: An error occurred."));
        assert!(!page.loader_visible());
    }

    #[tokio::test]
    async fn server_error_without_error_field_uses_fallback() {
        let server = TestServer::json(500, r#"{"detail": "boom"}"#, None).await;
        let mut page = MemoryPage::new();

        handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert_eq!(page.text(), Some("Error: An error occurred."));
    }

    #[tokio::test]
    async fn malformed_success_body_is_an_error() {
        let server = TestServer::html(200, "not json").await;
        let mut page = MemoryPage::new();

        let outcome = handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        let Outcome::Failed { message } = outcome else { panic!("expected failure") };
        assert!(message.starts_with("Error: invalid JSON in response"));
        assert!(!page.loader_visible());
    }

    #[tokio::test]
    async fn success_without_result_is_an_error() {
        let server = TestServer::json(200, r#"{"status": "done"}"#, None).await;
        let mut page = MemoryPage::new();

        handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert_eq!(page.text(), Some("Error: response did not include a result"));
    }

    #[tokio::test]
    async fn network_failure_is_reported_and_loader_hidden() {
        let url = dead_url().await;
        let mut page = MemoryPage::new();

        let outcome = handler_for(&url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert!(matches!(outcome, Outcome::Failed { .. }));
        assert!(page.text().unwrap().starts_with("Error: "));
        assert_eq!(page.history().first(), Some(&PageOp::ShowLoader));
        assert_eq!(page.history().last(), Some(&PageOp::HideLoader));
    }

    #[tokio::test]
    async fn resubmit_clears_previous_result() {
        let server = TestServer::json(500, "{}", None).await;
        let mut page = MemoryPage::new();
        page.set_result_html("<p>previous report</p>");

        handler_for(&server.url)
            .submit(&mut page, FormInput::new("abc", Some(label_jpeg())))
            .await;

        assert_eq!(
            page.result(),
            &ResultContent::Text("Error: An error occurred.".to_string())
        );
        assert_eq!(page.history()[2], PageOp::Clear);
    }

    #[tokio::test]
    async fn pages_submit_concurrently_through_one_handler() {
        let server = TestServer::json(200, r#"{"result": "- fine"}"#, None).await;
        let handler = handler_for(&server.url);
        let mut first = MemoryPage::new();
        let mut second = MemoryPage::new();

        let (a, b) = tokio::join!(
            handler.submit(&mut first, FormInput::new("abc", Some(label_jpeg()))),
            handler.submit(&mut second, FormInput::new("abc", Some(label_jpeg()))),
        );

        assert!(a.is_rendered() && b.is_rendered());
        assert_eq!(server.requests().len(), 2);
        assert!(first.html().unwrap().contains("<li>fine</li>"));
    }
}
