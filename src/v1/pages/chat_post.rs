#![forbid(unsafe_code)]

use poem::{handler, IntoResponse, Request, Response};
use poem::http::StatusCode;
use poem::web::{Data, Form, Html, Json};
use serde::Deserialize;
use tera::Tera;
use anyhow::Result;
use log::{error, info};

use crate::utils::chat_utils::{self, RequestDebug};
use crate::utils::errors::{Errors, HttpResult};
use crate::utils::generator::generate_response;
use crate::utils::templates::{render_index, PAGE_TITLE};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// The form field carrying the user's message.
const USER_INPUT_FIELD : &str = "user_input";

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
#[derive(Debug, Deserialize)]
pub struct ReqChat
{
    user_input: Option<String>,
}

// The transient exchange rendered back to the client.
pub struct RespChat
{
    user_input: String,
    bot_response: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqChat {
    type Req = ReqChat;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    user_input: ");
        match &self.user_input {
            Some(u) => s.push_str(u),
            None => s.push_str("<missing>"),
        }
        s
    }
}

// ------------------- HTTP Status Codes -------------------
fn make_http_400(msg: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(HttpResult::new(400.to_string(), msg))).into_response()
}
fn make_http_500(msg: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(HttpResult::new(500.to_string(), msg))).into_response()
}

// ***************************************************************************
//                                 Endpoint
// ***************************************************************************
// ---------------------------------------------------------------------------
// post_chat:
// ---------------------------------------------------------------------------
/** Accept a chat form submission, generate the echo response and render the
 * page with the exchange embedded.  A submission without the user_input field
 * gets an explicit 400 naming the field rather than whatever default the
 * framework would produce.
 */
#[handler]
pub async fn post_chat(http_req: &Request, tera: Data<&Tera>, req: Form<ReqChat>) -> Response {
    // -------------------- Get Required Field -------------------
    let user_input = match &req.user_input {
        Some(u) => u.clone(),
        None => {
            let msg = format!("{}", Errors::MissingFormField(USER_INPUT_FIELD.to_string()));
            error!("{}", msg);
            return make_http_400(msg);
        }
    };

    // -------------------- Process Request ----------------------
    match RespChat::process(http_req, &req, user_input, &tera) {
        Ok(r) => r,
        Err(e) => {
            let msg = "ERROR: ".to_owned() + e.to_string().as_str();
            error!("{}", msg);
            make_http_500(msg)
        }
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespChat {
    /// Create a new exchange.
    fn new(user_input: String, bot_response: String) -> Self {
        Self { user_input, bot_response }
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqChat, user_input: String, tera: &Tera) -> Result<Response> {
        // Conditional logging depending on log level.
        chat_utils::debug_request(http_req, req);

        // The exchange exists only for the duration of this request.
        let bot_response = generate_response(&user_input);
        let resp = Self::new(user_input, bot_response);

        // Render the page with both sides of the exchange embedded.
        let page = render_index(tera, PAGE_TITLE,
                                Some(&resp.user_input), Some(&resp.bot_response))?;
        info!("Served chat exchange for {} input characters.", resp.user_input.chars().count());

        Ok(Html(page).into_response())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::Endpoint;
    use poem::http::{Method, StatusCode, Uri};
    use poem::Request;

    use crate::build_app;
    use crate::utils::templates::default_templates;

    const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

    fn chat_request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/chat"))
            .content_type(FORM_CONTENT_TYPE)
            .body(body)
    }

    #[tokio::test]
    async fn chat_echoes_input_with_prefix() {
        let app = build_app(default_templates(), "Chat Server", "http://localhost:5000/v1");
        let resp = app.get_response(chat_request("user_input=test")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().into_string().await.expect("body should be readable");
        assert!(body.contains("test"));
        assert!(body.contains("You said: test"));
    }

    #[tokio::test]
    async fn chat_accepts_empty_input() {
        let app = build_app(default_templates(), "Chat Server", "http://localhost:5000/v1");
        let resp = app.get_response(chat_request("user_input=")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().into_string().await.expect("body should be readable");
        assert!(body.contains("You said: "));
    }

    #[tokio::test]
    async fn chat_rejects_missing_field() {
        let app = build_app(default_templates(), "Chat Server", "http://localhost:5000/v1");
        let resp = app.get_response(chat_request("other_field=x")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = resp.into_body().into_string().await.expect("body should be readable");
        assert!(body.contains("user_input"));
    }
}
