#![forbid(unsafe_code)]

use poem::{handler, IntoResponse, Response};
use poem::http::StatusCode;
use poem::web::{Data, Html, Json};
use tera::Tera;
use log::error;

use crate::utils::errors::HttpResult;
use crate::utils::templates::{render_index, PAGE_TITLE};

// ------------------- HTTP Status Codes -------------------
fn make_http_500(msg: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(HttpResult::new(500.to_string(), msg))).into_response()
}

// ***************************************************************************
//                                 Endpoint
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_index:
// ---------------------------------------------------------------------------
/** Render the chat page with no exchange embedded. */
#[handler]
pub async fn get_index(tera: Data<&Tera>) -> Response {
    match render_index(&tera, PAGE_TITLE, None, None) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            let msg = "ERROR: ".to_owned() + e.to_string().as_str();
            error!("{}", msg);
            make_http_500(msg)
        }
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

    #[tokio::test]
    async fn index_renders_page_without_echo() {
        let app = build_app(default_templates(), "Chat Server", "http://localhost:5000/v1");
        let req = Request::builder()
            .method(Method::GET)
            .uri(Uri::from_static("/"))
            .finish();
        let resp = app.get_response(req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().into_string().await.expect("body should be readable");
        assert!(body.contains("Chat Server"));
        assert!(!body.contains("You said:"));
    }
}
