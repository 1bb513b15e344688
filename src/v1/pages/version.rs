#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json, Object };
use poem::Error;

// From cargo.toml.
const CHAT_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct VersionApi;

#[derive(Object)]
struct RespVersion
{
    result_code: String,
    result_msg: String,
    server_version: String,
    git_branch: String,
    git_commit: String,
    git_dirty: String,
    source_ts: String,
    rustc_version: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl VersionApi {
    #[oai(path = "/version", method = "get")]
    async fn get_version(&self) -> Json<RespVersion> {
        let resp = match RespVersion::process() {
            Ok(r) => r,
            Err(e) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                RespVersion::new("1", msg.as_str(), "", "", "", "", "", "",)},
        };

        Json(resp)
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespVersion {
    #[allow(clippy::too_many_arguments)]
    fn new(result_code: &str, result_msg: &str, server: &str, branch: &str, commit: &str, dirty: &str, ts: &str, rustc: &str)
    -> Self {
        Self {result_code: result_code.to_string(),
              result_msg: result_msg.to_string(),
              server_version: server.to_string(),
              git_branch: branch.to_string(),
              git_commit: commit.to_string(),
              git_dirty:  dirty.to_string(),
              source_ts: ts.to_string(),
              rustc_version: rustc.to_string(),
        }
    }

    fn process() -> Result<RespVersion, Error> {
        Ok(Self::new("0",
                    "success",
                    CHAT_VERSION.unwrap_or("unknown"),
                    env!("GIT_BRANCH"),
                    env!("GIT_COMMIT_SHORT"),
                    env!("GIT_DIRTY"),
                    env!("SOURCE_TIMESTAMP"),
                    env!("RUSTC_VERSION")),
        )
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
    async fn version_reports_success() {
        let app = build_app(default_templates(), "Chat Server", "http://localhost:5000/v1");
        let req = Request::builder()
            .method(Method::GET)
            .uri(Uri::from_static("/v1/version"))
            .finish();
        let resp = app.get_response(req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().into_string().await.expect("body should be readable");
        let json: serde_json::Value = serde_json::from_str(&body).expect("body should be JSON");
        assert_eq!(json["result_code"], "0");
        assert_eq!(json["server_version"], env!("CARGO_PKG_VERSION"));
    }
}
