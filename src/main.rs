#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::{get, post, Endpoint, EndpointExt, Route};
use poem::listener::TcpListener;
use poem_openapi::{param::Query, payload::PlainText, OpenApi, OpenApiService};
use tera::Tera;

// Chat Utilities
use crate::v1::pages::chat_post;
use crate::v1::pages::index_get;
use crate::v1::pages::version::VersionApi;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx, CHAT_ARGS, CHAT_DIRS};
use crate::utils::errors::Errors;
use crate::utils::templates::init_templates;

// Modules
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "ChatServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Chat Server ---------
    // Announce ourselves.
    println!("Starting chat_server!");

    // Initialize the server.
    chat_init();

    // --------------- Main Loop Set Up ---------------
    // Assign base URL for the api service.
    let chat_url = format!("{}:{}{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port,
        "/v1");

    // Load the compiled-in page templates and any site overrides.
    let templates = init_templates();

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let app = build_app(templates, &RUNTIME_CTX.parms.config.title, &chat_url);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// build_app:
// ---------------------------------------------------------------------------
/** Assemble the full route tree:  the two page routes, the /v1 api service
 * and the generated api documentation endpoints.  The template engine rides
 * along as shared request data.
 */
fn build_app(templates: Tera, title: &str, api_url: &str) -> impl Endpoint {
    // Create a tuple with both the HelloApi struct and the version endpoint.
    let endpoints = (HelloApi, VersionApi);
    let api_service =
        OpenApiService::new(endpoints, title.to_owned(),
                            option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
            .server(api_url.to_owned());

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    Route::new()
        .at("/", get(index_get::get_index))
        .at("/chat", post(chat_post::post_chat))
        .nest("/v1", api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .data(templates)
}

// ---------------------------------------------------------------------------
// chat_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn chat_init() {
    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();

    // Stop here when only directory creation was requested.
    if CHAT_ARGS.create_dirs_only {
        println!("Data directories created under {}. Exiting.", CHAT_DIRS.root_dir);
        std::process::exit(0);
    }
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running chat_server={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}

// ***************************************************************************
//                             Hello Endpoint
// ***************************************************************************
// Hello structure.
struct HelloApi;

// ---------------------------------------------------------------------------
// hello endpoint:
// ---------------------------------------------------------------------------
#[OpenApi]
impl HelloApi {
    #[oai(path = "/hello", method = "get")]
    async fn index(&self, name: Query<Option<String>>) -> PlainText<String> {
        match name.0 {
            Some(name) => PlainText(format!("hello, {}!", name)),
            None => PlainText("hello!".to_string()),
        }
    }
}
