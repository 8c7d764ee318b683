use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use likebutton::controller::{Activation, Settlement, ToggleController};
use likebutton::dom::{Document, ElementId, MemoryDocument};
use likebutton::errors::LikeButtonError;
use likebutton::markup::MarkupConfig;
use likebutton::request::RequestLayer;
use likebutton::token::{CsrfConfig, TokenProvider};
use likebutton::transport::HttpTransport;
use reqwest::Url;
use serde_json::{json, Value};

const TOKEN: &str = "abc123";

async fn toggle_like(req: HttpRequest, path: web::Path<(String, String)>, body: web::Json<Value>) -> HttpResponse {
    let (action, post_id) = path.into_inner();

    let token = req.headers().get("X-CSRFToken").and_then(|v| v.to_str().ok());
    if token != Some(TOKEN) {
        return HttpResponse::Forbidden().body("CSRF verification failed");
    }

    if body["post_id"] != json!(post_id) {
        return HttpResponse::BadRequest().body("post_id mismatch");
    }

    match action.as_str() {
        "like" => HttpResponse::Ok().json(json!({ "liked": true, "count": 5 })),
        "unlike" => HttpResponse::Ok().json(json!({ "liked": false, "count": 4 })),
        _ => HttpResponse::NotFound().finish(),
    }
}

fn start_server() -> (Url, ServerHandle) {
    let server = HttpServer::new(|| App::new().route("/posts/{action}/{id}", web::post().to(toggle_like)))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Could not bind test server");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (Url::parse(&format!("http://{}/", addr)).unwrap(), handle)
}

struct Page {
    document: Arc<MemoryDocument>,
    button: ElementId,
    counter: ElementId,
}

fn page() -> Page {
    let document = Arc::new(MemoryDocument::new());
    let button = document.append(
        "a",
        &[("data-action", "like"), ("data-store-id", "42"), ("data-url", "/posts/like/42")],
    );
    document.append_child(button, "i", &[("class", "far fa-lg fa-heart")]);
    let counter = document.append_text("span", &[("name", "count_42")], "4");

    Page {
        document,
        button,
        counter,
    }
}

fn controller(page: &Page, origin: Url, cookie: &str) -> ToggleController<MemoryDocument, HttpTransport> {
    let tokens = Arc::new(TokenProvider::new(CsrfConfig::default(), Some(cookie)));
    let requests = RequestLayer::new(HttpTransport::default(), tokens, origin);
    let controller = ToggleController::new(page.document.clone(), requests, MarkupConfig::default());
    controller.bind();

    controller
}

#[actix_web::test]
async fn toggles_back_and_forth_against_server() {
    let (origin, handle) = start_server();
    let page = page();
    let controller = controller(&page, origin, "sessionid=s; csrftoken=abc123");

    assert!(controller.activate(page.button).await.is_success());
    assert_eq!(page.document.attribute(page.button, "data-url").as_deref(), Some("/posts/unlike/42"));
    assert_eq!(page.document.text(page.counter).as_deref(), Some("5"));

    assert!(controller.activate(page.button).await.is_success());
    assert_eq!(page.document.attribute(page.button, "data-url").as_deref(), Some("/posts/like/42"));
    assert_eq!(page.document.text(page.counter).as_deref(), Some("4"));

    handle.stop(true).await;
}

#[actix_web::test]
async fn rejected_token_leaves_page_unchanged() {
    let (origin, handle) = start_server();
    let page = page();
    let controller = controller(&page, origin, "csrftoken=wrong");

    let activation = controller.activate(page.button).await;

    assert!(matches!(
        activation,
        Activation::Settled(Settlement::Failure(LikeButtonError::ServerRejection(403, _)))
    ));
    assert_eq!(page.document.attribute(page.button, "data-url").as_deref(), Some("/posts/like/42"));
    assert_eq!(page.document.text(page.counter).as_deref(), Some("4"));

    handle.stop(true).await;
}

#[actix_web::test]
async fn unreachable_server_is_a_network_failure() {
    let page = page();
    let controller = controller(&page, Url::parse("http://127.0.0.1:1/").unwrap(), "csrftoken=abc123");

    let activation = controller.activate(page.button).await;

    assert!(matches!(
        activation,
        Activation::Settled(Settlement::Failure(LikeButtonError::NetworkFailure(_)))
    ));
    assert_eq!(page.document.text(page.counter).as_deref(), Some("4"));
}
