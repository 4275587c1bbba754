//! Integration tests for flagwire-core

use flagwire_core::*;

#[test]
fn test_http_request_creation() {
    let req = HttpRequest::new("GET".to_string(), "/test".to_string());
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/test");
    assert!(req.headers.is_empty());
    assert!(req.query_params.is_empty());
    assert!(req.extensions.is_empty());
}

#[test]
fn test_cloned_request_extensions_are_independent() {
    #[derive(Debug, PartialEq)]
    struct Stage(u8);

    let mut original = HttpRequest::new("GET".to_string(), "/".to_string());
    original.extensions.insert(Stage(1));

    let mut derived = original.clone();
    derived.extensions.insert(Stage(2));

    assert_eq!(original.extensions.get::<Stage>(), Some(&Stage(1)));
    assert_eq!(derived.extensions.get::<Stage>(), Some(&Stage(2)));
}

#[test]
fn test_error_status_codes() {
    let err = Error::BadRequest("bad query".to_string());
    assert_eq!(err.status_code(), 400);
    assert!(err.is_client_error());
    assert!(!err.is_server_error());

    let err = Error::Internal("boom".to_string());
    assert_eq!(err.status_code(), 500);
    assert!(err.is_server_error());
}

#[test]
fn test_handler_reads_query() {
    let chain = MiddlewareChain::new();
    let req = HttpRequest::from_uri("GET", "/greet?name=ada").unwrap();

    let res = tokio_test::block_on(chain.apply(
        req,
        handler(|req: HttpRequest| async move {
            let name = req
                .query("name")
                .cloned()
                .ok_or_else(|| Error::BadRequest("missing name".to_string()))?;
            Ok(HttpResponse::ok().with_text(format!("hello {}", name)))
        }),
    ))
    .unwrap();

    assert_eq!(res.body, b"hello ada".to_vec());
}
