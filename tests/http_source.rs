use std::net::SocketAddr;
use std::time::Duration;

use menucalc::{
    Brand, DatasetRegistry, DatasetSource, HttpSource, LinkStatus, LoadError, Session,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const KFC_UK: &str = r#"[{"category":"Burgers","item":"Zinger Burger","energy_kcal":450,"protein_g":26,"salt_g":2.1}]"#;

/// One-connection-per-request HTTP/1.1 server answering from a fixed table.
/// Returns the bound address; the accept loop runs until the test ends.
async fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => read += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = routes
                    .iter()
                    .find(|(route, _, _)| *route == path)
                    .map(|(_, status, body)| (*status, *body))
                    .unwrap_or((404, "not found"));
                let reason = if status == 200 { "OK" } else { "Not Found" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

fn source(addr: SocketAddr) -> HttpSource {
    HttpSource::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_and_parses_document() {
    let addr = serve(vec![("/data/kfc_uk.json", 200, KFC_UK)]).await;
    let doc = source(addr).fetch("data/kfc_uk.json").await.unwrap();
    assert_eq!(doc[0]["item"], "Zinger Burger");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let addr = serve(vec![]).await;
    let err = source(addr).fetch("data/kfc_uk.json").await.unwrap_err();
    match err {
        LoadError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/data/kfc_uk.json"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_body_is_a_parse_error() {
    let addr = serve(vec![("/data/kfc_uk.json", 200, "<html>oops</html>")]).await;
    let err = source(addr).fetch("data/kfc_uk.json").await.unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[tokio::test]
async fn session_over_http() {
    let addr = serve(vec![("/data/kfc_uk.json", 200, KFC_UK)]).await;
    let mut session = Session::new(source(addr), DatasetRegistry::default());

    session.select_brand(Brand::Kfc).await;
    assert!(matches!(session.status(), LinkStatus::Failed { .. }));

    session.select_region("uk").await;
    assert_eq!(session.status().to_string(), "Linked UK");
    assert_eq!(session.item_count_label(), "1 items");

    let zinger = &session.menu()[0];
    assert_eq!(zinger.id, "kfc_uk_burgers_zinger_burger");
    assert_eq!(zinger.calories, 450.0);
    assert_eq!(zinger.sodium, 840.0);
}
