//! Integration coverage for the LIST/NEWGROUPS/NEWNEWS/OVER/HDR/CAPABILITIES
//! surface against a local TCP listener.

use nntp_session::{ConnectOptions, NntpClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

async fn connected_client(
    responder: impl FnOnce(tokio::net::TcpStream) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
        + Send
        + 'static,
) -> NntpClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        sock.write_all(b"200 ready\r\n").await.unwrap();
        responder(sock).await;
    });

    NntpClient::connect(ConnectOptions::new(addr.ip().to_string(), addr.port(), false))
        .await
        .unwrap()
}

#[tokio::test]
async fn capabilities_and_list_active() {
    let mut client = connected_client(|mut sock| {
        Box::pin(async move {
            let mut buf = [0u8; 512];
            let n = sock.read(&mut buf).await.unwrap();
            assert!(std::str::from_utf8(&buf[..n]).unwrap().starts_with("CAPABILITIES"));
            sock.write_all(b"101 capabilities\r\nVERSION 2\r\nREADER\r\n.\r\n")
                .await
                .unwrap();

            let n = sock.read(&mut buf).await.unwrap();
            assert!(std::str::from_utf8(&buf[..n]).unwrap().starts_with("LIST ACTIVE"));
            sock.write_all(b"215 list follows\r\nmisc.test 100 1 y\r\n.\r\n")
                .await
                .unwrap();
            std::future::pending::<()>().await
        })
    })
    .await;

    let caps = client.capabilities().await.unwrap();
    assert!(caps.has("READER"));

    let groups = client.list(Some("ACTIVE"), None).await.unwrap();
    assert_eq!(groups, vec!["misc.test 100 1 y".to_string()]);
}

#[tokio::test]
async fn over_and_hdr_round_trip() {
    let mut client = connected_client(|mut sock| {
        Box::pin(async move {
            let mut buf = [0u8; 512];
            let n = sock.read(&mut buf).await.unwrap();
            assert!(std::str::from_utf8(&buf[..n]).unwrap().starts_with("OVER 1-2"));
            sock.write_all(
                b"224 overview\r\n1\tsubj\tfrom@x\tdate\t<a@b>\t\t100\t10\r\n.\r\n",
            )
            .await
            .unwrap();

            let n = sock.read(&mut buf).await.unwrap();
            assert!(std::str::from_utf8(&buf[..n]).unwrap().starts_with("HDR Subject 1-2"));
            sock.write_all(b"225 headers\r\n1 subj\r\n2 subj2\r\n.\r\n")
                .await
                .unwrap();
            std::future::pending::<()>().await
        })
    })
    .await;

    let overview = client.over("1-2").await.unwrap();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].message_id, "<a@b>");

    let hdrs = client.hdr("Subject", "1-2").await.unwrap();
    assert_eq!(hdrs.len(), 2);
}

#[tokio::test]
async fn newgroups_and_newnews() {
    let mut client = connected_client(|mut sock| {
        Box::pin(async move {
            let mut buf = [0u8; 512];
            let n = sock.read(&mut buf).await.unwrap();
            assert!(std::str::from_utf8(&buf[..n])
                .unwrap()
                .starts_with("NEWGROUPS 20240101 000000 GMT"));
            sock.write_all(b"231 new groups\r\nmisc.new 0 0 y\r\n.\r\n")
                .await
                .unwrap();

            let n = sock.read(&mut buf).await.unwrap();
            assert!(std::str::from_utf8(&buf[..n])
                .unwrap()
                .starts_with("NEWNEWS misc.* 20240101 000000 GMT"));
            sock.write_all(b"230 new news\r\n<x@y>\r\n.\r\n").await.unwrap();
            std::future::pending::<()>().await
        })
    })
    .await;

    let groups = client.newgroups("20240101", "000000", true).await.unwrap();
    assert_eq!(groups, vec!["misc.new 0 0 y".to_string()]);

    let ids = client
        .newnews("misc.*", "20240101", "000000", true)
        .await
        .unwrap();
    assert_eq!(ids, vec!["<x@y>".to_string()]);
}
