use std::sync::Arc;

use seabattle::{server, GameEngine, InMemorySessionStore};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, writer) = stream.into_split();
        Client {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    async fn send_raw(&mut self, line: &str) -> Value {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        let reply = self.lines.next_line().await.unwrap().unwrap();
        serde_json::from_str(&reply).unwrap()
    }

    async fn send(&mut self, request: Value) -> Value {
        self.send_raw(&request.to_string()).await
    }
}

async fn start_server() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let engine = Arc::new(GameEngine::with_seed(InMemorySessionStore::new(), 5));
    tokio::spawn(server::serve(listener, engine));
    addr
}

#[tokio::test]
async fn state_then_fire() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    let state = client.send(json!({ "session": "s1" })).await;
    assert_eq!(state["ok"], json!(true));
    assert_eq!(state["state"]["phase"], json!("PLAYER_TURN"));
    assert_eq!(state["state"]["player"]["shots"], json!(0));
    assert!(state.get("playerShot").is_none());

    let fired = client
        .send(json!({ "session": "s1", "action": "fire", "body": { "coord": "b7" } }))
        .await;
    assert_eq!(fired["ok"], json!(true));
    assert_eq!(fired["playerShot"]["coord"], json!("B7"));
    assert!(fired["computerShot"]["coord"].is_string());
    assert_eq!(fired["state"]["player"]["shots"], json!(1));
    assert!(fired["marks"]["playerShotsOnComputer"]["B7"].is_string());
}

#[tokio::test]
async fn errors_carry_status() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    let bad_coord = client
        .send(json!({ "session": "s1", "action": "fire", "body": { "coord": "K1" } }))
        .await;
    assert_eq!(bad_coord["ok"], json!(false));
    assert_eq!(bad_coord["status"], json!(400));

    let missing = client
        .send(json!({ "session": "s1", "action": "fire" }))
        .await;
    assert_eq!(missing["status"], json!(400));

    let unknown = client
        .send(json!({ "session": "s1", "action": "launch" }))
        .await;
    assert_eq!(unknown["ok"], json!(false));
    assert_eq!(unknown["status"], json!(404));

    let garbage = client.send_raw("not json").await;
    assert_eq!(garbage["ok"], json!(false));
    assert_eq!(garbage["status"], json!(400));

    let state = client.send(json!({ "session": "s1" })).await;
    assert_eq!(state["state"]["player"]["shots"], json!(0));
}

#[tokio::test]
async fn connections_share_sessions() {
    let addr = start_server().await;
    let mut first = Client::connect(addr).await;
    let mut second = Client::connect(addr).await;

    first
        .send(json!({ "session": "shared", "action": "fire", "body": { "coord": "A1" } }))
        .await;
    let seen = second.send(json!({ "session": "shared" })).await;
    assert_eq!(seen["state"]["player"]["shots"], json!(1));

    let other = second.send(json!({ "session": "other" })).await;
    assert_eq!(other["state"]["player"]["shots"], json!(0));

    let restarted = second
        .send(json!({ "session": "shared", "action": "restart" }))
        .await;
    assert_eq!(restarted["state"]["player"]["shots"], json!(0));
    assert!(restarted["marks"]["playerShotsOnComputer"]
        .as_object()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn top_level_coord_is_accepted() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    let fired = client
        .send(json!({ "session": "flat", "action": "fire", "coord": "c5" }))
        .await;
    assert_eq!(fired["ok"], json!(true));
    assert_eq!(fired["playerShot"]["coord"], json!("C5"));
    assert_eq!(fired["state"]["player"]["shots"], json!(1));
}

#[tokio::test]
async fn oversized_line_is_cut_off() {
    let addr = start_server().await;
    let mut client = Client::connect(addr).await;

    // One byte past the cap and no newline: the server must answer without
    // waiting for the rest of the line.
    let oversized = vec![b'x'; 64 * 1024 + 1];
    client.writer.write_all(&oversized).await.unwrap();
    let reply = client.lines.next_line().await.unwrap().unwrap();
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["ok"], json!(false));
    assert_eq!(reply["status"], json!(400));
    assert!(reply["error"].as_str().unwrap().contains("too large"));
    assert_eq!(client.lines.next_line().await.unwrap(), None);

    let mut fresh = Client::connect(addr).await;
    let state = fresh.send(json!({ "session": "after" })).await;
    assert_eq!(state["ok"], json!(true));
}
