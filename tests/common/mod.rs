//! Shared utilities for integration testing.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Timestamp of block 0 on the mock chain; block `n` is `n` seconds later.
#[allow(dead_code)]
pub const MOCK_GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// One request as received by a mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// Mock exchange that answers every request with a fixed status and body.
#[allow(dead_code)]
pub struct MockExchange {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    connections: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockExchange {
    /// Panics if `status` is not a valid HTTP status code.
    pub async fn start(status: u16, body: &'static str) -> Self {
        let reply_status = status_line(status);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let recorded = requests.clone();
        let accepted = connections.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut socket, _)) => {
                        accepted.fetch_add(1, Ordering::SeqCst);
                        let recorded = recorded.clone();
                        let reply_status = reply_status.clone();
                        tokio::spawn(async move {
                            if let Some(request) = read_request(&mut socket).await {
                                recorded.lock().unwrap().push(request);
                                write_response(&mut socket, &reply_status, body).await;
                            }
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            addr,
            requests,
            connections,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

/// Mock HyperEVM JSON-RPC node serving a fixed set of blocks.
///
/// Answers `eth_blockNumber` with the highest block number and
/// `eth_getBlockByNumber` with a full block, or `null` for a height it does
/// not hold. Any other method gets a JSON-RPC "method not found" error.
#[allow(dead_code)]
pub struct MockRpc {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

#[allow(dead_code)]
impl MockRpc {
    /// Start a node holding `chain`, given as `(number, gas_limit)` pairs.
    pub async fn start(chain: &[(u64, u64)]) -> Self {
        let blocks: Arc<BTreeMap<u64, u64>> = Arc::new(chain.iter().copied().collect());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let recorded = calls.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut socket, _)) => {
                        let blocks = blocks.clone();
                        let recorded = recorded.clone();
                        tokio::spawn(async move {
                            let Some(request) = read_request(&mut socket).await else {
                                return;
                            };
                            let call = request.json();
                            let method = call["method"].as_str().unwrap_or_default().to_string();
                            let params = call["params"].clone();
                            recorded.lock().unwrap().push((method.clone(), params.clone()));

                            let body = rpc_reply(&blocks, &method, &params, call["id"].clone());
                            write_response(&mut socket, &status_line(200), &body.to_string()).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self { addr, calls }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Method name and params of every call, in arrival order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Block numbers requested through `eth_getBlockByNumber`.
    pub fn requested_blocks(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter(|(method, _)| method == "eth_getBlockByNumber")
            .filter_map(|(_, params)| params[0].as_str().and_then(parse_quantity))
            .collect()
    }
}

fn rpc_reply(blocks: &BTreeMap<u64, u64>, method: &str, params: &Value, id: Value) -> Value {
    let head = blocks.keys().next_back().copied().unwrap_or(0);
    match method {
        "eth_blockNumber" => json!({"jsonrpc": "2.0", "id": id, "result": quantity(head)}),
        "eth_getBlockByNumber" => {
            let number = match params[0].as_str() {
                Some("latest") => Some(head),
                Some(tag) => parse_quantity(tag),
                None => None,
            };
            let result = number
                .and_then(|n| blocks.get(&n).map(|gas_limit| block_json(n, *gas_limit)))
                .unwrap_or(Value::Null);
            json!({"jsonrpc": "2.0", "id": id, "result": result})
        }
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": format!("method {} not found", method)}
        }),
    }
}

fn block_json(number: u64, gas_limit: u64) -> Value {
    let hash = |seed: u64| format!("0x{:064x}", seed);
    json!({
        "hash": hash(number + 1),
        "parentHash": hash(number),
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": hash(0),
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "difficulty": "0x0",
        "number": quantity(number),
        "gasLimit": quantity(gas_limit),
        "gasUsed": "0x0",
        "timestamp": quantity(MOCK_GENESIS_TIMESTAMP + number),
        "extraData": "0x",
        "mixHash": hash(0),
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x64",
        "size": "0x200",
        "uncles": [],
        "transactions": []
    })
}

fn quantity(value: u64) -> String {
    format!("0x{:x}", value)
}

fn parse_quantity(value: &str) -> Option<u64> {
    u64::from_str_radix(value.strip_prefix("0x")?, 16).ok()
}

/// HTTP/1.1 status line for `status`, e.g. `400 Bad Request`.
///
/// Panics on codes outside 100..=999 so a typo in a test cannot silently
/// turn into a success response.
pub fn status_line(status: u16) -> String {
    let code = reqwest::StatusCode::from_u16(status)
        .unwrap_or_else(|_| panic!("mock server given invalid HTTP status {}", status));
    format!("{} {}", code.as_u16(), code.canonical_reason().unwrap_or("Unknown"))
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let (head_len, content_length) = loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            break (pos + 4, content_length);
        }
    };

    while buf.len() < head_len + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf[..head_len - 4]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    let end = buf.len().min(head_len + content_length);
    let body = String::from_utf8_lossy(&buf[head_len..end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

async fn write_response(socket: &mut TcpStream, status_line: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}
