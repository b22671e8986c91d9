//! In-process JSON-RPC node exposing the token and faucet contracts

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use ethabi::Token;
use mtk_common::{Address, U256};
use mtk_faucet::contracts::{ContractCall, FaucetContract, TokenContract};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const USER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const FAUCET: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

pub fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

pub fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

#[derive(Debug, Clone)]
pub struct SentTx {
    pub from: Address,
    pub to: Address,
    pub data: Vec<u8>,
}

pub struct NodeState {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub decimals: u8,
    pub balances: HashMap<Address, U256>,
    pub drip_limit: U256,
    pub drip_interval: U256,
    pub drip_times: HashMap<Address, u64>,
    pub owner: Address,
    /// Selectors whose `eth_call` answers with an RPC error
    pub broken_reads: HashSet<[u8; 4]>,
    /// Error message returned by the next `eth_sendTransaction`
    pub reject_next_send: Option<String>,
    pub revert_receipts: bool,
    /// Answer receipt lookups with `null`, as for a transaction not yet mined
    pub withhold_receipts: bool,
    /// Number of upcoming receipt lookups that fail with an RPC error
    pub failing_receipt_lookups: usize,
    /// HTTP status attached to JSON-RPC error replies
    pub error_status: StatusCode,
    pub send_delay: Duration,
    pub sent: Vec<SentTx>,
    /// Calldata of every `eth_call`
    pub reads: Vec<Vec<u8>>,
}

impl Default for NodeState {
    fn default() -> Self {
        let mut balances = HashMap::new();
        balances.insert(addr(FAUCET), tokens(1000));
        balances.insert(addr(OWNER), tokens(5));
        Self {
            chain_id: 31337,
            accounts: vec![addr(OWNER), addr(USER)],
            decimals: 18,
            balances,
            drip_limit: tokens(100),
            drip_interval: U256::from(60u64),
            drip_times: HashMap::new(),
            owner: addr(OWNER),
            broken_reads: HashSet::new(),
            reject_next_send: None,
            revert_receipts: false,
            withhold_receipts: false,
            failing_receipt_lookups: 0,
            error_status: StatusCode::OK,
            send_delay: Duration::ZERO,
            sent: Vec::new(),
            reads: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct MockNode {
    pub url: String,
    pub state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    pub async fn start(state: NodeState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new().route("/", post(rpc_handler)).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { url, state }
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn reads(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().reads.clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut NodeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }
}

pub fn selector(data: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&data[..4]);
    out
}

fn word_address(data: &[u8]) -> Address {
    Address::from_slice(&data[4 + 12..4 + 32]).unwrap()
}

fn decode_hex(value: &Value) -> Vec<u8> {
    hex::decode(value.as_str().unwrap().trim_start_matches("0x")).unwrap()
}

fn hex_data(bytes: &[u8]) -> Value {
    json!(format!("0x{}", hex::encode(bytes)))
}

type Reply = (StatusCode, Json<Value>);

fn error(node: &NodeState, id: &Value, code: i64, message: &str) -> Reply {
    let body = json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}});
    (node.error_status, Json(body))
}

fn ok(id: &Value, result: Value) -> Reply {
    (StatusCode::OK, Json(json!({"jsonrpc": "2.0", "id": id, "result": result})))
}

async fn rpc_handler(State(state): State<Arc<Mutex<NodeState>>>, Json(req): Json<Value>) -> Reply {
    let id = req["id"].clone();
    let method = req["method"].as_str().unwrap_or_default().to_string();
    let params = req["params"].clone();

    if method == "eth_sendTransaction" {
        let delay = state.lock().unwrap().send_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let mut node = state.lock().unwrap();
    match method.as_str() {
        "eth_chainId" => ok(&id, json!(format!("0x{:x}", node.chain_id))),
        "eth_accounts" => ok(&id, json!(node.accounts)),
        "eth_call" => {
            let to: Address = params[0]["to"].as_str().unwrap().parse().unwrap();
            let data = decode_hex(&params[0]["data"]);
            let sel = selector(&data);
            node.reads.push(data.clone());
            if node.broken_reads.contains(&sel) {
                return error(&node, &id, -32000, "execution reverted");
            }

            let token = TokenContract::new(addr(TOKEN));
            let faucet = FaucetContract::new(addr(FAUCET));
            let matches = |call: ContractCall| to == call.to && sel == selector(&call.data);

            let result = if matches(token.decimals()) {
                Token::Uint(U256::from(node.decimals))
            } else if matches(token.balance_of(Address::ZERO)) {
                let holder = word_address(&data);
                Token::Uint(node.balances.get(&holder).copied().unwrap_or_default())
            } else if matches(faucet.get_drip_limit()) {
                Token::Uint(node.drip_limit)
            } else if matches(faucet.get_drip_interval()) {
                Token::Uint(node.drip_interval)
            } else if matches(faucet.get_drip_time(Address::ZERO)) {
                let last = node.drip_times.get(&word_address(&data)).copied().unwrap_or(0);
                Token::Uint(U256::from(last))
            } else if matches(faucet.owner()) {
                Token::Address(node.owner.into())
            } else {
                return ok(&id, json!("0x"));
            };
            ok(&id, hex_data(&ethabi::encode(&[result])))
        }
        "eth_sendTransaction" => {
            if let Some(message) = node.reject_next_send.take() {
                return error(&node, &id, 3, &message);
            }
            let tx = &params[0];
            let sent = SentTx {
                from: tx["from"].as_str().unwrap().parse().unwrap(),
                to: tx["to"].as_str().unwrap().parse().unwrap(),
                data: decode_hex(&tx["data"]),
            };
            node.sent.push(sent);
            ok(&id, json!(format!("0x{:064x}", node.sent.len())))
        }
        "eth_getTransactionReceipt" => {
            if node.failing_receipt_lookups > 0 {
                node.failing_receipt_lookups -= 1;
                return error(&node, &id, -32603, "header not found");
            }
            if node.withhold_receipts {
                return ok(&id, Value::Null);
            }
            let hash = params[0].clone();
            let status = if node.revert_receipts { "0x0" } else { "0x1" };
            ok(&id, json!({"transactionHash": hash, "blockNumber": "0x1", "status": status}))
        }
        _ => error(&node, &id, -32601, "Method not found"),
    }
}
