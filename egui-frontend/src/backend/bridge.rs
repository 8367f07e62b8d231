//! # Backend Bridge
//!
//! JSON-lines RPC between the UI and the backend process.
//!
//! Each request is one line:
//! `{"id": 7, "command": "get_transactions", "args": {"filter": {"year": 2025, "month": 3}}}`
//!
//! and each reply is one line carrying the same id and either a result or an error:
//! `{"id": 7, "result": [...]}` / `{"id": 7, "error": "No user logged in"}`
//!
//! Several requests can be in flight at once. Replies are routed back to their
//! caller by id, so the backend may answer in any order.
//!
//! `login` runs the interactive browser sign-in, so it is bounded by its own,
//! much longer timeout. A `get_current_user` rejection reading
//! `"No user logged in"` is the backend's way of saying nobody is signed in and
//! is returned as `Ok(None)`, the same as a `null` result.

use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{Category, CreateTransaction, MonthlySummary, Period, Transaction, TransactionFilter, User};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot, Mutex};

use super::{ApiError, ApiResult, BackendClient};
use crate::config::BackendConfig;

/// Rejection message the backend uses when no session exists
const NO_SESSION_MESSAGE: &str = "No user logged in";

type Reply = Result<Value, String>;
/// Waiting callers by request id. None once the backend stream has closed.
type PendingMap = Arc<Mutex<Option<HashMap<u64, oneshot::Sender<Reply>>>>>;

#[derive(Debug, Serialize)]
struct RequestFrame<'a> {
    id: u64,
    command: &'a str,
    args: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseFrame {
    id: u64,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// How long to wait for a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeTimeouts {
    /// Data and session calls
    pub request: Duration,
    /// The interactive sign-in
    pub login: Duration,
}

impl From<&BackendConfig> for BridgeTimeouts {
    fn from(config: &BackendConfig) -> Self {
        Self {
            request: config.request_timeout(),
            login: config.login_timeout(),
        }
    }
}

/// [`BackendClient`] speaking to the backend over a pair of byte streams
pub struct BridgeClient {
    outgoing: mpsc::UnboundedSender<String>,
    pending: PendingMap,
    next_id: AtomicU64,
    timeouts: BridgeTimeouts,
    /// Held so the backend process lives (and is killed) with the client
    _process: Option<Child>,
}

impl BridgeClient {
    /// Launch the configured backend executable and connect to its stdio
    pub async fn spawn(config: &BackendConfig) -> ApiResult<Self> {
        info!("🔌 Starting backend process: {}", config.command.display());

        let mut process = Command::new(&config.command)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = process.stdin.take().ok_or(ApiError::Disconnected)?;
        let stdout = process.stdout.take().ok_or(ApiError::Disconnected)?;

        let mut client = Self::connect(stdout, stdin, BridgeTimeouts::from(config));
        client._process = Some(process);
        Ok(client)
    }

    /// Connect over an existing stream pair. Must be called inside a tokio runtime.
    pub fn connect<R, W>(reader: R, writer: W, timeouts: BridgeTimeouts) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (outgoing, outgoing_rx) = mpsc::unbounded_channel();
        let pending: PendingMap = Arc::new(Mutex::new(Some(HashMap::new())));

        tokio::spawn(write_loop(writer, outgoing_rx));
        tokio::spawn(read_loop(reader, pending.clone()));

        Self {
            outgoing,
            pending,
            next_id: AtomicU64::new(1),
            timeouts,
            _process: None,
        }
    }

    async fn invoke<T: DeserializeOwned>(&self, command: &str, args: Value) -> ApiResult<T> {
        self.invoke_within(command, args, self.timeouts.request).await
    }

    async fn invoke_within<T: DeserializeOwned>(
        &self,
        command: &str,
        args: Value,
        timeout: Duration,
    ) -> ApiResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let line = serde_json::to_string(&RequestFrame { id, command, args })?;

        let (reply_tx, reply_rx) = oneshot::channel();
        match self.pending.lock().await.as_mut() {
            Some(waiting) => {
                waiting.insert(id, reply_tx);
            }
            None => return Err(ApiError::Disconnected),
        }

        debug!("➡️ [{}] {}", id, command);
        if self.outgoing.send(line).is_err() {
            self.forget(id).await;
            return Err(ApiError::Disconnected);
        }

        let reply = match tokio::time::timeout(timeout, reply_rx).await {
            Ok(Ok(reply)) => reply,
            // Sender dropped: the read loop ended
            Ok(Err(_)) => return Err(ApiError::Disconnected),
            Err(_) => {
                self.forget(id).await;
                warn!("⏱️ [{}] {} timed out after {:?}", id, command, timeout);
                return Err(ApiError::Timeout(command.to_string()));
            }
        };

        let value = reply.map_err(ApiError::Backend)?;
        Ok(serde_json::from_value(value)?)
    }

    async fn forget(&self, id: u64) {
        if let Some(waiting) = self.pending.lock().await.as_mut() {
            waiting.remove(&id);
        }
    }
}

async fn write_loop<W>(mut writer: W, mut outgoing: mpsc::UnboundedReceiver<String>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(mut line) = outgoing.recv().await {
        line.push('\n');
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            error!("❌ Failed to write to backend: {}", e);
            break;
        }
        if let Err(e) = writer.flush().await {
            error!("❌ Failed to flush backend stream: {}", e);
            break;
        }
    }
}

async fn read_loop<R>(reader: R, pending: PendingMap)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                let frame: ResponseFrame = match serde_json::from_str(&line) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("⚠️ Ignoring malformed backend line ({}): {}", e, line);
                        continue;
                    }
                };
                let reply = match frame.error {
                    Some(message) => Err(message),
                    None => Ok(frame.result),
                };
                let waiter = pending
                    .lock()
                    .await
                    .as_mut()
                    .and_then(|waiting| waiting.remove(&frame.id));
                match waiter {
                    Some(waiter) => {
                        let _ = waiter.send(reply);
                    }
                    None => debug!("Reply for unknown or expired request {}", frame.id),
                }
            }
            Ok(None) => {
                info!("🔌 Backend stream closed");
                break;
            }
            Err(e) => {
                error!("❌ Failed to read from backend: {}", e);
                break;
            }
        }
    }

    // Dropping the senders wakes every waiting caller with Disconnected
    pending.lock().await.take();
}

#[async_trait]
impl BackendClient for BridgeClient {
    async fn get_current_user(&self) -> ApiResult<Option<User>> {
        match self.invoke("get_current_user", json!({})).await {
            Err(ApiError::Backend(message)) if message.trim() == NO_SESSION_MESSAGE => {
                debug!("👤 Backend reports no session");
                Ok(None)
            }
            other => other,
        }
    }

    async fn login(&self) -> ApiResult<()> {
        // The backend answers with the signed-in user; the UI reloads it separately
        self.invoke_within::<IgnoredAny>("login", json!({}), self.timeouts.login)
            .await
            .map(|_| ())
    }

    async fn logout(&self) -> ApiResult<()> {
        self.invoke::<IgnoredAny>("logout", json!({})).await.map(|_| ())
    }

    async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.invoke("get_categories", json!({})).await
    }

    async fn get_transactions(&self, period: Period) -> ApiResult<Vec<Transaction>> {
        let filter = TransactionFilter::from(period);
        self.invoke("get_transactions", json!({ "filter": filter })).await
    }

    async fn get_monthly_summary(&self, period: Period) -> ApiResult<MonthlySummary> {
        self.invoke(
            "get_monthly_summary",
            json!({ "year": period.year(), "month": period.month() }),
        )
        .await
    }

    async fn add_transaction(&self, transaction: &CreateTransaction) -> ApiResult<()> {
        self.invoke::<IgnoredAny>("add_transaction", json!({ "transaction": transaction }))
            .await
            .map(|_| ())
    }
}
