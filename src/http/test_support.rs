use std::collections::VecDeque;
use std::future::Future;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tokio::time::{Instant, sleep};

use crate::error::TransportFault;

use super::transport::{HttpTransport, RequestSpec, ResponseStream};

/// Scripted behaviour of one fake exchange.
#[derive(Debug, Clone)]
pub(super) enum Script {
    Respond {
        delay: Duration,
        status: u16,
        headers: Vec<(&'static str, &'static str)>,
        chunks: Vec<u64>,
    },
    Fail {
        delay: Duration,
        fault: TransportFault,
    },
    FailBody {
        status: u16,
        fault: TransportFault,
    },
}

impl Script {
    pub(super) const fn ok(delay_ms: u64) -> Self {
        Script::Respond {
            delay: Duration::from_millis(delay_ms),
            status: 200,
            headers: Vec::new(),
            chunks: Vec::new(),
        }
    }

    pub(super) const fn status(status: u16) -> Self {
        Script::Respond {
            delay: Duration::ZERO,
            status,
            headers: Vec::new(),
            chunks: Vec::new(),
        }
    }

    pub(super) const fn fault(fault: TransportFault) -> Self {
        Script::Fail {
            delay: Duration::ZERO,
            fault,
        }
    }
}

/// In-memory transport that replays scripts in order (cycling) and tracks
/// how many exchanges are open at once.
pub(super) struct FakeTransport {
    preflight: Option<Script>,
    preflight_sent: AtomicBool,
    scripts: Vec<Script>,
    next: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: AtomicUsize,
    launches: Mutex<Vec<Instant>>,
}

impl FakeTransport {
    pub(super) fn new(scripts: Vec<Script>) -> Self {
        Self {
            preflight: None,
            preflight_sent: AtomicBool::new(false),
            scripts,
            next: AtomicUsize::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: AtomicUsize::new(0),
            launches: Mutex::new(Vec::new()),
        }
    }

    /// Answers the first call (the pre-flight check) with `reply` instead of the scripts.
    pub(super) fn with_preflight(mut self, reply: Script) -> Self {
        self.preflight = Some(reply);
        self
    }

    pub(super) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Instants at which scripted (non-preflight) requests were sent.
    pub(super) fn launches(&self) -> Result<Vec<Instant>, String> {
        self.launches
            .lock()
            .map(|launches| launches.clone())
            .map_err(|err| format!("launch log poisoned: {}", err))
    }

    pub(super) fn requests_seen(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }

    fn next_script(&self) -> Option<Script> {
        if let Some(reply) = self.preflight.as_ref()
            && !self.preflight_sent.swap(true, Ordering::SeqCst)
        {
            return Some(reply.clone());
        }
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut launches) = self.launches.lock() {
            launches.push(Instant::now());
        }
        let slot = index.checked_rem(self.scripts.len())?;
        self.scripts.get(slot).cloned()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, _request: &RequestSpec) -> Result<Box<dyn ResponseStream>, TransportFault> {
        let Some(script) = self.next_script() else {
            return Err(TransportFault::Other {
                message: "no script configured".to_owned(),
            });
        };

        let guard = InFlight::enter(&self.in_flight);
        self.max_in_flight
            .fetch_max(self.in_flight.load(Ordering::SeqCst), Ordering::SeqCst);

        match script {
            Script::Respond {
                delay,
                status,
                headers,
                chunks,
            } => {
                sleep(delay).await;
                Ok(Box::new(FakeResponse::new(status, &headers, chunks, None, guard)?))
            }
            Script::Fail { delay, fault } => {
                sleep(delay).await;
                drop(guard);
                Err(fault)
            }
            Script::FailBody { status, fault } => Ok(Box::new(FakeResponse::new(
                status,
                &[],
                vec![1],
                Some(fault),
                guard,
            )?)),
        }
    }
}

struct InFlight {
    counter: Arc<AtomicUsize>,
}

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

struct FakeResponse {
    status: StatusCode,
    headers: HeaderMap,
    chunks: VecDeque<u64>,
    body_fault: Option<TransportFault>,
    _in_flight: InFlight,
}

impl FakeResponse {
    fn new(
        status: u16,
        headers: &[(&'static str, &'static str)],
        chunks: Vec<u64>,
        body_fault: Option<TransportFault>,
        in_flight: InFlight,
    ) -> Result<Self, TransportFault> {
        let status = StatusCode::from_u16(status).map_err(|err| TransportFault::Other {
            message: err.to_string(),
        })?;
        let mut map = HeaderMap::new();
        for &(key, value) in headers {
            map.append(
                HeaderName::from_static(key),
                HeaderValue::from_static(value),
            );
        }
        Ok(Self {
            status,
            headers: map,
            chunks: chunks.into(),
            body_fault,
            _in_flight: in_flight,
        })
    }
}

#[async_trait]
impl ResponseStream for FakeResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    async fn next_chunk(&mut self) -> Result<Option<u64>, TransportFault> {
        match self.chunks.pop_front() {
            Some(len) => Ok(Some(len)),
            None => match self.body_fault.take() {
                Some(fault) => Err(fault),
                None => Ok(None),
            },
        }
    }
}

/// Runs `future` on a current-thread runtime with the clock paused, so
/// scripted delays elapse deterministically.
pub(super) fn run_paused_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

pub(super) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

pub(super) struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawns a blocking HTTP server answering every connection with `reply`,
/// or holding it open without answering when `reply` is `None`.
pub(super) fn spawn_http_server(reply: Option<&'static [u8]>) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, reply));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, reply: Option<&'static [u8]>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 4096];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    let Some(reply) = reply else {
        thread::sleep(Duration::from_secs(2));
        return;
    };
    if stream.write_all(reply).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// URL of a local port nothing listens on.
pub(super) fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind spare port failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("spare addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}
