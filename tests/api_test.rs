/*!
 * API Tests
 * Scheduler service operations and the JSON-over-TCP server
 */

use cpu_scheduler::api::{
    ApiError, Response, ScheduleRequest, SchedulerService, ServerConfig, ServerLifecycle,
    SimulationServer,
};
use cpu_scheduler::scheduler::Algorithm;
use cpu_scheduler::{HistoryStore, TaskRegistry};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

#[test]
fn test_schedule_all_algorithms() {
    let service = SchedulerService::default();
    let request = ScheduleRequest::new("0 1 2", "5 3 8")
        .with_priorities("3 1 2")
        .with_quantum(2);

    for name in ["fcfs", "SJF", "Priority", "rr", "round_robin"] {
        let result = service.schedule(name, &request).unwrap();
        assert_eq!(result.scheduled_tasks.len(), 3, "algorithm {}", name);
        assert_eq!(result.makespan(), 16);
    }
    // Every request registers its tasks
    assert_eq!(service.registry().len(), 15);
}

#[test]
fn test_schedule_validation_errors() {
    let service = SchedulerService::default();

    let mismatch = service.schedule("fcfs", &ScheduleRequest::new("0 1", "2"));
    assert!(matches!(mismatch, Err(ApiError::InvalidRequest(_))));

    let no_quantum = service.schedule("rr", &ScheduleRequest::new("0", "2"));
    assert!(matches!(no_quantum, Err(ApiError::InvalidRequest(_))));

    let bad_quantum = service.schedule("rr", &ScheduleRequest::new("0", "2").with_quantum(-1));
    assert!(matches!(bad_quantum, Err(ApiError::Scheduler(_))));

    let no_priorities = service.schedule("priority", &ScheduleRequest::new("0", "2"));
    assert!(matches!(no_priorities, Err(ApiError::InvalidRequest(_))));

    // Failed requests never reach the registry
    assert!(service.registry().is_empty());
}

#[test]
fn test_oversized_workloads_rejected() {
    let service = SchedulerService::default();

    let huge = ["4611686018427387904"; 3].join(" ");
    let overflow = service.schedule("fcfs", &ScheduleRequest::new("0 0 0", &huge));
    assert!(matches!(overflow, Err(ApiError::InvalidRequest(_))));

    let max = [i64::MAX.to_string(), i64::MAX.to_string(), i64::MAX.to_string()].join(" ");
    let request = ScheduleRequest::new("0 0 0", &max).with_quantum(i64::MAX);
    assert!(matches!(
        service.schedule("rr", &request),
        Err(ApiError::InvalidRequest(_))
    ));

    let tiny_slices = ScheduleRequest::new("0", "1000000000000").with_quantum(1);
    assert!(matches!(
        service.schedule("rr", &tiny_slices),
        Err(ApiError::InvalidRequest(_))
    ));

    // Rejected workloads leave the service usable
    assert!(service.registry().is_empty());
    let ok = service.schedule("fcfs", &ScheduleRequest::new("0", "3")).unwrap();
    assert_eq!(ok.makespan(), 3);
}

#[test]
fn test_registry_stays_bounded_across_requests() {
    let service = SchedulerService::new(TaskRegistry::with_capacity(4), HistoryStore::new());
    let request = ScheduleRequest::new("0 1 2", "1 1 1");

    for _ in 0..10 {
        service.schedule("fcfs", &request).unwrap();
    }
    assert_eq!(service.registry().len(), 4);
    let ids: Vec<_> = service.registry().all().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![27, 28, 29, 30]);
}

#[test]
fn test_history_operations() {
    let service = SchedulerService::default();
    let base = ScheduleRequest::new("0 2", "4 1").with_session("s1");

    service.schedule("fcfs", &base).unwrap();
    service.schedule("sjf", &base).unwrap();
    service
        .schedule("rr", &base.clone().with_quantum(1))
        .unwrap();

    let all = service.list_history("s1").unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].algorithm, Algorithm::RoundRobin);

    let sjf = service.history_by_algorithm("sjf", "s1").unwrap();
    assert_eq!(sjf.len(), 1);
    assert!(matches!(
        service.history_by_algorithm("edf", "s1"),
        Err(ApiError::UnknownAlgorithm(_))
    ));

    let recent = service.recent_history(2, "s1").unwrap();
    assert_eq!(recent.len(), 2);

    let fetched = service.get_history(sjf[0].id).unwrap();
    assert_eq!(fetched, sjf[0]);

    assert_eq!(service.delete_history(sjf[0].id).unwrap().deleted, 1);
    assert_eq!(service.clear_history("s1").deleted, 2);
    assert!(service.list_history("s1").unwrap().is_empty());
}

async fn start_server(config: ServerConfig) -> (Arc<SimulationServer>, std::net::SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = Arc::new(SimulationServer::new(config, SchedulerService::default()));

    let serving = server.clone();
    tokio::spawn(async move { serving.serve(listener).await });

    for _ in 0..50 {
        if server.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    (server, addr)
}

struct Client {
    reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
    writer: tokio::net::tcp::OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let (reader, writer) = TcpStream::connect(addr).await.unwrap().into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    async fn call(&mut self, line: &str) -> Response {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        let mut reply = String::new();
        self.reader.read_line(&mut reply).await.unwrap();
        serde_json::from_str(&reply).unwrap()
    }
}

#[tokio::test]
async fn test_tcp_round_trip() {
    let (server, addr) = start_server(ServerConfig::default()).await;
    assert!(server.is_running());

    let mut client = Client::connect(addr).await;

    let health = client.call(r#"{"method":"health"}"#).await;
    assert_eq!(
        health.data,
        Some(json!({"status": "UP", "service": "CPU Scheduler"}))
    );

    let scheduled = client
        .call(r#"{"method":"schedule","algorithm":"rr","arrivalTimes":"0 0","burstTimes":"3 2","quantum":"2","sessionId":"tcp"}"#)
        .await;
    assert!(scheduled.ok);
    let data = scheduled.data.unwrap();
    assert_eq!(data["ganttChart"].as_array().map(Vec::len), Some(3));
    assert_eq!(data["averageTAT"], json!(4.5));

    let history = client
        .call(r#"{"method":"recent_history","limit":5,"sessionId":"tcp"}"#)
        .await;
    let entries = history.data.unwrap();
    assert_eq!(entries[0]["algorithm"], Value::from("rr"));
    assert_eq!(entries[0]["quantum"], json!(2));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_malformed_line_keeps_connection() {
    let (server, addr) = start_server(ServerConfig::default()).await;
    let mut client = Client::connect(addr).await;

    let bad = client.call("this is not json").await;
    assert!(!bad.ok);
    assert_eq!(bad.error_type(), Some("invalid_request"));

    let unknown = client
        .call(r#"{"method":"schedule","algorithm":"mlfq","arrivalTimes":"0","burstTimes":"1"}"#)
        .await;
    assert_eq!(unknown.error_type(), Some("unknown_algorithm"));

    let missing = client.call(r#"{"method":"get_history","id":99}"#).await;
    assert_eq!(missing.error_type(), Some("not_found"));

    let ok = client.call(r#"{"method":"health"}"#).await;
    assert!(ok.ok);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_stop_ends_serve_loop() {
    let (server, _addr) = start_server(ServerConfig::default()).await;
    assert!(server.is_running());

    server.stop().await.unwrap();
    for _ in 0..50 {
        if !server.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!server.is_running());
}

#[tokio::test]
async fn test_stop_before_serve_is_honored() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = SimulationServer::new(ServerConfig::default(), SchedulerService::default());

    server.stop().await.unwrap();
    let served = tokio::time::timeout(Duration::from_secs(2), server.serve(listener)).await;

    assert!(matches!(served, Ok(Ok(()))));
    assert!(!server.is_running());
}
