use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Record {
    date: String,
    coins_before: u64,
    coins_after: u64,
    coins_earned: u64,
    play_count: u64,
    tsum_used: String,
    memo: String,
}

#[derive(Debug, Deserialize)]
struct DailyPoint {
    date: String,
    coins_earned: u64,
}

#[derive(Debug, Deserialize)]
struct MonthlyPoint {
    month: String,
    coins_earned: u64,
}

#[derive(Debug, Deserialize)]
struct Dashboard {
    total_earned: u64,
    daily: Vec<DailyPoint>,
    monthly: Vec<MonthlyPoint>,
    records: Vec<Record>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
mod cleanup {
    use once_cell::sync::Lazy;
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Lazy<Mutex<Vec<i32>>> = Lazy::new(|| Mutex::new(Vec::new()));

    pub fn register(pid: u32) {
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
        PIDS.lock().unwrap().push(pid as i32);
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_store_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "tsum_coin_log_http_{}_{}.csv",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let store_path = unique_store_path();
    let child = Command::new(env!("CARGO_BIN_EXE_tsum_coin_log"))
        .env("PORT", port.to_string())
        .env("COIN_LOG_PATH", store_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn fetch_dashboard(client: &Client, server: &TestServer) -> Dashboard {
    client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_empty_store_has_empty_dashboard() {
    let server = spawn_server().await;
    let client = Client::new();

    let dashboard = fetch_dashboard(&client, &server).await;
    assert_eq!(dashboard.total_earned, 0);
    assert!(dashboard.daily.is_empty());
    assert!(dashboard.monthly.is_empty());
    assert!(dashboard.records.is_empty());
}

#[tokio::test]
async fn http_submit_stores_record_and_updates_buckets() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/records", server.base_url))
        .json(&serde_json::json!({
            "date": "2024-01-10",
            "coins_before": 10000,
            "coins_after": 15000,
            "play_count": 3,
            "tsum_used": "Mickey",
            "memo": "lucky"
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let stored: Record = response.json().await.unwrap();
    assert_eq!(stored.date, "2024-01-10");
    assert_eq!(stored.coins_before, 10000);
    assert_eq!(stored.coins_after, 15000);
    assert_eq!(stored.coins_earned, 5000);
    assert_eq!(stored.play_count, 3);
    assert_eq!(stored.tsum_used, "Mickey");
    assert_eq!(stored.memo, "lucky");

    let dashboard = fetch_dashboard(&client, &server).await;
    assert_eq!(dashboard.total_earned, 5000);
    assert_eq!(dashboard.records.len(), 1);
    assert_eq!(dashboard.daily.len(), 1);
    assert_eq!(dashboard.daily[0].date, "2024-01-10");
    assert_eq!(dashboard.daily[0].coins_earned, 5000);
    assert_eq!(dashboard.monthly.len(), 1);
    assert_eq!(dashboard.monthly[0].month, "2024-01");
    assert_eq!(dashboard.monthly[0].coins_earned, 5000);
}

#[tokio::test]
async fn http_rejects_after_below_before() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/records", server.base_url))
        .json(&serde_json::json!({
            "date": "2024-01-10",
            "coins_before": 20000,
            "coins_after": 19000
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let message = response.text().await.unwrap();
    assert!(message.contains("coins before"));

    let dashboard = fetch_dashboard(&client, &server).await;
    assert_eq!(dashboard.total_earned, 0);
    assert!(dashboard.records.is_empty());
}

#[tokio::test]
async fn http_same_day_submissions_share_one_daily_bucket() {
    let server = spawn_server().await;
    let client = Client::new();

    for (before, after) in [(0, 5000), (5000, 8000)] {
        let response = client
            .post(format!("{}/api/records", server.base_url))
            .json(&serde_json::json!({
                "date": "2024-01-10",
                "coins_before": before,
                "coins_after": after
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let dashboard = fetch_dashboard(&client, &server).await;
    assert_eq!(dashboard.daily.len(), 1);
    assert_eq!(dashboard.daily[0].coins_earned, 8000);
    assert_eq!(dashboard.records.len(), 2);
    assert_eq!(dashboard.records[0].coins_earned, 5000);
    assert_eq!(dashboard.records[1].coins_earned, 3000);
}

#[tokio::test]
async fn http_table_is_sorted_by_date_descending() {
    let server = spawn_server().await;
    let client = Client::new();

    for date in ["2024-01-09", "2024-01-10", "2024-01-08"] {
        let response = client
            .post(format!("{}/api/records", server.base_url))
            .json(&serde_json::json!({
                "date": date,
                "coins_before": 0,
                "coins_after": 1000
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let dashboard = fetch_dashboard(&client, &server).await;
    let dates: Vec<&str> = dashboard.records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-10", "2024-01-09", "2024-01-08"]);
}

#[tokio::test]
async fn http_form_post_appends_and_redirects_home() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/records", server.base_url))
        .form(&[
            ("date", "2024-01-10"),
            ("coins_before", "10000"),
            ("coins_after", "15000"),
            ("play_count", ""),
            ("tsum_used", ""),
            ("memo", ""),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Tsum Coin Log"));

    let dashboard = fetch_dashboard(&client, &server).await;
    assert_eq!(dashboard.records.len(), 1);
    assert_eq!(dashboard.records[0].coins_earned, 5000);
    assert_eq!(dashboard.records[0].play_count, 0);
}
