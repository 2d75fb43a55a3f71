use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct WaterProgress {
    date: String,
    water_ml: u32,
    goal_ml: u32,
}

#[derive(Debug, Deserialize)]
struct Workout {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct Goal {
    id: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct GoalToggle {
    goal: Goal,
    just_completed: bool,
}

#[derive(Debug, Deserialize)]
struct DailyPoint {
    date: String,
    calories: u64,
}

#[derive(Debug, Deserialize)]
struct Stats {
    streak: u32,
    last_7_days: Vec<DailyPoint>,
    total_workouts: usize,
}

#[derive(Debug, Deserialize)]
struct Bmi {
    bmi: f64,
    category: String,
}

#[derive(Debug, Deserialize)]
struct Profile {
    bmi: Bmi,
}

#[derive(Debug, Deserialize)]
struct Quote {
    quote: String,
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

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("fit_track_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/water")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_fit_track"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_water_accumulates_for_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: WaterProgress = client
        .get(format!("{}/api/water", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    for _ in 0..2 {
        let response = client
            .post(format!("{}/api/water", server.base_url))
            .json(&serde_json::json!({ "amount_ml": 250 }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let after: WaterProgress = client
        .get(format!("{}/api/water", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(after.water_ml, before.water_ml + 500);
    assert_eq!(after.goal_ml, 2000);
    assert_eq!(after.date, before.date);
}

#[tokio::test]
async fn http_workout_feeds_streak_and_weekly_series() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/workouts", server.base_url))
        .json(&serde_json::json!({ "type": "Running", "duration": 30, "calories": 320 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let workout: Workout = response.json().await.unwrap();
    assert_eq!(workout.kind, "Running");
    assert!(!workout.id.is_empty());

    let stats: Stats = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(stats.streak >= 1);
    assert!(stats.total_workouts >= 1);
    assert_eq!(stats.last_7_days.len(), 7);
    let today = stats.last_7_days.last().unwrap();
    assert_eq!(today.date, workout.date);
    assert!(today.calories >= 320);

    let deleted = client
        .delete(format!("{}/api/workouts/{}", server.base_url, workout.id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn http_rejects_workout_without_type() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/workouts", server.base_url))
        .json(&serde_json::json!({ "type": " ", "duration": 30, "calories": 100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = client
        .delete(format!("{}/api/workouts/does-not-exist", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_goal_toggle_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let goal: Goal = client
        .post(format!("{}/api/goals", server.base_url))
        .json(&serde_json::json!({ "title": "Run a 10k" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!goal.completed);

    let toggled: GoalToggle = client
        .post(format!("{}/api/goals/{}/toggle", server.base_url, goal.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.just_completed);
    assert!(toggled.goal.completed);
}

#[tokio::test]
async fn http_profile_reports_bmi() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let profile: Profile = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({
            "name": "Sam",
            "age": "31",
            "height": "170",
            "weight": "70"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(profile.bmi.bmi, 24.2);
    assert_eq!(profile.bmi.category, "Healthy Weight");
}

#[tokio::test]
async fn http_quote_is_stable_within_a_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut quotes = Vec::new();
    for _ in 0..2 {
        let quote: Quote = client
            .get(format!("{}/api/quote", server.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        quotes.push(quote.quote);
    }
    assert!(!quotes[0].is_empty());
    assert_eq!(quotes[0], quotes[1]);
}

#[tokio::test]
async fn http_water_form_redirects_to_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let before: WaterProgress = client
        .get(format!("{}/api/water", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/water/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/");

    let after: WaterProgress = client
        .get(format!("{}/api/water", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.water_ml, before.water_ml + 250);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(&format!("{}ml / 2000ml", after.water_ml)));
    assert!(!page.contains("{{"));
}
