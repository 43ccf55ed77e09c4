use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use doppler_sdk::{Auth, Client, ClientBuilder, ServiceAccountBodyParams, ServiceAccounts};
use serde_json::json;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

/// Create a mock server with the service account endpoints
async fn setup_mock_server() -> MockServer {
    let server = MockServer::start().await;

    let accounts: Vec<_> = (0..100)
        .map(|i| {
            json!({
                "name": format!("account-{}", i),
                "slug": format!("account-{}", i),
                "created_at": "2024-01-01T00:00:00.000Z",
                "workplace_role": {"name": "Viewer", "identifier": "viewer"}
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path_regex(r"^/v3/workplace/service_accounts$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"service_accounts": accounts, "success": true}))
                .set_delay(Duration::from_millis(10)), // Simulate network latency
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v3/workplace/service_accounts$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "service_account": {"name": "bench", "slug": "bench"},
                    "success": true
                }))
                .set_delay(Duration::from_millis(15)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v3/workplace/service_accounts/service_account/[^/]+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "service_account": {"name": "bench", "slug": "bench"},
                    "success": true
                }))
                .set_delay(Duration::from_millis(10)),
        )
        .mount(&server)
        .await;

    server
}

fn path_regex(pattern: &str) -> wiremock::matchers::PathRegexMatcher {
    wiremock::matchers::path_regex(pattern)
}

fn bench_client(server: &MockServer) -> Client {
    ClientBuilder::new()
        .base_url(server.uri())
        .auth(Auth::bearer("bench-token"))
        .timeout_ms(30000)
        .allow_insecure_http()
        .build()
        .expect("Failed to build client")
}

fn bench_decode_list(c: &mut Criterion) {
    let body = serde_json::to_vec(&json!({
        "service_accounts": (0..100)
            .map(|i| json!({"name": format!("account-{}", i), "slug": format!("account-{}", i)}))
            .collect::<Vec<_>>(),
        "success": true
    }))
    .unwrap();

    c.bench_function("decode_service_accounts_100", |b| {
        b.iter(|| {
            let list: ServiceAccounts = serde_json::from_slice(black_box(&body)).unwrap();
            black_box(list);
        });
    });
}

fn bench_list_service_accounts(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(setup_mock_server());
    let client = bench_client(&server);

    c.bench_function("list_service_accounts", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = client
                    .list_service_accounts(black_box(None), black_box(Some(100)))
                    .await
                    .expect("Failed to list service accounts");
            });
        });
    });
}

fn bench_create_service_account(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(setup_mock_server());
    let client = bench_client(&server);
    let params = ServiceAccountBodyParams::new("bench").with_role_identifier("viewer");

    c.bench_function("create_service_account", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = client
                    .create_service_account(black_box(&params))
                    .await
                    .expect("Failed to create service account");
            });
        });
    });
}

fn bench_concurrent_requests(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(setup_mock_server());
    let client = bench_client(&server);

    let mut group = c.benchmark_group("concurrent_retrieve");

    for concurrency in [1, 5, 10, 20].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(concurrency),
            concurrency,
            |b, &concurrency| {
                b.iter(|| {
                    rt.block_on(async {
                        let mut tasks = Vec::new();

                        for i in 0..concurrency {
                            let client = client.clone();
                            let task = tokio::spawn(async move {
                                client
                                    .retrieve_service_account(&format!("account-{}", i))
                                    .await
                                    .expect("Failed to retrieve service account")
                            });
                            tasks.push(task);
                        }

                        for task in tasks {
                            let _ = task.await.expect("Task panicked");
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_list,
    bench_list_service_accounts,
    bench_create_service_account,
    bench_concurrent_requests
);
criterion_main!(benches);
