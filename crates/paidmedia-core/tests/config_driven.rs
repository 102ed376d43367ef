use std::fs;
use std::path::Path;

use paidmedia_core::{
    AggregateStatus,
    ConfigLoader,
    DateRange,
    HealthStatus,
    PaidMediaContext,
    ProviderErrorKind,
};
use serde_json::json;

fn write_snapshot(dir: &Path, name: &str, snapshot: serde_json::Value) -> String {
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path.display().to_string()
}

fn january() -> DateRange {
    DateRange::new(
        "2024-01-01".parse().unwrap(),
        "2024-01-31".parse().unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn context_from_toml_serves_fixture_snapshots() {
    let dir = tempfile::tempdir().unwrap();

    let meta = write_snapshot(
        dir.path(),
        "meta",
        json!({
            "project_id": "acme",
            "metrics": [
                { "date": "2024-01-01", "spend": 100.0, "impressions": 1000, "clicks": 40 },
                { "date": "2023-12-31", "spend": 999.0 }
            ],
            "accounts": [{
                "id": "act_1",
                "name": "Acme Meta",
                "status": "active",
                "campaigns": []
            }],
            "data_health": { "status": "healthy", "confidence": 0.95 }
        }),
    );
    let google = write_snapshot(
        dir.path(),
        "google",
        json!({
            "metrics": [
                { "date": "2024-01-01", "spend": 50.0, "impressions": 500, "clicks": 10 },
                { "date": "2024-01-02", "spend": 20.0 }
            ],
            "data_health": { "status": "healthy", "confidence": 1.0 }
        }),
    );

    let config_path = dir.path().join("paidmedia.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[aggregation]
provider_timeout_secs = 5
max_concurrent_providers = 2

[providers.meta]
type = "fixture"
config = {{ path = '{meta}' }}

[providers.google]
type = "fixture"
config = {{ path = '{google}', latency_ms = "10" }}

[providers.tiktok]
type = "fixture"
config = {{ path = '{missing}' }}
"#,
            missing = dir.path().join("tiktok.json").display()
        ),
    )
    .unwrap();

    let config = ConfigLoader::load(&config_path).unwrap();
    let ctx = PaidMediaContext::from_config(config).unwrap();
    assert_eq!(
        ctx.get_provider_names(),
        vec![
            "google".to_string(),
            "meta".to_string(),
            "tiktok".to_string()
        ]
    );

    let report = ctx
        .service
        .get_aggregated_metrics("acme", &january())
        .await
        .unwrap();
    assert_eq!(report.status, AggregateStatus::Partial);
    assert_eq!(report.days.len(), 2);
    assert_eq!(report.days[0].spend, 150.0);
    assert_eq!(report.days[0].impressions, 1500);
    assert_eq!(report.days[0].clicks, 50);
    assert_eq!(report.days[1].spend, 20.0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].provider, "tiktok");

    let other_project = ctx
        .service
        .get_metrics_from_provider("meta", "globex", &january())
        .await
        .unwrap();
    assert_eq!(
        other_project.error.unwrap().kind,
        ProviderErrorKind::ProviderUnknownError
    );

    let hierarchy = ctx.service.get_aggregated_hierarchy("acme").await.unwrap();
    assert_eq!(hierarchy.summary.total_accounts, 1);
    assert_eq!(hierarchy.by_provider["meta"].accounts[0].id, "act_1");

    let health = ctx
        .service
        .get_aggregated_data_health("acme", &january())
        .await
        .unwrap();
    assert_eq!(health.overall, HealthStatus::Degraded);
    assert_eq!(health.overall_confidence, 0.0);
}

#[test]
fn unknown_provider_type_fails_context_creation() {
    let config = ConfigLoader::parse(
        r#"
[providers.meta]
type = "carrier-pigeon"
"#,
    )
    .unwrap();

    assert!(PaidMediaContext::from_config(config).is_err());
}
