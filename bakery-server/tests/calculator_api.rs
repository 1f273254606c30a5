//! End-to-end tests driving the router in-process

use axum::Router;
use axum::body::Body;
use bakery_server::api::build_app;
use bakery_server::{Config, ServerState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _dir: TempDir,
}

fn setup_with_quota(quota: u64) -> TestApp {
    let dir = TempDir::new().unwrap();
    let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    config.lead_quota_per_tenant = quota;
    let state = ServerState::initialize(&config).unwrap();

    TestApp {
        router: build_app(state),
        _dir: dir,
    }
}

fn setup() -> TestApp {
    setup_with_quota(500)
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }
}

fn classic_cake(decorations: Value, delivery: &str) -> Value {
    json!({
        "category": "cake",
        "tiers": [{"size": "8-round", "shape": "square", "flavor": "vanilla", "frosting": "buttercream"}],
        "decorations": decorations,
        "addons": [],
        "deliveryOption": delivery
    })
}

fn contact() -> Value {
    json!({"name": "Ana Ruiz", "email": "ana@example.com"})
}

#[tokio::test]
async fn test_health() {
    let app = setup();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_public_quote_matches_reference_totals() {
    let app = setup();
    let (status, body) = app
        .send(
            "POST",
            "/api/public/sweet-crumbs/calculator/quote",
            Some(classic_cake(json!(["sprinkles"]), "local")),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], "80.00");
    assert_eq!(body["deliveryTotal"], "25.00");
    assert_eq!(body["tax"], "8.40");
    assert_eq!(body["total"], "113.40");
}

#[tokio::test]
async fn test_public_quote_rejects_oversized_quantity() {
    let app = setup();
    let mut cake = classic_cake(json!([]), "pickup");
    cake["addons"] = json!([{"id": "extra-cupcakes", "quantity": 1e28}]);

    let (status, body) = app
        .send("POST", "/api/public/sweet-crumbs/calculator/quote", Some(cake))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["details"]["field"], "addons");
}

#[tokio::test]
async fn test_submitted_treats_respect_minimum_quantity() {
    let app = setup();
    let (_, body) = app
        .send(
            "POST",
            "/api/public/calculator/submit",
            Some(json!({
                "tenantId": "sweet-crumbs",
                "contact": contact(),
                "configuration": {
                    "category": "treat",
                    "treats": [{"id": "cake-pops", "quantity": 1}],
                    "deliveryOption": "pickup"
                }
            })),
        )
        .await;
    assert_eq!(body["success"], true);

    let (_, leads) = app.get("/api/tenants/sweet-crumbs/leads").await;
    let submission = &leads[0]["submission"];
    assert_eq!(
        submission["calculatorPayload"]["configuration"]["treats"][0]["quantity"],
        2
    );
    assert_eq!(submission["estimatedTotal"], "64.80");
}

#[tokio::test]
async fn test_catalog_overrides_flow_to_public_page() {
    let app = setup();

    let (status, _) = app
        .send(
            "PUT",
            "/api/tenants/sweet-crumbs/catalog/flavors/entries/vanilla/enabled",
            Some(json!({"enabled": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            "PUT",
            "/api/tenants/sweet-crumbs/catalog/flavors/entries",
            Some(json!({"id": "pistachio", "label": "Pistachio", "priceModifier": 12})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "pistachio");

    // admin view keeps the disabled default in place
    let (_, admin) = app.get("/api/tenants/sweet-crumbs/catalog").await;
    let flavors = admin["flavors"].as_array().unwrap();
    assert_eq!(flavors[0]["id"], "vanilla");
    assert_eq!(flavors[0]["enabled"], false);
    assert_eq!(flavors.last().unwrap()["id"], "pistachio");

    // public view only lists selectable entries
    let (_, public) = app.get("/api/public/sweet-crumbs/catalog").await;
    let ids: Vec<&str> = public["flavors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&"vanilla"));
    assert_eq!(ids.last(), Some(&"pistachio"));

    // other tenants are untouched
    let (_, other) = app.get("/api/public/other-bakery/catalog").await;
    assert_eq!(other["flavors"][0]["id"], "vanilla");

    let (_, doc) = app.get("/api/tenants/sweet-crumbs/catalog/override").await;
    assert_eq!(doc["flavors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_default_entry_cannot_be_deleted() {
    let app = setup();

    let (status, body) = app
        .send("DELETE", "/api/tenants/sweet-crumbs/catalog/shapes/entries/square", None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6004);

    let (status, body) = app
        .send("DELETE", "/api/tenants/sweet-crumbs/catalog/toppings/entries/x", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn test_replace_override_requires_ids() {
    let app = setup();

    let (status, body) = app
        .send(
            "PUT",
            "/api/tenants/sweet-crumbs/catalog/override",
            Some(json!({"shapes": [{"label": "Star"}]})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);

    let (status, _) = app
        .send(
            "PUT",
            "/api/tenants/sweet-crumbs/catalog/override",
            Some(json!({"deliveryOptions": [{"id": "local", "price": 30}]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(
            "POST",
            "/api/public/sweet-crumbs/calculator/quote",
            Some(classic_cake(json!([]), "local")),
        )
        .await;
    assert_eq!(body["deliveryTotal"], "30.00");
}

#[tokio::test]
async fn test_submit_and_build_quote_draft() {
    let app = setup();

    let (status, body) = app
        .send(
            "POST",
            "/api/public/calculator/submit",
            Some(json!({
                "tenantId": "sweet-crumbs",
                "contact": {
                    "name": "Ana Ruiz",
                    "email": "ana@example.com",
                    "deliveryAddress": "12 Baker St"
                },
                "configuration": classic_cake(json!(["sprinkles"]), "local")
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["limitReached"], false);
    let lead_id = body["leadId"].as_str().unwrap().to_string();

    let (_, leads) = app.get("/api/tenants/sweet-crumbs/leads").await;
    let leads = leads.as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["submission"]["estimatedTotal"], "113.40");
    assert_eq!(leads[0]["submission"]["calculatorPayload"]["fastQuote"], false);

    let (status, draft) = app
        .get(&format!(
            "/api/tenants/sweet-crumbs/leads/{lead_id}/quote-draft?taxRate=10"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["lines"].as_array().unwrap().len(), 3);
    assert_eq!(draft["totals"]["tax"], "10.50");
    assert_eq!(draft["totals"]["total"], "115.50");

    let (status, body) = app
        .get(&format!(
            "/api/tenants/sweet-crumbs/leads/{lead_id}/quote-draft?taxRate=150"
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);

    // leads are tenant-scoped
    let (status, _) = app
        .get(&format!("/api/tenants/other-bakery/leads/{lead_id}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_validation_errors_name_the_field() {
    let app = setup();

    let (status, body) = app
        .send(
            "POST",
            "/api/public/calculator/submit",
            Some(json!({
                "tenantId": "sweet-crumbs",
                "contact": contact(),
                "configuration": classic_cake(json!([]), "local")
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);
    assert_eq!(body["details"]["field"], "deliveryAddress");

    let (_, leads) = app.get("/api/tenants/sweet-crumbs/leads").await;
    assert!(leads.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_fast_quote_submission() {
    let app = setup();

    let (status, _) = app
        .send(
            "PUT",
            "/api/tenants/sweet-crumbs/featured-items",
            Some(json!({"id": "wedding-classic", "name": "Classic Wedding Cake", "price": 450})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, items) = app.get("/api/public/sweet-crumbs/featured-items").await;
    assert_eq!(items.as_array().unwrap().len(), 1);

    let request = |contact: Value| {
        json!({
            "tenantId": "sweet-crumbs",
            "fastQuote": true,
            "featuredItemId": "wedding-classic",
            "contact": contact
        })
    };

    let (status, body) = app
        .send("POST", "/api/public/calculator/submit", Some(request(contact())))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "eventDate");

    let mut dated = contact();
    dated["eventDate"] = json!("2026-12-05");
    let (status, body) = app
        .send("POST", "/api/public/calculator/submit", Some(request(dated)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, leads) = app.get("/api/tenants/sweet-crumbs/leads").await;
    let payload = &leads[0]["submission"]["calculatorPayload"];
    assert_eq!(payload["fastQuote"], true);
    assert_eq!(payload["featuredItem"]["id"], "wedding-classic");
    assert!(payload.get("configuration").is_none());
    assert_eq!(leads[0]["submission"]["estimatedTotal"], "450.00");
}

#[tokio::test]
async fn test_lead_quota_reports_limit_reached() {
    let app = setup_with_quota(1);
    let request = json!({
        "tenantId": "sweet-crumbs",
        "contact": contact(),
        "configuration": {
            "category": "treat",
            "treats": [{"id": "cupcakes-standard", "quantity": 2}],
            "deliveryOption": "pickup"
        }
    });

    let (_, first) = app
        .send("POST", "/api/public/calculator/submit", Some(request.clone()))
        .await;
    assert_eq!(first["success"], true);

    let (status, second) = app
        .send("POST", "/api/public/calculator/submit", Some(request))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], false);
    assert_eq!(second["limitReached"], true);

    let (_, leads) = app.get("/api/tenants/sweet-crumbs/leads").await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["submission"]["estimatedTotal"], "77.76");
}
