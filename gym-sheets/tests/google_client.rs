//! End-to-end tests of GoogleSheetsClient against a local mock of the
//! OAuth token endpoint and the Sheets values API.

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use gym_sheets::{GoogleSheetsClient, MemberStore, SheetsConfig, SheetsError, auth::AssertionClaims};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::models::MemberRecord;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;

const ACCESS_TOKEN: &str = "ya29.mock-access-token";
const SPREADSHEET_ID: &str = "1AbCdEfGhIjKlMnOp";

/// (private PKCS#8 PEM, public SPKI PEM), generated once per test binary
fn rsa_keys() -> &'static (String, String) {
    static KEYS: OnceLock<(String, String)> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private = rsa::RsaPrivateKey::new(&mut rng, 2048).expect("generate RSA key");
        let private_pem = private
            .to_pkcs8_pem(LineEnding::LF)
            .expect("encode private key")
            .as_str()
            .to_owned();
        let public_pem = private
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("encode public key");
        (private_pem, public_pem)
    })
}

struct MockGoogle {
    token_uri: String,
    rows: Mutex<Vec<Vec<Value>>>,
    put_queries: Mutex<Vec<HashMap<String, String>>>,
}

#[derive(Deserialize)]
struct TokenForm {
    grant_type: String,
    assertion: String,
}

async fn token(State(mock): State<Arc<MockGoogle>>, Form(form): Form<TokenForm>) -> impl IntoResponse {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&mock.token_uri]);

    let key = DecodingKey::from_rsa_pem(rsa_keys().1.as_bytes()).expect("public key");
    let verified = decode::<AssertionClaims>(&form.assertion, &key, &validation);

    match verified {
        Ok(data)
            if form.grant_type == "urn:ietf:params:oauth:grant-type:jwt-bearer"
                && data.claims.scope == "https://www.googleapis.com/auth/spreadsheets" =>
        {
            (
                StatusCode::OK,
                Json(json!({
                    "access_token": ACCESS_TOKEN,
                    "expires_in": 3599,
                    "token_type": "Bearer"
                })),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid JWT Signature."
            })),
        ),
    }
}

fn google_error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message } })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ACCESS_TOKEN}"))
}

async fn get_values(
    State(mock): State<Arc<MockGoogle>>,
    Path((id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return google_error(StatusCode::UNAUTHORIZED, "Request had invalid authentication credentials.");
    }
    if id != SPREADSHEET_ID {
        return google_error(StatusCode::NOT_FOUND, "Requested entity was not found.");
    }
    if range != "Members!A2:F" {
        return google_error(StatusCode::BAD_REQUEST, &format!("Unable to parse range: {range}"));
    }

    let rows = mock.rows.lock().await;
    let mut body = json!({ "range": "Members!A2:F1000", "majorDimension": "ROWS" });
    if !rows.is_empty() {
        body["values"] = json!(*rows);
    }
    (StatusCode::OK, Json(body))
}

async fn put_values(
    State(mock): State<Arc<MockGoogle>>,
    Path((_id, range)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return google_error(StatusCode::UNAUTHORIZED, "Request had invalid authentication credentials.");
    }
    if range != "Members!A2:F" {
        return google_error(StatusCode::BAD_REQUEST, &format!("Unable to parse range: {range}"));
    }
    mock.put_queries.lock().await.push(query);

    let incoming: Vec<Vec<Value>> = serde_json::from_value(body["values"].clone()).unwrap_or_default();
    let mut rows = mock.rows.lock().await;
    for (i, row) in incoming.iter().enumerate() {
        match rows.get_mut(i) {
            Some(slot) => *slot = row.clone(),
            None => rows.push(row.clone()),
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "spreadsheetId": SPREADSHEET_ID, "updatedRows": incoming.len() })),
    )
}

struct Harness {
    mock: Arc<MockGoogle>,
    config: SheetsConfig,
    _key_file: tempfile::NamedTempFile,
}

async fn start() -> Harness {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let token_uri = format!("http://{addr}/token");

    let mock = Arc::new(MockGoogle {
        token_uri: token_uri.clone(),
        rows: Mutex::new(Vec::new()),
        put_queries: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/token", post(token))
        .route(
            "/v4/spreadsheets/{id}/values/{range}",
            get(get_values).put(put_values),
        )
        .with_state(mock.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    let key = json!({
        "type": "service_account",
        "client_email": "gym-desk@gym-project.iam.gserviceaccount.com",
        "private_key_id": "kid-1",
        "private_key": rsa_keys().0,
        "token_uri": token_uri,
    });
    key_file.write_all(key.to_string().as_bytes()).unwrap();

    let config = SheetsConfig::new(SPREADSHEET_ID, key_file.path())
        .with_api_base_url(format!("http://{addr}/v4"))
        .with_timeout(5);

    Harness {
        mock,
        config,
        _key_file: key_file,
    }
}

fn members() -> Vec<MemberRecord> {
    [
        ["Ana Ruiz", "600111222", "1990-05-01", "female", "165", "58"],
        ["Bo Lind", "600333444", "1985-11-23", "male", "182", "84"],
    ]
    .iter()
    .map(|r| MemberRecord::from_row(&r.map(String::from)))
    .collect()
}

#[tokio::test]
async fn test_round_trip_through_google_client() {
    let h = start().await;
    let store = gym_sheets::connect(&h.config).unwrap();

    store.update_members(&members()).await.unwrap();
    assert_eq!(store.read_members().await.unwrap(), members());

    let queries = h.mock.put_queries.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].get("valueInputOption").map(String::as_str),
        Some("USER_ENTERED")
    );
}

#[tokio::test]
async fn test_empty_range_reads_as_no_members() {
    let h = start().await;
    let store = gym_sheets::connect(&h.config).unwrap();
    assert!(store.read_members().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_numeric_cells_are_rendered_as_text() {
    let h = start().await;
    *h.mock.rows.lock().await = vec![vec![
        json!("Cy"),
        json!("600"),
        json!("2001-01-01"),
        json!("male"),
        json!(175),
        json!(70.5),
    ]];

    let store = gym_sheets::connect(&h.config).unwrap();
    let read = store.read_members().await.unwrap();
    assert_eq!(read[0].height, "175");
    assert_eq!(read[0].weight, "70.5");
}

#[tokio::test]
async fn test_rejected_assertion_is_auth_error() {
    let h = start().await;
    let mut config = h.config.clone();
    config.scope = "https://www.googleapis.com/auth/drive".into();

    let store = gym_sheets::connect(&config).unwrap();
    let err = store.read_members().await.unwrap_err();
    match err {
        SheetsError::Auth(reason) => assert!(reason.contains("invalid_grant")),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_propagates_with_google_message() {
    let h = start().await;
    let store = MemberStore::new(
        Arc::new(GoogleSheetsClient::new(&h.config).unwrap()),
        "Bogus!A1",
    );

    let err = store.read_members().await.unwrap_err();
    match err {
        SheetsError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unable to parse range: Bogus!A1");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_key_file() {
    let h = start().await;
    let config = SheetsConfig::new(SPREADSHEET_ID, "/nonexistent/credentials.json")
        .with_api_base_url(h.config.api_base_url.clone());

    let store = gym_sheets::connect(&config).unwrap();
    let err = store.update_members(&members()).await.unwrap_err();
    assert!(matches!(err, SheetsError::KeyFile { .. }));
}
