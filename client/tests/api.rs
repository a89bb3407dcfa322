use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use real_estate_marketplace_client::board::{
    PropertyBoard, SearchForm, LOAD_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE,
};
use real_estate_marketplace_client::models::{
    AgreementStatus, BookingStatus, CounterOffer, InquiryStatus, NewBooking, NewInquiry, NewOffer,
    NewProperty, NewRentalAgreement, NewUser, OfferStatus, PropertyStatus, PropertyType,
    PropertyUpdate, Role, UserUpdate,
};
use real_estate_marketplace_client::properties::ImageFile;
use real_estate_marketplace_client::{ApiBody, ClientConfig, ClientError, MarketplaceClient, PropertyFilters};

#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    path: String,
    content_type: Option<String>,
    authorization: Option<String>,
    body: String,
}

impl Seen {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

type Responder = Arc<dyn Fn(&Method, &str) -> Response + Send + Sync>;

#[derive(Clone)]
struct Stub {
    seen: Arc<Mutex<Vec<Seen>>>,
    respond: Responder,
}

async fn record(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|p| p.to_string())
        .unwrap_or_default();
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    stub.seen.lock().unwrap().push(Seen {
        method: method.clone(),
        path: path.clone(),
        content_type: header_str(header::CONTENT_TYPE),
        authorization: header_str(header::AUTHORIZATION),
        body,
    });
    (stub.respond)(&method, &path)
}

struct Backend {
    client: MarketplaceClient,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Method, &str) -> Response + Send + Sync + 'static,
    {
        Self::start_with(respond, None).await
    }

    async fn start_with<F>(respond: F, auth_token: Option<&str>) -> Self
    where
        F: Fn(&Method, &str) -> Response + Send + Sync + 'static,
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let stub = Stub {
            seen: seen.clone(),
            respond: Arc::new(respond),
        };
        let app = Router::new().fallback(record).with_state(stub);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = ClientConfig::with_api_base(format!("http://{}/api", addr));
        config.auth_token = auth_token.map(str::to_string);
        let client = MarketplaceClient::new(&config).unwrap();
        Self { client, seen }
    }

    fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn last(&self) -> Seen {
        self.requests().pop().expect("at least one request")
    }
}

fn json_response(value: Value) -> Response {
    Json(value).into_response()
}

fn sample_properties() -> Value {
    json!([
        {
            "id": 1,
            "title": "Lake view villa",
            "type": "SALE",
            "location": "Kandy",
            "price": 25000000,
            "status": "AVAILABLE"
        },
        {
            "id": 2,
            "title": "City apartment",
            "type": "RENT",
            "location": "Colombo 03",
            "rentAmount": 120000,
            "status": "AVAILABLE"
        }
    ])
}

#[tokio::test]
async fn fetch_all_properties_sends_filters_as_query() {
    let backend = Backend::start(|_, _| json_response(sample_properties())).await;

    let filters = PropertyFilters {
        kind: Some("RENT".to_string()),
        location: Some(String::new()),
        min_rent: Some("50000".to_string()),
        ..PropertyFilters::available()
    };
    let properties = backend.client.fetch_all_properties(&filters).await.unwrap();

    assert_eq!(properties.len(), 2);
    assert_eq!(properties[1].rent_amount, Some(120000.0));
    let seen = backend.last();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, "/api/properties?type=RENT&status=AVAILABLE&minRent=50000");
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert!(seen.body.is_empty());
}

#[tokio::test]
async fn create_property_posts_json_payload() {
    let backend = Backend::start(|_, _| {
        (
            StatusCode::CREATED,
            Json(json!({"id": 9, "title": "Beach plot", "type": "SALE", "status": "AVAILABLE"})),
        )
            .into_response()
    })
    .await;

    let created = backend
        .client
        .create_property(&NewProperty {
            title: "Beach plot".to_string(),
            kind: PropertyType::Sale,
            location: "Galle".to_string(),
            price: Some(8_500_000.0),
            rent_amount: None,
            description: Some("20 perches".to_string()),
            seller_id: 4,
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(9));
    let seen = backend.last();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.path, "/api/properties");
    assert_eq!(
        seen.json(),
        json!({
            "title": "Beach plot",
            "type": "SALE",
            "location": "Galle",
            "price": 8500000.0,
            "description": "20 perches",
            "sellerId": 4
        })
    );
}

#[tokio::test]
async fn error_response_text_becomes_the_message() {
    let backend = Backend::start(|_, _| {
        (StatusCode::BAD_REQUEST, "Error: Property not found").into_response()
    })
    .await;

    let err = backend.client.fetch_property_by_id(77).await.unwrap_err();
    match &err {
        ClientError::Http { status, message } => {
            assert_eq!(*status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Error: Property not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "Error: Property not found");
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status() {
    let backend = Backend::start(|_, _| StatusCode::NOT_FOUND.into_response()).await;

    let err = backend.client.fetch_offer_by_id(3).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn text_responses_are_passed_through() {
    let backend = Backend::start(|method, path| match (method.as_str(), path) {
        ("DELETE", "/api/properties/5") => "Property deleted successfully".into_response(),
        ("POST", "/api/inquiries/archive-old") => "Archived 3 inquiries".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    })
    .await;

    assert_eq!(
        backend.client.delete_property(5).await.unwrap(),
        "Property deleted successfully"
    );
    assert_eq!(
        backend.client.archive_old_inquiries().await.unwrap(),
        "Archived 3 inquiries"
    );

    let body = backend
        .client
        .api_call::<()>(Method::DELETE, "/properties/5", None)
        .await
        .unwrap();
    assert_eq!(body, ApiBody::Text("Property deleted successfully".to_string()));
}

#[tokio::test]
async fn status_updates_use_the_backend_verbs() {
    let backend = Backend::start(|_, _| json_response(json!({"id": 1}))).await;
    let client = &backend.client;

    client.update_booking_status(1, BookingStatus::Confirmed).await.unwrap();
    client.update_inquiry_status(2, InquiryStatus::Resolved).await.unwrap();
    client.update_offer_status(3, OfferStatus::Rejected).await.unwrap();
    client
        .update_rental_agreement_status(4, AgreementStatus::Terminated)
        .await
        .unwrap();
    client
        .update_property_status(5, PropertyStatus::Maintenance)
        .await
        .unwrap();

    let seen: Vec<(Method, String, Value)> = backend
        .requests()
        .iter()
        .map(|s| (s.method.clone(), s.path.clone(), s.json()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Method::PUT, "/api/bookings/1/status".to_string(), json!({"status": "CONFIRMED"})),
            (Method::PATCH, "/api/inquiries/2/status".to_string(), json!({"status": "RESOLVED"})),
            (Method::PATCH, "/api/offers/3/status".to_string(), json!({"status": "REJECTED"})),
            (
                Method::PATCH,
                "/api/rental-agreements/4/status".to_string(),
                json!({"status": "TERMINATED"})
            ),
            (Method::PATCH, "/api/properties/5/status".to_string(), json!({"status": "MAINTENANCE"})),
        ]
    );
}

#[tokio::test]
async fn offer_negotiation_calls() {
    let backend = Backend::start(|_, path| match path {
        "/api/offers/8/accept" => json_response(json!({"id": 8, "status": "ACCEPTED"})),
        "/api/offers/8/counter" => (
            StatusCode::CREATED,
            Json(json!({"id": 11, "price": 9000000, "status": "PENDING"})),
        )
            .into_response(),
        _ => json_response(json!([])),
    })
    .await;

    let accepted = backend.client.accept_offer(8).await.unwrap();
    assert_eq!(accepted.status.as_deref(), Some("ACCEPTED"));
    let accept = backend.last();
    assert_eq!(accept.method, Method::POST);
    assert!(accept.body.is_empty());

    let counter = backend
        .client
        .counter_offer(
            8,
            &CounterOffer {
                price: 9_000_000.0,
                terms: Some("Cash within 30 days".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(counter.id, Some(11));
    assert_eq!(
        backend.last().json(),
        json!({"price": 9000000.0, "terms": "Cash within 30 days"})
    );

    backend.client.fetch_offers_by_status(OfferStatus::Countered).await.unwrap();
    assert_eq!(backend.last().path, "/api/offers/status/COUNTERED");
    backend.client.expire_old_offers().await.unwrap();
    assert_eq!(backend.last().path, "/api/offers/expire-old");
}

#[tokio::test]
async fn rental_agreement_lifecycle_calls() {
    let backend = Backend::start(|method, _| {
        if *method == Method::GET {
            json_response(json!([{
                "id": 6,
                "rent": 75000,
                "durationMonths": 12,
                "startDate": "2024-02-01",
                "status": "ACTIVE"
            }]))
        } else {
            json_response(json!({"id": 6, "durationMonths": 18, "startDate": "2024-02-01"}))
        }
    })
    .await;
    let client = &backend.client;

    let created = client
        .create_rental_agreement(&NewRentalAgreement {
            property_id: 2,
            tenant_id: 7,
            landlord_id: 4,
            rent: 75_000.0,
            duration_months: 12,
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(created.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    assert_eq!(
        backend.last().json(),
        json!({
            "propertyId": 2,
            "tenantId": 7,
            "landlordId": 4,
            "rent": 75000.0,
            "durationMonths": 12,
            "startDate": "2024-02-01"
        })
    );

    let extended = client.extend_rental_agreement(6, 6).await.unwrap();
    assert_eq!(extended.duration_months, Some(18));
    let extend = backend.last();
    assert_eq!(extend.method, Method::PATCH);
    assert_eq!(extend.path, "/api/rental-agreements/6/extend");
    assert_eq!(extend.json(), json!({"additionalMonths": 6}));

    let expiring = client.fetch_expiring_agreements(30).await.unwrap();
    assert_eq!(expiring[0].rent, Some(75000.0));
    assert_eq!(backend.last().path, "/api/rental-agreements/expiring?days=30");

    client.fetch_rental_agreements_by_landlord(4).await.unwrap();
    assert_eq!(backend.last().path, "/api/rental-agreements/landlord/4");
}

#[tokio::test]
async fn login_posts_credentials_and_returns_user() {
    let backend = Backend::start(|_, _| {
        json_response(json!({
            "id": 3,
            "username": "nimal",
            "email": "nimal@example.lk",
            "role": "BUYER"
        }))
    })
    .await;

    let user = backend.client.login_user("nimal", "secret1").await.unwrap();
    assert_eq!(user.role.as_deref(), Some(Role::Buyer.as_str()));
    let seen = backend.last();
    assert_eq!(seen.path, "/api/users/login");
    assert_eq!(seen.json(), json!({"username": "nimal", "password": "secret1"}));

    backend.client.fetch_users_by_role(Role::Seller).await.unwrap();
    assert_eq!(backend.last().path, "/api/users/role/SELLER");
}

#[tokio::test]
async fn user_account_calls() {
    let backend = Backend::start(|method, _| {
        if *method == Method::DELETE {
            "User deleted successfully".into_response()
        } else {
            json_response(json!({"id": 3, "username": "kamal", "role": "SELLER"}))
        }
    })
    .await;
    let client = &backend.client;

    let user = client
        .register_user(&NewUser {
            username: "kamal".to_string(),
            password: "secret1".to_string(),
            email: "kamal@example.lk".to_string(),
            role: Some(Role::Seller),
        })
        .await
        .unwrap();
    assert_eq!(user.id, Some(3));
    let register = backend.last();
    assert_eq!((register.method.clone(), register.path.as_str()), (Method::POST, "/api/users/register"));
    assert_eq!(
        register.json(),
        json!({
            "username": "kamal",
            "password": "secret1",
            "email": "kamal@example.lk",
            "role": "SELLER"
        })
    );

    client
        .update_user(
            3,
            &UserUpdate {
                email: Some("kamal@homes.lk".to_string()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
    let update = backend.last();
    assert_eq!((update.method.clone(), update.path.as_str()), (Method::PUT, "/api/users/3"));
    assert_eq!(update.json(), json!({"email": "kamal@homes.lk"}));

    assert_eq!(client.delete_user(3).await.unwrap(), "User deleted successfully");
    let delete = backend.last();
    assert_eq!((delete.method.clone(), delete.path.as_str()), (Method::DELETE, "/api/users/3"));
}

#[tokio::test]
async fn property_update_sends_only_the_changed_fields() {
    let backend = Backend::start(|_, _| json_response(json!({"id": 4, "status": "SOLD"}))).await;

    let updated = backend
        .client
        .update_property(
            4,
            &PropertyUpdate {
                price: Some(24_000_000.0),
                status: Some(PropertyStatus::Sold),
                ..PropertyUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status.as_deref(), Some("SOLD"));
    let seen = backend.last();
    assert_eq!((seen.method.clone(), seen.path.as_str()), (Method::PUT, "/api/properties/4"));
    assert_eq!(seen.json(), json!({"price": 24000000.0, "status": "SOLD"}));
}

fn viewing() -> NewBooking {
    NewBooking {
        property_id: 1,
        buyer_id: 2,
        booking_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        booking_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    }
}

fn question() -> NewInquiry {
    NewInquiry {
        property_id: 1,
        sender_id: 2,
        message: "Is parking included?".to_string(),
    }
}

fn bid() -> NewOffer {
    NewOffer {
        property_id: 1,
        buyer_id: 2,
        price: 9_000_000.0,
        terms: Some("Bank loan".to_string()),
    }
}

#[tokio::test]
async fn create_calls_post_full_payloads() {
    let backend = Backend::start(|method, _| {
        if *method == Method::GET {
            json_response(json!([{"id": 5, "status": "RESOLVED"}]))
        } else {
            (StatusCode::CREATED, Json(json!({"id": 5}))).into_response()
        }
    })
    .await;
    let client = &backend.client;

    client.create_booking(&viewing()).await.unwrap();
    client.create_inquiry(&question()).await.unwrap();
    client.create_offer(&bid()).await.unwrap();
    let resolved = client
        .fetch_inquiries_by_status(InquiryStatus::Resolved)
        .await
        .unwrap();
    assert_eq!(resolved[0].status.as_deref(), Some("RESOLVED"));

    let seen: Vec<(Method, String)> = backend
        .requests()
        .iter()
        .map(|s| (s.method.clone(), s.path.clone()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Method::POST, "/api/bookings".to_string()),
            (Method::POST, "/api/inquiries".to_string()),
            (Method::POST, "/api/offers".to_string()),
            (Method::GET, "/api/inquiries/status/RESOLVED".to_string()),
        ]
    );
    let bodies: Vec<Value> = backend.requests()[..3].iter().map(Seen::json).collect();
    assert_eq!(
        bodies,
        vec![
            json!({"propertyId": 1, "buyerId": 2, "bookingDate": "2024-05-20", "bookingTime": "10:00:00"}),
            json!({"propertyId": 1, "senderId": 2, "message": "Is parking included?"}),
            json!({"propertyId": 1, "buyerId": 2, "price": 9000000.0, "terms": "Bank loan"}),
        ]
    );
}

#[tokio::test]
async fn updates_replace_the_whole_record() {
    let backend = Backend::start(|_, _| json_response(json!({"id": 1}))).await;
    let client = &backend.client;

    client.update_booking(11, &viewing()).await.unwrap();
    client.update_inquiry(12, &question()).await.unwrap();
    client.update_offer(13, &bid()).await.unwrap();
    client
        .update_rental_agreement(
            14,
            &NewRentalAgreement {
                property_id: 1,
                tenant_id: 2,
                landlord_id: 3,
                rent: 60_000.0,
                duration_months: 6,
                start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            },
        )
        .await
        .unwrap();

    let seen: Vec<(Method, String, Value)> = backend
        .requests()
        .iter()
        .map(|s| (s.method.clone(), s.path.clone(), s.json()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (
                Method::PUT,
                "/api/bookings/11".to_string(),
                json!({"propertyId": 1, "buyerId": 2, "bookingDate": "2024-05-20", "bookingTime": "10:00:00"})
            ),
            (
                Method::PUT,
                "/api/inquiries/12".to_string(),
                json!({"propertyId": 1, "senderId": 2, "message": "Is parking included?"})
            ),
            (
                Method::PUT,
                "/api/offers/13".to_string(),
                json!({"propertyId": 1, "buyerId": 2, "price": 9000000.0, "terms": "Bank loan"})
            ),
            (
                Method::PUT,
                "/api/rental-agreements/14".to_string(),
                json!({
                    "propertyId": 1,
                    "tenantId": 2,
                    "landlordId": 3,
                    "rent": 60000.0,
                    "durationMonths": 6,
                    "startDate": "2024-09-01"
                })
            ),
        ]
    );
}

fn beach_plot() -> NewProperty {
    NewProperty {
        title: "Beach plot".to_string(),
        kind: PropertyType::Sale,
        location: "Galle".to_string(),
        price: Some(8_500_000.0),
        rent_amount: None,
        description: None,
        seller_id: 4,
    }
}

#[tokio::test]
async fn images_are_sent_as_multipart_forms() {
    let backend = Backend::start(|_, path| match path {
        "/api/properties/upload" => json_response(json!({
            "uploadedFiles": ["/uploads/properties/1f.jpg", "/uploads/properties/2a.png"]
        })),
        _ => json_response(json!({
            "id": 9,
            "mainImage": "/uploads/properties/1f.jpg",
            "images": "/uploads/properties/1f.jpg,/uploads/properties/2a.png"
        })),
    })
    .await;
    let client = &backend.client;
    let images = || {
        vec![
            ImageFile::new("villa.jpg", b"jpeg-bytes".to_vec()),
            ImageFile::new("plan.png", b"png-bytes".to_vec()),
        ]
    };

    let stored = client.upload_property_images(images()).await.unwrap();
    assert_eq!(stored, vec!["/uploads/properties/1f.jpg", "/uploads/properties/2a.png"]);
    let upload = backend.last();
    assert_eq!((upload.method.clone(), upload.path.as_str()), (Method::POST, "/api/properties/upload"));
    assert!(upload
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data; boundary="));
    assert_eq!(upload.body.matches(r#"name="files""#).count(), 2);
    assert!(upload.body.contains(r#"filename="villa.jpg""#));
    assert!(upload.body.contains("image/jpeg"));
    assert!(upload.body.contains("jpeg-bytes"));

    let created = client
        .create_property_with_images(&beach_plot(), images())
        .await
        .unwrap();
    assert_eq!(created.image_urls().len(), 2);
    let create = backend.last();
    assert_eq!(
        (create.method.clone(), create.path.as_str()),
        (Method::POST, "/api/properties/create-with-images")
    );
    for field in [r#"name="title""#, r#"name="type""#, r#"name="description""#, r#"name="sellerId""#] {
        assert!(create.body.contains(field), "missing {}", field);
    }
    assert!(create.body.contains("Beach plot"));
    assert!(create.body.contains("8500000"));
    assert!(!create.body.contains(r#"name="rentAmount""#));

    client
        .update_property_with_images(9, &beach_plot(), vec![])
        .await
        .unwrap();
    let update = backend.last();
    assert_eq!(
        (update.method.clone(), update.path.as_str()),
        (Method::PUT, "/api/properties/9/update-with-images")
    );
    assert!(update.body.contains(r#"name="location""#));
    assert!(!update.body.contains(r#"name="sellerId""#));
    assert!(!update.body.contains(r#"name="files""#));
}

#[tokio::test]
async fn auth_token_is_passed_through() {
    let backend = Backend::start_with(|_, _| json_response(json!([])), Some("abc.def")).await;
    backend.client.fetch_pending_offers().await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.path, "/api/offers/pending");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer abc.def"));
}

#[tokio::test]
async fn board_loads_available_properties() {
    let backend = Backend::start(|_, _| json_response(sample_properties())).await;
    let mut board = PropertyBoard::new();

    board.load_properties(&backend.client).await;

    assert!(!board.is_loading());
    assert_eq!(board.error(), None);
    assert_eq!(board.grid_html().matches(r#"class="property-card""#).count(), 2);
    assert!(board.grid_html().contains("LKR 120,000/month"));
    assert_eq!(backend.last().path, "/api/properties?status=AVAILABLE");
}

#[tokio::test]
async fn board_reports_load_and_search_failures() {
    let backend = Backend::start(|_, _| {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    })
    .await;
    let mut board = PropertyBoard::new();

    board.load_properties(&backend.client).await;
    assert!(!board.is_loading());
    assert_eq!(board.error(), Some(LOAD_FAILED_MESSAGE));

    let form = SearchForm {
        location: "Negombo".to_string(),
        ..SearchForm::default()
    };
    board.search_properties(&backend.client, &form).await;
    assert_eq!(board.error(), Some(SEARCH_FAILED_MESSAGE));
    assert_eq!(
        backend.last().path,
        "/api/properties?status=AVAILABLE&location=Negombo"
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        MarketplaceClient::new(&ClientConfig::with_api_base(format!("http://{}/api", addr))).unwrap();
    let err = client.fetch_all_bookings().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

#[test]
fn invalid_api_base_is_rejected() {
    let err = MarketplaceClient::new(&ClientConfig::with_api_base("not a url")).unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}
