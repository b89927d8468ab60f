#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::NaiveDate;
use fleet_service::domain::account::models::AccountId;
use fleet_service::domain::account::service::AccountService;
use fleet_service::domain::fleet::models::Driver;
use fleet_service::domain::fleet::models::DriverId;
use fleet_service::domain::fleet::models::Truck;
use fleet_service::domain::fleet::models::TruckId;
use fleet_service::domain::fleet::ports::DriverRepository;
use fleet_service::domain::fleet::ports::TruckRepository;
use fleet_service::domain::trip::service::TripService;
use fleet_service::inbound::http::router::create_router;
use fleet_service::outbound::repositories::MemoryStore;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<MemoryStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// A registered driver with a linked driver profile
pub struct TestDriver {
    pub token: String,
    pub account_id: AccountId,
    pub driver_id: DriverId,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    pub async fn spawn_with(enforce_transitions: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStore::new());

        // Cheap hashing parameters keep the suite fast
        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, 24).with_password_hasher(
                PasswordHasher::with_cost(8192, 1, 1).expect("Invalid argon2 parameters"),
            ),
        );

        let account_service = Arc::new(AccountService::new(Arc::clone(&store), authenticator));
        let trip_service = Arc::new(
            TripService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store))
                .with_transition_enforcement(enforce_transitions),
        );

        let router = create_router(account_service, trip_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body
    pub async fn register(&self, email: &str, role: Option<&str>) -> Value {
        let mut body = json!({ "email": email, "password": PASSWORD });
        if let Some(role) = role {
            body["role"] = json!(role);
        }

        let response = self
            .post("/api/auth/register")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register and log in an admin account
    pub async fn admin_token(&self) -> String {
        self.register("admin@fleet.io", Some("admin")).await;
        self.login("admin@fleet.io").await
    }

    /// Register a driver account, attach a driver profile and log in
    pub async fn driver(&self, email: &str, license_number: &str) -> TestDriver {
        let body = self.register(email, None).await;
        let account_id = AccountId::from_string(body["data"]["user"]["id"].as_str().unwrap())
            .expect("Invalid account id");

        let driver = Driver::new(
            account_id,
            license_number,
            NaiveDate::from_ymd_opt(2030, 6, 30).unwrap(),
            "+33 6 12 34 56 78",
        );
        let driver_id = driver.id;
        DriverRepository::create(self.store.as_ref(), driver)
            .await
            .expect("Failed to seed driver");

        TestDriver {
            token: self.login(email).await,
            account_id,
            driver_id,
        }
    }

    /// Seed an available truck
    pub async fn truck(&self, license_plate: &str, mileage: u32) -> TruckId {
        let truck = Truck::new(license_plate, "Volvo", "FH16", 2021, mileage);
        let truck_id = truck.id;
        TruckRepository::create(self.store.as_ref(), truck)
            .await
            .expect("Failed to seed truck");
        truck_id
    }

    pub async fn find_truck(&self, truck_id: &TruckId) -> Truck {
        TruckRepository::find_by_id(self.store.as_ref(), truck_id)
            .await
            .expect("Store error")
            .expect("Truck not found")
    }

    /// Create a trip through the API and return its JSON representation
    pub async fn create_trip(
        &self,
        admin_token: &str,
        driver_id: &DriverId,
        truck_id: &TruckId,
    ) -> Value {
        let response = self
            .post_authenticated("/api/trips", admin_token)
            .json(&json!({
                "driverId": driver_id.to_string(),
                "truckId": truck_id.to_string(),
                "origin": "Rotterdam",
                "destination": "Lyon",
                "departureDate": "2024-05-01T06:00:00Z",
                "mileageStart": 42000
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}
