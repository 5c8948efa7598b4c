//! Integration tests for Session using wiremock.

use skycast_core::{AppError, Config, FavoritesError, UnitSystem, WeatherConfig, WeatherError};
use skycast_services::{JsonFileStore, MemoryStore, Presenter, Session};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY: i64 = 86_400;
// 2024-03-01T12:00:00Z
const NOON: i64 = 1_709_294_400;

/// Records every presenter call in order.
#[derive(Debug, Default)]
struct RecordingPresenter {
    events: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn set_loading(&mut self, loading: bool) {
        self.events.push(format!("loading:{}", loading));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(format!("error:{}", message));
    }

    fn clear_error(&mut self) {
        self.events.push("clear".to_string());
    }
}

fn config_for(server: &MockServer) -> Config {
    Config {
        weather: WeatherConfig {
            api_key: "test_key".to_string(),
            base_url: server.uri(),
            ..WeatherConfig::default()
        },
        ..Config::default()
    }
}

fn current_json(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "sys": { "country": "GB" },
        "weather": [{ "description": "clear sky", "icon": "01d" }],
        "main": { "temp": temp, "feels_like": temp, "humidity": 65 },
        "wind": { "speed": 3.5 },
        "visibility": 10000
    })
}

/// One sample per day, `days` days in a row, 24h apart.
fn forecast_json(days: i64) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..days)
        .map(|d| {
            serde_json::json!({
                "dt": NOON + d * DAY,
                "main": { "temp": 10.0 + d as f64 },
                "weather": [{ "description": "few clouds", "icon": "02d" }]
            })
        })
        .collect();
    serde_json::json!({ "list": list })
}

async fn mount_city(server: &MockServer, units: &str, temp: f64, days: i64) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", units))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json(temp)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("units", units))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json(days)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_success() {
    let mock_server = MockServer::start().await;
    mount_city(&mock_server, "metric", 22.0, 7).await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let mut presenter = RecordingPresenter::default();

    let report = session.search("  London ", &mut presenter).await.unwrap();

    assert_eq!(report.query, "London");
    assert_eq!(report.current.location_label(), "London, GB");
    assert_eq!(report.unit, UnitSystem::Metric);
    // Seven days in the feed, five shown
    assert_eq!(report.forecast.len(), 5);
    assert_eq!(report.forecast[0].display_temperature(), 10);
    assert_eq!(report.forecast[4].display_temperature(), 14);

    assert_eq!(presenter.events, ["loading:true", "clear", "loading:false"]);
    assert!(session.current().is_some());
}

#[tokio::test]
async fn test_empty_input_skips_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let mut presenter = RecordingPresenter::default();

    let err = session.search("   ", &mut presenter).await.unwrap_err();

    assert!(matches!(err, AppError::Weather(WeatherError::EmptyInput)));
    assert_eq!(presenter.events, ["error:Please enter a city name"]);
}

#[tokio::test]
async fn test_city_not_found_hides_loading() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let mut presenter = RecordingPresenter::default();

    let err = session.search("Atlantis", &mut presenter).await.unwrap_err();

    assert!(matches!(err, AppError::Weather(WeatherError::CityNotFound(_))));
    assert_eq!(
        presenter.events,
        [
            "loading:true",
            "clear",
            "loading:false",
            "error:City not found. Please check the spelling and try again.",
        ]
    );
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_forecast_failure_keeps_previous_report() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json(22.0)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let mut presenter = RecordingPresenter::default();

    let err = session.search("London", &mut presenter).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Weather(WeatherError::NetworkOrServerFailure(_))
    ));
    assert!(presenter.events.contains(&"loading:false".to_string()));
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_unauthorized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let err = session
        .search("London", &mut RecordingPresenter::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Weather(WeatherError::Unauthorized)));
}

#[tokio::test]
async fn test_set_unit_refetches_current_city() {
    let mock_server = MockServer::start().await;
    mount_city(&mock_server, "metric", 22.0, 3).await;
    mount_city(&mock_server, "imperial", 71.6, 3).await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let mut presenter = RecordingPresenter::default();

    session.search("London", &mut presenter).await.unwrap();
    let report = session
        .set_unit(UnitSystem::Imperial, &mut presenter)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.unit, UnitSystem::Imperial);
    assert_eq!(report.current.temperature, 71.6);
    assert_eq!(report.forecast.len(), 3);
    assert_eq!(session.unit(), UnitSystem::Imperial);
}

#[tokio::test]
async fn test_set_unit_without_report_does_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = Session::new(&config_for(&mock_server), MemoryStore::new()).unwrap();
    let mut presenter = RecordingPresenter::default();

    let result = session
        .set_unit(UnitSystem::Imperial, &mut presenter)
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(session.unit(), UnitSystem::Imperial);
    assert!(presenter.events.is_empty());
}

#[tokio::test]
async fn test_favorites_flow() {
    let mock_server = MockServer::start().await;
    mount_city(&mock_server, "metric", 22.0, 5).await;

    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("favorites.json");
    let config = config_for(&mock_server);

    let mut session = Session::new(&config, JsonFileStore::new(&store_path)).unwrap();
    let mut presenter = RecordingPresenter::default();

    // Nothing searched yet
    let err = session.add_current_to_favorites().unwrap_err();
    assert!(matches!(err, AppError::Favorites(FavoritesError::NoCitySelected)));

    session.search("London", &mut presenter).await.unwrap();
    assert_eq!(session.add_current_to_favorites().unwrap(), "London, GB");

    let err = session.add_current_to_favorites().unwrap_err();
    assert!(matches!(
        err,
        AppError::Favorites(FavoritesError::DuplicateFavorite(_))
    ));
    assert_eq!(session.favorites(), ["London, GB"]);

    // A new session reads the saved list back
    let mut reopened = Session::new(&config, JsonFileStore::new(&store_path)).unwrap();
    assert_eq!(reopened.favorites(), ["London, GB"]);

    let report = reopened
        .search_favorite("London, GB", &mut presenter)
        .await
        .unwrap();
    assert_eq!(report.query, "London");

    assert!(reopened.remove_favorite("London, GB").unwrap());
    assert!(reopened.favorites().is_empty());
}

#[tokio::test]
async fn test_blank_api_key_rejected() {
    let mock_server = MockServer::start().await;
    let mut config = config_for(&mock_server);
    config.weather.api_key = "  ".to_string();

    let result = Session::new(&config, MemoryStore::new());
    assert!(matches!(result, Err(AppError::Config(_))));
}
