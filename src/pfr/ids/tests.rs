//! Unit tests for id resolution

use super::*;
use crate::pfr::fetcher::{RetryPolicy, USER_AGENT};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const CROSSWALK: &str = "\
name,sleeper_id,pfr_id,espn_id
Patrick Mahomes,4046,MahoPa00,3139477
Al Smith,9999.0,,
No Sleeper,,NoSlNo00,
Josh Allen,5840.0,AlleJo02,
Old Nan,1234,nan,
";

fn mapper() -> IdMapper {
    IdMapper::new(IdTable::from_reader(CROSSWALK.as_bytes()).unwrap())
}

fn al_smith() -> PlayerInfo {
    let mut info = PlayerInfo::new("9999", "Al", "Smith");
    info.birth_date = Some("1990-01-02".to_string());
    info
}

fn birth_page(date: &str) -> String {
    format!(r#"<html><p>Born: <span data-birth="{date}">then</span></p></html>"#)
}

#[test]
fn test_crosswalk_parsing() {
    let table = IdTable::from_reader(CROSSWALK.as_bytes()).unwrap();

    // row without a sleeper id is dropped
    assert_eq!(table.len(), 4);
    assert_eq!(
        table.get(&PlayerId::new("4046")).unwrap().pfr_id,
        Some(PfrId::new("MahoPa00"))
    );
    // float-formatted id normalized, empty pfr id is None
    let smith = table.get(&PlayerId::new("9999")).unwrap();
    assert_eq!(smith.pfr_id, None);
    assert_eq!(smith.name.as_deref(), Some("Al Smith"));
    // "nan" treated as missing
    assert_eq!(table.get(&PlayerId::new("1234")).unwrap().pfr_id, None);
}

#[test]
fn test_clean_cell() {
    assert_eq!(clean_cell(Some("5840.0".into())).as_deref(), Some("5840"));
    assert_eq!(clean_cell(Some(" 42 ".into())).as_deref(), Some("42"));
    assert_eq!(clean_cell(Some("NA".into())), None);
    assert_eq!(clean_cell(Some("".into())), None);
    assert_eq!(clean_cell(None), None);
    assert_eq!(clean_cell(Some("AlleJo.0".into())).as_deref(), Some("AlleJo.0"));
}

#[test]
fn test_guess_candidates_order() {
    let guesses = guess_candidates("Al", "Smith");

    assert_eq!(guesses.len(), 10);
    assert_eq!(guesses[0], PfrId::new("SmitAl00"));
    assert_eq!(guesses[1], PfrId::new("SmitAl01"));
    assert_eq!(guesses[9], PfrId::new("SmitAl09"));
}

#[test]
fn test_guess_candidates_short_names() {
    let guesses = guess_candidates("J", "Wu");
    assert_eq!(guesses[0], PfrId::new("WuJ00"));
}

#[test]
fn test_resolve_prefers_override() {
    let info = PlayerInfo::new("5840", "Josh", "Allen");
    assert_eq!(mapper().resolve(&info), Resolution::Known(PfrId::new("AlleJo03")));
}

#[test]
fn test_resolve_from_table() {
    let info = PlayerInfo::new("4046", "Patrick", "Mahomes");
    assert_eq!(mapper().resolve(&info), Resolution::Known(PfrId::new("MahoPa00")));
}

#[test]
fn test_resolve_guesses_when_missing() {
    match mapper().resolve(&al_smith()) {
        Resolution::Guess(candidates) => assert_eq!(candidates[0], PfrId::new("SmitAl00")),
        other => panic!("expected guesses, got {other:?}"),
    }

    let mut unknown = PlayerInfo::new("777", "Al", "Smith");
    unknown.first_name = None;
    assert_eq!(mapper().resolve(&unknown), Resolution::Unresolvable);
}

#[tokio::test]
async fn test_probe_stops_at_first_birth_date_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/S/SmitAl00.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(birth_page("1985-03-03")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/S/SmitAl01.htm"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/S/SmitAl02.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(birth_page("1990-01-02")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/S/SmitAl03.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(birth_page("1990-01-02")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = StatsFetcher::with_base_url(mock_server.uri(), RetryPolicy::default()).unwrap();
    let found = mapper()
        .external_id(&fetcher, &al_smith(), None, Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(found, Some(PfrId::new("SmitAl02")));
}

#[tokio::test]
async fn test_probe_exhausts_after_ten_guesses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(10)
        .mount(&mock_server)
        .await;

    let fetcher = StatsFetcher::with_base_url(mock_server.uri(), RetryPolicy::default()).unwrap();
    let found = mapper()
        .external_id(&fetcher, &al_smith(), None, Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_probe_rate_limit_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = StatsFetcher::with_base_url(mock_server.uri(), RetryPolicy::default()).unwrap();
    let err = mapper()
        .external_id(&fetcher, &al_smith(), None, Duration::ZERO)
        .await
        .unwrap_err();

    assert!(err.is_rate_limit());
}

#[tokio::test]
async fn test_probe_without_birth_date_skips_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = StatsFetcher::with_base_url(mock_server.uri(), RetryPolicy::default()).unwrap();
    let info = PlayerInfo::new("9999", "Al", "Smith");
    let found = mapper()
        .external_id(&fetcher, &info, None, Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_stored_id_used_before_guessing_but_not_over_table() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = StatsFetcher::with_base_url(mock_server.uri(), RetryPolicy::default()).unwrap();
    let mapper = mapper();

    let found = mapper
        .external_id(&fetcher, &al_smith(), Some(PfrId::new("SmitAl07")), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(found, Some(PfrId::new("SmitAl07")));

    // a table mapping replaces a stale stored id
    let mahomes = PlayerInfo::new("4046", "Patrick", "Mahomes");
    let found = mapper
        .external_id(&fetcher, &mahomes, Some(PfrId::new("MahoPa09")), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(found, Some(PfrId::new("MahoPa00")));
}

#[tokio::test]
async fn test_load_or_fetch_id_table_downloads_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ids.csv"))
        // sent through the configured client
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(CROSSWALK))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = StatsFetcher::with_base_url(mock_server.uri(), RetryPolicy::default()).unwrap();
    let url = format!("{}/ids.csv", mock_server.uri());
    let table = load_or_fetch_id_table(fetcher.client(), &paths, &url, false).await.unwrap();
    assert_eq!(table.len(), 4);

    // fresh file on disk, no second download
    let again = load_or_fetch_id_table(fetcher.client(), &paths, &url, false).await.unwrap();
    assert_eq!(again.len(), 4);
}
