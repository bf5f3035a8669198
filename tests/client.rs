use hero_stats::api::DotabuffClient;
use hero_stats::config::Config;
use hero_stats::AppError;

fn client_for(server: &mockito::Server) -> DotabuffClient {
    DotabuffClient::new(Config {
        base_url: server.url(),
        requests_per_second: 50,
        ..Config::default()
    })
}

#[test]
fn fetches_match_page_with_browser_headers() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/players/44764606/matches")
        .match_header("accept-language", "en-US,en;q=0.5")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body("<html><body><table><tbody></tbody></table></body></html>")
        .create();

    let body = client_for(&server).fetch_matches_page(" 44764606 ").unwrap();

    mock.assert();
    assert!(body.starts_with(b"<html>"));
}

#[test]
fn missing_player_is_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/players/1/matches")
        .with_status(404)
        .create();

    let err = client_for(&server).fetch_matches_page("1").unwrap_err();
    assert!(matches!(err, AppError::PlayerNotFound(id) if id == "1"));
}

#[test]
fn server_errors_are_http_errors() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/players/2/matches")
        .with_status(500)
        .create();

    let err = client_for(&server).fetch_matches_page("2").unwrap_err();
    assert!(matches!(err, AppError::HttpError(_)));
}

#[test]
fn invalid_ids_never_hit_the_network() {
    let server = mockito::Server::new();
    let err = client_for(&server).fetch_matches_page("   ").unwrap_err();
    assert!(matches!(err, AppError::InvalidPlayerId(_)));
}
