use chrono::NaiveDate;
use lacrosse_api::views::{load_schedule, schedule_view};
use lacrosse_api::{EspnApi, GameStatus, NcaaApi, ScoreProvider};
use mockito::Matcher;

const ESPN_ONE_FINAL: &str = r#"{
  "events": [{
    "id": "401",
    "competitions": [{
      "id": "401",
      "date": "2026-02-25T18:00Z",
      "status": { "displayClock": "0:00", "period": 4,
                  "type": { "name": "STATUS_FINAL", "state": "post", "completed": true } },
      "competitors": [
        { "homeAway": "home", "score": "14", "team": { "id": "1", "shortDisplayName": "Notre Dame", "abbreviation": "ND" } },
        { "homeAway": "away", "score": "9",  "team": { "id": "2", "shortDisplayName": "Georgetown", "abbreviation": "GTWN" } }
      ]
    }]
  }]
}"#;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn espn_scoreboard_requests_compact_date() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("dates".into(), "20260225".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ESPN_ONE_FINAL)
        .create_async()
        .await;

    let api = EspnApi::with_base_url(&server.url());
    let games = api.fetch_scoreboard(date("2026-02-25")).await;

    mock.assert_async().await;
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].status, GameStatus::Final);
    assert_eq!((games[0].home_score, games[0].away_score), (14, 9));
}

#[tokio::test]
async fn server_error_degrades_to_empty_list() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let api = EspnApi::with_base_url(&server.url());
    assert!(api.fetch_scoreboard(date("2026-02-25")).await.is_empty());
    assert!(api.fetch_schedule().await.is_empty());

    // The fallible layer underneath still reports the failure.
    assert!(api.season().await.is_err());
}

#[tokio::test]
async fn malformed_body_degrades_to_empty_list() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let api = NcaaApi::with_base_url(&server.url());
    assert!(api.fetch_scoreboard(date("2026-02-25")).await.is_empty());
}

#[tokio::test]
async fn unreachable_host_degrades_to_empty_list() {
    // Port 9 (discard) on localhost is almost never listening.
    let api = EspnApi::with_base_url("http://127.0.0.1:9");
    assert!(api.fetch_scoreboard(date("2026-02-25")).await.is_empty());
}

#[tokio::test]
async fn ncaa_scoreboard_uses_path_segments() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scoreboard/lacrosse-men/d1/2026/02/25/all-conf")
        .with_status(200)
        .with_body(
            r#"{"games":[{"game":{"gameID":"77","gameState":"pre","startDate":"02/25/2026","startTime":"3:00PM ET",
                "home":{"score":"","names":{"char6":"JHU","short":"Johns Hopkins","seo":"johns-hopkins"}},
                "away":{"score":"","names":{"char6":"PSU","short":"Penn St.","seo":"penn-st"}}}}]}"#,
        )
        .create_async()
        .await;

    let api = NcaaApi::with_base_url(&server.url());
    let games = api.fetch_scoreboard(date("2026-02-25")).await;

    mock.assert_async().await;
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].status, GameStatus::Scheduled);
    assert_eq!(games[0].time.as_deref(), Some("3:00PM ET"));
    assert_eq!(games[0].home.name, "Johns Hopkins");
}

#[tokio::test]
async fn empty_season_triggers_fourteen_day_scan() {
    let mut server = mockito::Server::new_async().await;
    let season = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::UrlEncoded("limit".into(), "300".into()))
        .with_status(200)
        .with_body(r#"{"events":[]}"#)
        .expect(1)
        .create_async()
        .await;
    let per_date = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::Regex(r"dates=\d{8}".into()))
        .with_status(200)
        .with_body(r#"{"events":[]}"#)
        .expect(14)
        .create_async()
        .await;

    let api = EspnApi::with_base_url(&server.url());
    let groups = load_schedule(&api, date("2026-02-20")).await;

    season.assert_async().await;
    per_date.assert_async().await;
    assert!(groups.is_empty(), "nothing upcoming means the empty state renders");
}

#[tokio::test]
async fn range_survives_one_failing_date() {
    let mut server = mockito::Server::new_async().await;
    let _bad = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::UrlEncoded("dates".into(), "20260224".into()))
        .with_status(500)
        .create_async()
        .await;
    let _good = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::UrlEncoded("dates".into(), "20260225".into()))
        .with_status(200)
        .with_body(ESPN_ONE_FINAL)
        .create_async()
        .await;

    let api = EspnApi::with_base_url(&server.url());
    let games = api
        .fetch_scoreboard_range(&[date("2026-02-24"), date("2026-02-25")])
        .await;

    assert_eq!(games.len(), 1);
    assert_eq!(games[0].id, "401");
    assert!(schedule_view(games, date("2026-02-20")).is_empty(), "finals never reach the schedule");
}
