//! A few days of use across habits, stats, moods, and suggestions.

#[path = "support/api.rs"]
mod api;

use actix_web::test::TestRequest;
use habitwise::test_support::dev_bearer;
use serde_json::json;

#[actix_rt::test]
async fn three_days_of_check_ins_roll_up_into_stats() {
    let backend = api::backend();
    let state = backend.http_state();
    let read = api::create_daily_habit(&state, "alice", "Read").await;
    let walk = api::create_daily_habit(&state, "alice", "Walk").await;

    for day in 0..3 {
        let (status, _) = api::send_json(
            &state,
            api::post(&format!("/api/v1/habits/{read}/checkins"), "alice"),
        )
        .await;
        assert_eq!(status, 201, "day {day}");
        if day == 1 {
            api::send_json(
                &state,
                api::post(&format!("/api/v1/habits/{walk}/checkins"), "alice"),
            )
            .await;
        }
        backend.clock.advance_days(1);
    }
    backend.clock.advance_days(-1);

    let (status, overview) = api::send_json(&state, api::get("/api/v1/stats/overview", "alice")).await;
    assert_eq!(status, 200);
    let summary = &overview["summary"];
    assert_eq!(summary["totalHabits"], 2);
    assert_eq!(summary["totalCheckins"], 4);
    assert_eq!(summary["activeDaysLast30"], 3);
    assert_eq!(summary["maxStreakBest"], 3);
    assert_eq!(summary["bestDay"]["date"], "2026-03-05");
    assert_eq!(summary["bestDay"]["checkins"], 2);
    assert_eq!(overview["period"]["to"], "2026-03-06");
    assert_eq!(overview["last30Days"].as_array().map(Vec::len), Some(30));

    let (status, detail) = api::send_json(
        &state,
        api::get(&format!("/api/v1/stats/habits/{read}"), "alice"),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(detail["activeStreak"], 3);
    assert_eq!(detail["completedDays"], 3);

    let (_, listing) = api::send_json(
        &state,
        api::get(
            &format!("/api/v1/habits/{read}/checkins?from=2026-03-05&to=2026-03-06"),
            "alice",
        ),
    )
    .await;
    assert_eq!(listing["total"], 2);

    let (_, other) = api::send_json(&state, api::get("/api/v1/stats/overview", "bob")).await;
    assert_eq!(other["summary"]["totalHabits"], 0);
    assert_eq!(other["summary"]["totalCheckins"], 0);
}

#[actix_rt::test]
async fn one_mood_note_per_day() {
    let backend = api::backend();
    let state = backend.http_state();
    let record = |emoji: &str| {
        TestRequest::post()
            .uri("/api/v1/moods")
            .insert_header(dev_bearer("alice"))
            .set_json(json!({ "emoji": emoji, "note": "slept well" }))
    };

    let (status, first) = api::send_json(&state, record("😊")).await;
    assert_eq!(status, 201);
    assert_eq!(first["date"], "2026-03-04");

    let (status, duplicate) = api::send_json(&state, record("😐")).await;
    assert_eq!(status, 400);
    assert_eq!(duplicate["details"]["moodNote"]["id"], first["id"]);

    backend.clock.advance_days(1);
    let (status, _) = api::send_json(&state, record("😐")).await;
    assert_eq!(status, 201);

    let (_, today) = api::send_json(&state, api::get("/api/v1/moods?range=today", "alice")).await;
    assert_eq!(today["total"], 1);
    let (_, week) =
        api::send_json(&state, api::get("/api/v1/moods?range=last7days", "alice")).await;
    assert_eq!(week["total"], 2);
    assert_eq!(week["range"], "last7days");
}

#[actix_rt::test]
async fn daily_suggestion_is_stable_within_a_day() {
    let backend = api::backend();
    let state = backend.http_state();

    let (status, morning) =
        api::send_json(&state, api::get("/api/v1/suggestions/daily", "alice")).await;
    assert_eq!(status, 200);
    assert!(morning["title"].as_str().is_some_and(|title| !title.is_empty()));
    assert!(morning["reason"].as_str().is_some_and(|reason| !reason.is_empty()));

    backend.clock.advance(std::time::Duration::from_secs(6 * 60 * 60));
    let (_, evening) =
        api::send_json(&state, api::get("/api/v1/suggestions/daily", "alice")).await;
    assert_eq!(morning, evening);
}
