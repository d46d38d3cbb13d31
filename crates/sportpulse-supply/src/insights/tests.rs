use super::*;
use chrono::NaiveDate;
use sportpulse_core::NO_EVENT_DISTANCE;

fn obs(facility_id: u32, day: u32, y: f64, price: f64) -> Observation {
    Observation {
        ds: NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap(),
        facility_id,
        lat: 39.90 + facility_id as f64 * 0.01,
        lon: 32.80 + facility_id as f64 * 0.01,
        hour: 18,
        is_weekend: false,
        temp: 22.0,
        is_rainy: false,
        nearby_event: false,
        distance_to_event: NO_EVENT_DISTANCE,
        price,
        y,
    }
}

#[test]
fn test_insights_sorted_by_demand() {
    let observations = vec![
        obs(1, 3, 20.0, 90.0),
        obs(1, 4, 40.0, 110.0),
        obs(2, 3, 70.0, 150.0),
    ];
    let insights = facility_insights(&observations);
    assert_eq!(insights.len(), 2);
    assert_eq!(insights[0].facility_id, 2);
    assert!((insights[0].avg_demand - 70.0).abs() < 1e-12);
    assert_eq!(insights[1].facility_id, 1);
    assert!((insights[1].avg_demand - 30.0).abs() < 1e-12);
    assert!((insights[1].avg_price - 100.0).abs() < 1e-12);
    assert_eq!(insights[1].observations, 2);
}

#[test]
fn test_geo_uses_first_seen_coordinates() {
    let observations = vec![obs(3, 3, 10.0, 100.0), obs(3, 4, 30.0, 100.0)];
    let geo = facility_geo(&observations);
    assert_eq!(geo.len(), 1);
    assert_eq!(geo[0].facility_id, 3);
    assert!((geo[0].lat - 39.93).abs() < 1e-12);
    assert!((geo[0].avg_demand - 20.0).abs() < 1e-12);
}

#[test]
fn test_weekly_trend_by_week_of_year() {
    // 2024-06-03 opens ISO week 23; 2024-06-10 opens week 24
    let observations = vec![
        obs(1, 10, 90.0, 150.0),
        obs(1, 3, 20.0, 80.0),
        obs(1, 3, 40.0, 120.0),
    ];
    let trend = weekly_trend(&observations);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].week_of_year, 23);
    assert!((trend[0].avg_demand - 30.0).abs() < 1e-12);
    assert!((trend[0].avg_price - 100.0).abs() < 1e-12);
    assert_eq!(trend[1].week_of_year, 24);
    assert!((trend[1].avg_demand - 90.0).abs() < 1e-12);
    assert!((trend[1].avg_price - 150.0).abs() < 1e-12);
}

#[test]
fn test_empty_inputs() {
    assert!(facility_insights(&[]).is_empty());
    assert!(facility_geo(&[]).is_empty());
    assert!(weekly_trend(&[]).is_empty());
}
