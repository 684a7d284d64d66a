//! Integration tests for accepting placement suggestions

use floor_placement::suggest::{accept_all, encode_data_uri, request_suggestions};
use floor_placement::{
    Floor, ObjectKind, PlacementConfig, PlacementEngine, PlacementOracle, Point, SuggestError,
    Suggestion, SuggestionRequest,
};

struct ScriptedOracle;

impl PlacementOracle for ScriptedOracle {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>, SuggestError> {
        if request.object_type != ObjectKind::Sunbed {
            return Err(SuggestError::Oracle("only sunbeds are supported".to_string()));
        }
        Ok(vec![
            Suggestion::new(20.0, 20.0, 0.6),
            Suggestion::new(21.0, 21.0, 0.9),
            Suggestion::new(f64::NAN, 40.0, 0.8),
            Suggestion::new(70.0, 70.0, 1.4),
            Suggestion::new(60.0, 20.0, 0.3),
        ])
    }
}

#[test]
fn test_suggestions_are_filtered_ordered_and_collision_checked() {
    let request = SuggestionRequest::from_image("image/png", b"plan", ObjectKind::Sunbed);
    let suggestions = request_suggestions(&ScriptedOracle, &request).unwrap();

    let confidences: Vec<f64> = suggestions.iter().map(|s| s.confidence).collect();
    assert_eq!(confidences, vec![0.9, 0.6, 0.3]);

    let config = PlacementConfig::default().with_default_price(99.0);
    let engine = PlacementEngine::new(config);
    let mut floor = Floor::new("floor-1", "Sand");
    let results = accept_all(&engine, &mut floor, &suggestions);

    // The second suggestion lands on top of the first accepted one
    assert!(results[0].is_ok());
    assert!(results[1].as_ref().unwrap_err().is_collision());
    assert!(results[2].is_ok());
    assert_eq!(floor.objects.len(), 2);

    let first = &floor.objects[0];
    assert_eq!(first.kind, ObjectKind::Table);
    assert_eq!(first.position, Point::new(21.0, 21.0));
    assert_eq!(first.price, 20.0);
    assert_eq!(first.description, "Placed by AI assistant.");
}

#[test]
fn test_oracle_failure_and_request_limits() {
    let request = SuggestionRequest::from_image("image/png", b"plan", ObjectKind::Boat);
    assert!(matches!(
        request_suggestions(&ScriptedOracle, &request),
        Err(SuggestError::Oracle(_))
    ));

    let mut request = SuggestionRequest::from_image("image/png", b"plan", ObjectKind::Sunbed);
    for i in 0u8..3 {
        request = request
            .with_example(encode_data_uri("image/jpeg", &[i]))
            .unwrap();
    }
    let err = request
        .with_example(encode_data_uri("image/jpeg", b"four"))
        .unwrap_err();
    assert!(matches!(
        err,
        SuggestError::TooManyExamples { count: 4, max: 3 }
    ));
}
