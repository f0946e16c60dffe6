//! End-to-end pipeline tests against a scripted mock transport.
//!
//! These exercise the full capability path: prompt construction, the
//! schema-constrained call, response parsing, and suggestion-id handling.

use std::collections::HashSet;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use fridgechef_core::ai::{AiError, KitchenService, MockAiClient};

fn service_with(mock: MockAiClient) -> (KitchenService, Arc<MockAiClient>) {
    let mock = Arc::new(mock);
    (KitchenService::new(mock.clone()), mock)
}

fn fake_photo_base64() -> String {
    BASE64.encode(b"definitely a photo of eggs, milk and cheese")
}

const FOUR_DISHES: &str = r#"{
    "dishes": [
        {"title": "Omelette", "short_description": "Fluffy eggs", "estimated_time_minutes": 15, "confidence": 0.9},
        {"title": "Pancakes", "short_description": "Milk and eggs", "estimated_time_minutes": 25, "confidence": 0.8},
        {"title": "Scrambled eggs", "short_description": "Classic", "estimated_time_minutes": 10, "confidence": 0.85},
        {"title": "Milk pudding", "short_description": "Simple dessert", "estimated_time_minutes": 40, "confidence": 0.6}
    ]
}"#;

const PLAIN_RECIPE: &str = r#"{
    "title": "Omelette",
    "servings": 2,
    "prep_time_minutes": 5,
    "cook_time_minutes": 10,
    "ingredients": [
        {"ingredient": "eggs", "quantity": "3 large", "preparation": "beaten"},
        {"ingredient": "butter", "quantity": "1 tbsp"}
    ],
    "steps": [
        {"number": 1, "instruction": "Beat the eggs with a pinch of salt."},
        {"number": 2, "instruction": "Cook in butter over medium heat.", "tip": "Do not overcook."}
    ],
    "equipment": ["non-stick pan", "whisk"]
}"#;

#[tokio::test]
async fn extract_returns_detected_ingredients() {
    let (service, _mock) = service_with(MockAiClient::new().with_json(
        r#"{"ingredients":[{"name":"eggs","confidence":0.9},{"name":"milk","confidence":0.8}],"unsure_items":[],"spoiled_items":[]}"#,
    ));

    let result = service
        .extract(&fake_photo_base64(), "image/jpeg")
        .await
        .unwrap();

    assert_eq!(result.ingredients.len(), 2);
    assert_eq!(result.ingredients[0].name, "eggs");
    assert!((result.ingredients[0].confidence - 0.9).abs() < 1e-6);
    assert_eq!(result.ingredients[1].name, "milk");
    assert!((result.ingredients[1].confidence - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn extract_with_zero_ingredients_is_valid() {
    let (service, _mock) = service_with(
        MockAiClient::new()
            .with_json(r#"{"ingredients":[],"unsure_items":["blurry jar"],"spoiled_items":[]}"#),
    );

    let result = service
        .extract(&fake_photo_base64(), "image/jpeg")
        .await
        .unwrap();
    assert!(result.ingredients.is_empty());
    assert_eq!(result.unsure_items, vec!["blurry jar".to_string()]);
}

#[tokio::test]
async fn extract_rejects_bad_base64_without_calling_the_model() {
    let (service, mock) = service_with(MockAiClient::new());

    let err = service
        .extract("this is !!! not base64", "image/jpeg")
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::InvalidInput(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn suggest_attaches_fresh_distinct_ids() {
    let (service, _mock) = service_with(MockAiClient::new().with_json(FOUR_DISHES));

    let result = service
        .suggest(&["eggs".to_string(), "milk".to_string()], Some(2), None)
        .await
        .unwrap();

    assert_eq!(result.dishes.len(), 4);
    let ids: HashSet<&str> = result
        .dishes
        .iter()
        .map(|d| d.suggestion_id.as_str())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(result.dishes.iter().all(|d| !d.suggestion_id.is_empty()));
}

#[tokio::test]
async fn suggest_never_sends_a_suggestion_id_to_the_model() {
    let (service, mock) = service_with(MockAiClient::new().with_json(FOUR_DISHES));

    service
        .suggest(&["eggs".to_string()], None, Some(&["vegetarian".to_string()]))
        .await
        .unwrap();

    for (_, request) in mock.requests() {
        for message in &request.messages {
            assert!(
                !message.content.contains("suggestion_id"),
                "model-facing content must not mention suggestion ids: {}",
                message.content
            );
        }
        let schema = request.response_schema.expect("schema must be attached");
        assert!(!schema.schema.to_string().contains("suggestion_id"));
    }
}

#[tokio::test]
async fn suggest_rejects_empty_ingredients_before_any_call() {
    let (service, mock) = service_with(MockAiClient::new());

    let err = service.suggest(&[], Some(2), None).await.unwrap_err();

    assert!(matches!(err, AiError::InvalidInput(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn suggest_rejects_zero_servings() {
    let (service, mock) = service_with(MockAiClient::new());

    let err = service
        .suggest(&["eggs".to_string()], Some(0), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::InvalidInput(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn suggest_accepts_counts_outside_the_advisory_range() {
    // Two dishes instead of the requested 3-5: logged, not rejected.
    let (service, _mock) = service_with(MockAiClient::new().with_json(
        r#"{"dishes":[
            {"title":"A","short_description":"a","estimated_time_minutes":5,"confidence":0.5},
            {"title":"B","short_description":"b","estimated_time_minutes":5,"confidence":0.5}
        ]}"#,
    ));

    let result = service.suggest(&["eggs".to_string()], None, None).await.unwrap();
    assert_eq!(result.dishes.len(), 2);
}

#[tokio::test]
async fn suggest_rejects_schema_violating_output() {
    let (service, _mock) = service_with(MockAiClient::new().with_json(
        r#"{"dishes":[{"title":"A","short_description":"a","estimated_time_minutes":5,"confidence":1.5}]}"#,
    ));

    let err = service
        .suggest(&["eggs".to_string()], None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::SchemaViolation(_)));
}

#[tokio::test]
async fn suggest_rejects_unparseable_output() {
    let (service, _mock) = service_with(MockAiClient::new().with_json("sorry, no json today"));

    let err = service
        .suggest(&["eggs".to_string()], None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::SchemaViolation(_)));
}

#[tokio::test]
async fn build_recipe_restores_the_caller_id() {
    let (service, mock) = service_with(MockAiClient::new().with_json(PLAIN_RECIPE));

    let result = service
        .build_recipe("abc-123", "Omelette", "quick breakfast", Some(2))
        .await
        .unwrap();

    assert_eq!(result.suggestion_id, "abc-123");
    assert_eq!(result.title, "Omelette");
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.equipment.len(), 2);

    // And the model never saw the id.
    for (_, request) in mock.requests() {
        for message in &request.messages {
            assert!(!message.content.contains("abc-123"));
            assert!(!message.content.contains("suggestion_id"));
        }
    }
}

#[tokio::test]
async fn build_recipe_rejects_empty_title() {
    let (service, mock) = service_with(MockAiClient::new());

    let err = service
        .build_recipe("abc-123", "  ", "context", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::InvalidInput(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn invocation_failures_surface_as_api_errors() {
    let (service, _mock) = service_with(MockAiClient::new().with_error("rate limited"));

    let err = service
        .suggest(&["eggs".to_string()], None, None)
        .await
        .unwrap_err();

    match err {
        AiError::Api(message) => assert!(message.contains("rate limited")),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn extract_and_suggest_composes_both_stages() {
    let (service, mock) = service_with(
        MockAiClient::new()
            .with_json(
                r#"{"ingredients":[{"name":"eggs","confidence":0.9},{"name":"milk","confidence":0.8}],"unsure_items":[],"spoiled_items":[]}"#,
            )
            .with_json(FOUR_DISHES),
    );

    let (extraction, suggestions) = service
        .extract_and_suggest(&fake_photo_base64(), "image/jpeg", Some(2), None)
        .await
        .unwrap();

    assert_eq!(extraction.ingredients.len(), 2);
    assert_eq!(suggestions.dishes.len(), 4);
    assert_eq!(mock.call_count(), 2);

    // The suggest turn is fed the extracted ingredient names.
    let requests = mock.requests();
    let (_, suggest_request) = &requests[1];
    let user_turn = &suggest_request.messages[1].content;
    assert!(user_turn.contains("eggs"));
    assert!(user_turn.contains("milk"));
}

#[tokio::test]
async fn extract_and_suggest_short_circuits_on_extraction_failure() {
    let (service, mock) = service_with(MockAiClient::new().with_error("vision model down"));

    let err = service
        .extract_and_suggest(&fake_photo_base64(), "image/jpeg", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Api(_)));
    // Only the extraction call happened; the suggest stage was never reached.
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.requests()[0].0, "extract_ingredients");
}

#[tokio::test]
async fn extract_turn_carries_the_image_as_a_data_url() {
    let photo = fake_photo_base64();
    let (service, mock) = service_with(MockAiClient::new().with_json(
        r#"{"ingredients":[],"unsure_items":[],"spoiled_items":[]}"#,
    ));

    service.extract(&photo, "image/jpeg").await.unwrap();

    let requests = mock.requests();
    let (_, request) = &requests[0];
    let user = &request.messages[1];
    assert_eq!(user.images.len(), 1);
    assert_eq!(user.images[0].base64, photo);
    assert!(user.images[0].to_data_url().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn extract_preserves_the_uploaded_media_type_in_the_data_url() {
    // A PNG upload must reach the model labeled as PNG, not as JPEG.
    let photo = fake_photo_base64();
    let (service, mock) = service_with(MockAiClient::new().with_json(
        r#"{"ingredients":[],"unsure_items":[],"spoiled_items":[]}"#,
    ));

    service.extract(&photo, "image/png").await.unwrap();

    let requests = mock.requests();
    let (_, request) = &requests[0];
    let image = &request.messages[1].images[0];
    assert_eq!(image.media_type, "image/png");
    assert!(image.to_data_url().starts_with("data:image/png;base64,"));
}
