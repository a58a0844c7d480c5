use chrono::Utc;
use talentflow_backend::dto::assessment_dto::{SaveAssessmentPayload, SubmitResponsePayload};
use talentflow_backend::error::Error;
use talentflow_backend::models::assessment::{
    AssessmentQuestion, AssessmentSection, QuestionResponse, QuestionType,
};
use talentflow_backend::services::simulation::NetworkSimulation;
use talentflow_backend::AppState;

async fn test_state() -> AppState {
    let pool = talentflow_backend::database::pool::create_pool("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    AppState::new(pool, NetworkSimulation::disabled())
}

fn sections() -> Vec<AssessmentSection> {
    vec![AssessmentSection {
        id: "section-1".to_string(),
        title: "Screening".to_string(),
        description: None,
        order: 1,
        questions: vec![AssessmentQuestion {
            id: "q-1".to_string(),
            kind: QuestionType::SingleChoice,
            title: "Years of experience?".to_string(),
            description: None,
            required: true,
            options: Some(vec!["0-2".to_string(), "3-5".to_string(), "5+".to_string()]),
            min: None,
            max: None,
            max_length: None,
            conditional: None,
            order: 1,
        }],
    }]
}

fn save_payload(title: &str) -> SaveAssessmentPayload {
    SaveAssessmentPayload {
        title: title.to_string(),
        description: Some("Per-job screening form".to_string()),
        sections: sections(),
    }
}

#[tokio::test]
async fn save_upserts_one_assessment_per_job() {
    let state = test_state().await;

    assert!(state
        .assessment_service
        .get_by_job("job-1")
        .await
        .expect("get")
        .is_none());

    let first = state
        .assessment_service
        .save("job-1", save_payload("Round One"))
        .await
        .expect("save");
    let second = state
        .assessment_service
        .save("job-1", save_payload("Round Two"))
        .await
        .expect("save again");

    // Same row: the second save updates the first save's record.
    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Round Two");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments WHERE job_id = ?")
        .bind("job-1")
        .fetch_one(&state.pool)
        .await
        .expect("count");
    assert_eq!(count, 1);

    let fetched = state
        .assessment_service
        .get_by_job("job-1")
        .await
        .expect("get")
        .expect("some");
    assert_eq!(fetched.id, first.id);
    assert_eq!(fetched.sections.0.len(), 1);
    assert_eq!(fetched.sections.0[0].questions[0].kind, QuestionType::SingleChoice);
}

#[tokio::test]
async fn submit_always_creates_a_new_response() {
    let state = test_state().await;

    let assessment = state
        .assessment_service
        .save("job-1", save_payload("Screening"))
        .await
        .expect("save");

    let payload = SubmitResponsePayload {
        candidate_id: "candidate-1".to_string(),
        responses: vec![QuestionResponse {
            question_id: "q-1".to_string(),
            value: serde_json::json!("3-5"),
            submitted_at: Utc::now(),
        }],
        submitted_at: Some(Utc::now()),
    };

    let first = state
        .assessment_service
        .submit_response("job-1", payload.clone())
        .await
        .expect("submit");
    let second = state
        .assessment_service
        .submit_response("job-1", payload)
        .await
        .expect("submit again");

    assert_ne!(first.id, second.id);
    assert_eq!(first.assessment_id, assessment.id);

    let responses = state
        .assessment_service
        .responses_for_assessment(&assessment.id)
        .await
        .expect("responses");
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].responses.0[0].question_id, "q-1");
}

#[tokio::test]
async fn submit_without_an_assessment_is_not_found() {
    let state = test_state().await;

    let result = state
        .assessment_service
        .submit_response(
            "job-without-assessment",
            SubmitResponsePayload {
                candidate_id: "candidate-1".to_string(),
                responses: Vec::new(),
                submitted_at: None,
            },
        )
        .await;
    match result {
        Err(Error::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|r| r.id)),
    }
}

#[tokio::test]
async fn save_rejects_an_empty_title() {
    let state = test_state().await;

    let result = state
        .assessment_service
        .save("job-1", save_payload(""))
        .await;
    match result {
        Err(Error::Validation(_)) => {}
        other => panic!("expected Validation, got {:?}", other.map(|a| a.id)),
    }
    assert!(state
        .assessment_service
        .get_by_job("job-1")
        .await
        .expect("get")
        .is_none());
}
