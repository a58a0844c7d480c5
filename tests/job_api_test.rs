use talentflow_backend::dto::job_dto::{
    CreateJobPayload, JobListQuery, JobSort, ReorderPayload, UpdateJobPayload,
};
use talentflow_backend::dto::SortOrder;
use talentflow_backend::error::Error;
use talentflow_backend::models::job::JobStatus;
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

fn job_payload(title: &str, slug: &str, order: i64, status: JobStatus) -> CreateJobPayload {
    CreateJobPayload {
        title: title.to_string(),
        slug: slug.to_string(),
        status,
        tags: vec!["Engineering".to_string()],
        order,
        description: Some(format!("{} role", title)),
        requirements: Some(vec!["3+ years experience".to_string()]),
        location: Some("Remote".to_string()),
        salary: None,
    }
}

#[tokio::test]
async fn create_stamps_identity_and_timestamps() {
    let state = test_state().await;

    let job = state
        .job_service
        .create(job_payload(
            "Senior Frontend Developer",
            "senior-frontend-developer",
            1,
            JobStatus::Active,
        ))
        .await
        .expect("create");

    assert!(job.id.starts_with("job_"));
    assert_eq!(job.created_at, job.updated_at);
    assert_eq!(job.title, "Senior Frontend Developer");
    assert_eq!(job.tags.0, vec!["Engineering".to_string()]);

    let second = state
        .job_service
        .create(job_payload(
            "Backend Engineer",
            "backend-engineer",
            2,
            JobStatus::Active,
        ))
        .await
        .expect("create second");
    assert_ne!(job.id, second.id);

    let page = state
        .job_service
        .list(JobListQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 2);
    let stored = page.data.iter().find(|j| j.id == job.id).expect("stored");
    assert_eq!(stored.slug, job.slug);
    assert_eq!(stored.order, 1);
}

#[tokio::test]
async fn list_applies_every_filter_conjunctively() {
    let state = test_state().await;

    state
        .job_service
        .create(job_payload("Backend Engineer", "backend-engineer", 1, JobStatus::Active))
        .await
        .expect("create");
    state
        .job_service
        .create(job_payload("Network Engineer", "network-engineer", 2, JobStatus::Archived))
        .await
        .expect("create");
    state
        .job_service
        .create(job_payload("Product Manager", "product-manager", 3, JobStatus::Active))
        .await
        .expect("create");

    let page = state
        .job_service
        .list(JobListQuery {
            search: Some("ENGINEER".to_string()),
            status: Some(JobStatus::Active),
            ..Default::default()
        })
        .await
        .expect("list");

    assert_eq!(page.total, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].title, "Backend Engineer");

    // Search also matches descriptions, case-insensitively.
    let by_description = state
        .job_service
        .list(JobListQuery {
            search: Some("manager role".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(by_description.total, 1);
    assert_eq!(by_description.data[0].title, "Product Manager");
}

#[tokio::test]
async fn pagination_reconstructs_the_filtered_list_exactly() {
    let state = test_state().await;

    for i in 1..=7 {
        state
            .job_service
            .create(job_payload(
                &format!("Role {}", i),
                &format!("role-{}", i),
                i,
                JobStatus::Active,
            ))
            .await
            .expect("create");
    }

    let full = state
        .job_service
        .list(JobListQuery {
            page_size: Some(100),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(full.total, 7);

    let mut collected = Vec::new();
    let mut page_no = 1;
    loop {
        let page = state
            .job_service
            .list(JobListQuery {
                page: Some(page_no),
                page_size: Some(3),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);
        if page_no > page.total_pages {
            assert!(page.data.is_empty());
            break;
        }
        collected.extend(page.data.into_iter().map(|j| j.id));
        page_no += 1;
    }

    let expected: Vec<String> = full.data.into_iter().map(|j| j.id).collect();
    assert_eq!(collected, expected);
}

#[tokio::test]
async fn descending_is_the_exact_reverse_of_ascending() {
    let state = test_state().await;

    for (i, title) in ["Delta", "Alpha", "Charlie", "Bravo"].iter().enumerate() {
        state
            .job_service
            .create(job_payload(title, &title.to_lowercase(), i as i64 + 1, JobStatus::Active))
            .await
            .expect("create");
    }

    let asc = state
        .job_service
        .list(JobListQuery {
            sort: Some(JobSort::Title),
            order: Some(SortOrder::Asc),
            page_size: Some(100),
            ..Default::default()
        })
        .await
        .expect("asc");
    let desc = state
        .job_service
        .list(JobListQuery {
            sort: Some(JobSort::Title),
            order: Some(SortOrder::Desc),
            page_size: Some(100),
            ..Default::default()
        })
        .await
        .expect("desc");

    let mut reversed: Vec<String> = asc.data.into_iter().map(|j| j.id).collect();
    reversed.reverse();
    let desc_ids: Vec<String> = desc.data.into_iter().map(|j| j.id).collect();
    assert_eq!(desc_ids, reversed);
}

#[tokio::test]
async fn update_merges_only_the_provided_fields() {
    let state = test_state().await;

    let job = state
        .job_service
        .create(job_payload("QA Engineer", "qa-engineer", 4, JobStatus::Active))
        .await
        .expect("create");

    let updated = state
        .job_service
        .update(
            &job.id,
            UpdateJobPayload {
                title: Some("Senior QA Engineer".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.title, "Senior QA Engineer");
    assert_eq!(updated.slug, job.slug);
    assert_eq!(updated.status, job.status);
    assert_eq!(updated.tags.0, job.tags.0);
    assert_eq!(updated.order, job.order);
    assert_eq!(updated.description, job.description);
    assert_eq!(
        updated.requirements.as_ref().map(|r| &r.0),
        job.requirements.as_ref().map(|r| &r.0)
    );
    assert_eq!(updated.location, job.location);
    assert_eq!(updated.salary, job.salary);
    assert_eq!(updated.created_at, job.created_at);
    assert!(updated.updated_at >= job.updated_at);
}

#[tokio::test]
async fn archiving_moves_a_job_between_status_filters() {
    let state = test_state().await;

    let job = state
        .job_service
        .create(job_payload("HR Manager", "hr-manager", 1, JobStatus::Active))
        .await
        .expect("create");

    let archived = state
        .job_service
        .update(
            &job.id,
            UpdateJobPayload {
                status: Some(JobStatus::Archived),
                ..Default::default()
            },
        )
        .await
        .expect("archive");
    assert_eq!(archived.status, JobStatus::Archived);
    assert_eq!(archived.order, job.order);

    let active = state
        .job_service
        .list(JobListQuery {
            status: Some(JobStatus::Active),
            ..Default::default()
        })
        .await
        .expect("active");
    assert!(active.data.iter().all(|j| j.id != job.id));

    let archived_page = state
        .job_service
        .list(JobListQuery {
            status: Some(JobStatus::Archived),
            ..Default::default()
        })
        .await
        .expect("archived");
    assert!(archived_page.data.iter().any(|j| j.id == job.id));
}

#[tokio::test]
async fn update_of_a_missing_job_is_always_not_found() {
    let state = test_state().await;

    for _ in 0..20 {
        let result = state
            .job_service
            .update("job_missing", UpdateJobPayload::default())
            .await;
        match result {
            Err(Error::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|j| j.id)),
        }
    }
}

#[tokio::test]
async fn reorder_sets_the_target_without_renumbering_siblings() {
    let state = test_state().await;

    let first = state
        .job_service
        .create(job_payload("Role A", "role-a", 1, JobStatus::Active))
        .await
        .expect("create");
    let second = state
        .job_service
        .create(job_payload("Role B", "role-b", 2, JobStatus::Active))
        .await
        .expect("create");

    let moved = state
        .job_service
        .reorder(
            &first.id,
            ReorderPayload {
                from_order: 1,
                to_order: 2,
            },
        )
        .await
        .expect("reorder");
    assert_eq!(moved.order, 2);

    // The sibling keeps its order value; ties are allowed.
    let untouched = state
        .job_service
        .find_by_id(&second.id)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(untouched.order, 2);

    match state
        .job_service
        .reorder("job_missing", ReorderPayload { from_order: 1, to_order: 5 })
        .await
    {
        Err(Error::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|j| j.id)),
    }
}

#[tokio::test]
async fn create_rejects_invalid_payloads_before_the_store() {
    let state = test_state().await;

    let result = state
        .job_service
        .create(job_payload("", "empty-title", 1, JobStatus::Active))
        .await;
    match result {
        Err(Error::Validation(_)) => {}
        other => panic!("expected Validation, got {:?}", other.map(|j| j.id)),
    }

    let page = state
        .job_service
        .list(JobListQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let state = test_state().await;

    let job = state
        .job_service
        .create(job_payload("Content Writer", "content-writer", 9, JobStatus::Active))
        .await
        .expect("create");

    state.job_service.delete(&job.id).await.expect("delete");

    assert!(state
        .job_service
        .find_by_id(&job.id)
        .await
        .expect("find")
        .is_none());
    match state
        .job_service
        .update(&job.id, UpdateJobPayload::default())
        .await
    {
        Err(Error::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|j| j.id)),
    }
}

#[tokio::test]
async fn find_by_slug_resolves_known_slugs_only() {
    let state = test_state().await;

    state
        .job_service
        .create(job_payload("Data Scientist", "data-scientist", 1, JobStatus::Active))
        .await
        .expect("create");

    let found = state
        .job_service
        .find_by_slug("data-scientist")
        .await
        .expect("find");
    assert_eq!(found.expect("some").title, "Data Scientist");

    let missing = state
        .job_service
        .find_by_slug("unknown-slug")
        .await
        .expect("find");
    assert!(missing.is_none());
}
