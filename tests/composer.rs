use std::sync::Arc;

use inkpost::application::audit::AuditService;
use inkpost::application::compose::{ComposeError, ComposeService, PostFields};
use inkpost::application::latency::SimulatedLatency;
use inkpost::application::review::ReviewService;
use inkpost::domain::entities::{Identity, ImageAttachment};
use inkpost::domain::types::{Category, PostStatus, Role};
use inkpost::infra::memory::MemoryRepositories;

struct Harness {
    repos: Arc<MemoryRepositories>,
    compose: ComposeService,
    review: ReviewService,
}

fn harness() -> Harness {
    let repos = Arc::new(MemoryRepositories::new(true));
    let audit = AuditService::new(repos.clone());
    Harness {
        compose: ComposeService::new(
            repos.clone(),
            repos.clone(),
            audit.clone(),
            SimulatedLatency::NONE,
        ),
        review: ReviewService::new(repos.clone(), repos.clone(), audit, SimulatedLatency::NONE),
        repos,
    }
}

fn jane() -> Identity {
    Identity {
        name: "Jane Smith".to_string(),
        role: Role::Author,
    }
}

fn complete_fields() -> PostFields {
    PostFields {
        title: "Rust for Web Developers".to_string(),
        excerpt: "Why the borrow checker is your friend".to_string(),
        content: "# Rust\n\nOwnership makes data races a compile error.".to_string(),
        category: "Backend".to_string(),
        tags: "rust, backend".to_string(),
        featured_image: Some(ImageAttachment::new("/images/cover.png", Some("Warm"))),
        content_images: Vec::new(),
    }
}

#[tokio::test]
async fn submit_with_any_required_field_blank_changes_nothing() {
    let h = harness();
    let before = h.repos.post_count().await;

    let blanks: [(&str, fn(&mut PostFields)); 4] = [
        ("title", |fields| fields.title = "  ".into()),
        ("excerpt", |fields| fields.excerpt.clear()),
        ("content", |fields| fields.content = "\n".into()),
        ("category", |fields| fields.category.clear()),
    ];

    for (expected, blank) in blanks {
        let mut fields = complete_fields();
        blank(&mut fields);
        let err = h
            .compose
            .submit_for_review(&jane(), fields)
            .await
            .expect_err("incomplete submission");
        match err {
            ComposeError::MissingFields { field } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(h.repos.post_count().await, before);
}

#[tokio::test]
async fn complete_submission_enters_review_queue() {
    let h = harness();

    let post = h
        .compose
        .submit_for_review(&jane(), complete_fields())
        .await
        .expect("submit");

    assert_eq!(post.status, PostStatus::Pending);
    assert_eq!(post.author, "Jane Smith");
    assert_eq!(post.category, Some(Category::Backend));
    assert_eq!(post.tags, ["rust", "backend"]);
    assert_eq!(post.published_at, None);
    assert_eq!(post.id, 10);

    let queue = h.review.pending_queue().await.expect("queue");
    assert!(queue.iter().any(|pending| pending.id == post.id));
}

#[tokio::test]
async fn draft_saves_without_required_fields() {
    let h = harness();

    let post = h
        .compose
        .save_draft(&jane(), PostFields::default())
        .await
        .expect("draft");

    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.category, None);
    assert!(post.tags.is_empty());
    assert_eq!(post.read_time_minutes, 1);
}

#[tokio::test]
async fn draft_with_unknown_category_is_refused() {
    let h = harness();
    let fields = PostFields {
        category: "Gardening".to_string(),
        ..PostFields::default()
    };

    let err = h
        .compose
        .save_draft(&jane(), fields)
        .await
        .expect_err("unknown category");
    assert!(matches!(err, ComposeError::Invalid(_)));
}

#[tokio::test]
async fn authors_edit_only_their_own_drafts() {
    let h = harness();

    let updated = h
        .compose
        .update_draft(&jane(), 9, complete_fields())
        .await
        .expect("own draft");
    assert_eq!(updated.title, "Rust for Web Developers");
    assert_eq!(updated.status, PostStatus::Draft);

    let alex = Identity {
        name: "Alex Johnson".to_string(),
        role: Role::Author,
    };
    let err = h
        .compose
        .update_draft(&alex, 9, complete_fields())
        .await
        .expect_err("someone else's draft");
    assert!(matches!(err, ComposeError::NotFound(9)));

    let err = h
        .compose
        .update_draft(&jane(), 7, complete_fields())
        .await
        .expect_err("pending post");
    assert!(matches!(
        err,
        ComposeError::NotEditable {
            id: 7,
            status: PostStatus::Pending
        }
    ));
}

#[tokio::test]
async fn submitting_a_draft_requires_complete_fields() {
    let h = harness();

    let draft = h
        .compose
        .save_draft(
            &jane(),
            PostFields {
                title: "Half done".to_string(),
                ..PostFields::default()
            },
        )
        .await
        .expect("draft");

    let err = h
        .compose
        .submit_draft(&jane(), draft.id)
        .await
        .expect_err("incomplete draft");
    assert!(matches!(
        err,
        ComposeError::MissingFields { field: "excerpt" }
    ));

    let post = h.compose.submit_draft(&jane(), 9).await.expect("seeded draft");
    assert_eq!(post.status, PostStatus::Pending);

    let err = h
        .compose
        .submit_draft(&jane(), 9)
        .await
        .expect_err("already pending");
    assert!(matches!(err, ComposeError::Workflow(_)));
}

#[tokio::test]
async fn dashboard_counts_own_posts_by_status() {
    let h = harness();
    h.compose
        .submit_for_review(&jane(), complete_fields())
        .await
        .expect("submit");
    h.review
        .reject("admin", 7, "Please add code samples")
        .await
        .expect("reject");

    let dashboard = h.compose.dashboard(&jane()).await.expect("dashboard");
    let counts = dashboard.counts;

    assert_eq!(counts.total, 3);
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.draft, 1);
    assert_eq!(counts.rejected, 1);
    assert_eq!(counts.published, 0);

    let rejected = dashboard
        .posts
        .iter()
        .find(|post| post.id == 7)
        .expect("rejected post listed");
    assert_eq!(
        rejected.review_feedback.as_deref(),
        Some("Please add code samples")
    );
}
