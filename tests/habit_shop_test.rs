//! Habit shop tests: recommendations, adoption, completion and dropping.

use habitude::db;
use habitude::models::{habit, profile, user_task};
use habitude::services::{habit_service, ServiceError};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_profile(db: &DatabaseConnection, username: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let user = profile::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{}@test.local", username)),
        password_hash: Set("$argon2id$dummy_hash".to_string()),
        avatar_url: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = profile::Entity::insert(user)
        .exec(db)
        .await
        .expect("Failed to create profile");
    res.last_insert_id
}

async fn create_test_habit(
    db: &DatabaseConnection,
    title: &str,
    category: &str,
    points: i32,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let entry = habit::ActiveModel {
        title: Set(title.to_string()),
        category: Set(category.to_string()),
        points: Set(points),
        icon_name: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let res = habit::Entity::insert(entry)
        .exec(db)
        .await
        .expect("Failed to create habit");
    res.last_insert_id
}

#[tokio::test]
async fn test_recommendations_exclude_adopted_habits() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "shopper").await;

    let h1 = create_test_habit(&db, "Workout", "Health", 25).await;
    let h2 = create_test_habit(&db, "Read", "Study", 20).await;
    let h3 = create_test_habit(&db, "Journal", "Mindset", 10).await;

    habit_service::adopt_habit(&db, user, h2)
        .await
        .expect("adopt failed");

    let recs = habit_service::recommendations(&db, user)
        .await
        .expect("recommendations failed");
    let ids: Vec<i32> = recs.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![h1, h3]);
}

#[tokio::test]
async fn test_recommendations_exclude_completed_habits_too() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "finisher").await;

    let h1 = create_test_habit(&db, "Workout", "Health", 25).await;
    let h2 = create_test_habit(&db, "Read", "Study", 20).await;

    let task = habit_service::adopt_habit(&db, user, h1)
        .await
        .expect("adopt failed");
    habit_service::complete_task(&db, user, task.id)
        .await
        .expect("complete failed");

    let recs = habit_service::recommendations(&db, user)
        .await
        .expect("recommendations failed");
    let ids: Vec<i32> = recs.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![h2]);
}

#[tokio::test]
async fn test_recommendations_ordered_by_points_descending() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "browser").await;

    create_test_habit(&db, "Small", "Health", 5).await;
    create_test_habit(&db, "Big", "Study", 30).await;
    create_test_habit(&db, "Medium", "Mindset", 15).await;

    let recs = habit_service::recommendations(&db, user)
        .await
        .expect("recommendations failed");
    let points: Vec<i32> = recs.iter().map(|h| h.points).collect();
    assert_eq!(points, vec![30, 15, 5]);
}

#[tokio::test]
async fn test_adopting_twice_is_rejected() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "eager").await;
    let h = create_test_habit(&db, "Workout", "Health", 25).await;

    habit_service::adopt_habit(&db, user, h)
        .await
        .expect("first adopt failed");
    let second = habit_service::adopt_habit(&db, user, h).await;
    assert!(matches!(second, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn test_adopting_unknown_habit_is_not_found() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "confused").await;

    let result = habit_service::adopt_habit(&db, user, 42).await;
    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_completing_a_task_twice_is_rejected() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "doer").await;
    let h = create_test_habit(&db, "Workout", "Health", 25).await;

    let task = habit_service::adopt_habit(&db, user, h)
        .await
        .expect("adopt failed");
    habit_service::complete_task(&db, user, task.id)
        .await
        .expect("complete failed");

    let second = habit_service::complete_task(&db, user, task.id).await;
    assert!(matches!(second, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn test_completing_another_users_task_is_not_found() {
    let db = setup_test_db().await;
    let owner = create_test_profile(&db, "owner").await;
    let intruder = create_test_profile(&db, "intruder").await;
    let h = create_test_habit(&db, "Workout", "Health", 25).await;

    let task = habit_service::adopt_habit(&db, owner, h)
        .await
        .expect("adopt failed");

    let result = habit_service::complete_task(&db, intruder, task.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_drop_habit_is_idempotent() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "quitter").await;
    let h = create_test_habit(&db, "Workout", "Health", 25).await;

    habit_service::adopt_habit(&db, user, h)
        .await
        .expect("adopt failed");

    let first = habit_service::drop_habit(&db, user, h)
        .await
        .expect("drop failed");
    assert_eq!(first, 1);

    // Dropping again removes nothing and does not error
    let second = habit_service::drop_habit(&db, user, h)
        .await
        .expect("second drop failed");
    assert_eq!(second, 0);

    let remaining = user_task::Entity::find()
        .all(&db)
        .await
        .expect("query failed");
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_dropped_habit_returns_to_recommendations() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "returner").await;
    let h = create_test_habit(&db, "Workout", "Health", 25).await;

    habit_service::adopt_habit(&db, user, h)
        .await
        .expect("adopt failed");
    assert!(habit_service::recommendations(&db, user)
        .await
        .expect("recommendations failed")
        .is_empty());

    habit_service::drop_habit(&db, user, h)
        .await
        .expect("drop failed");

    let recs = habit_service::recommendations(&db, user)
        .await
        .expect("recommendations failed");
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].id, h);
}

#[tokio::test]
async fn test_list_tasks_filters_by_status() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "lister").await;
    let h1 = create_test_habit(&db, "Workout", "Health", 25).await;
    let h2 = create_test_habit(&db, "Read", "Study", 20).await;

    let t1 = habit_service::adopt_habit(&db, user, h1)
        .await
        .expect("adopt failed");
    habit_service::adopt_habit(&db, user, h2)
        .await
        .expect("adopt failed");
    habit_service::complete_task(&db, user, t1.id)
        .await
        .expect("complete failed");

    let pending = habit_service::list_tasks(&db, user, Some("pending".to_string()))
        .await
        .expect("list failed");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].habit_id, h2);

    let all = habit_service::list_tasks(&db, user, None)
        .await
        .expect("list failed");
    assert_eq!(all.len(), 2);
}
