//! Points ledger tests: balance recomputation, category breakdown and the
//! badge purchase preconditions.

use habitude::db;
use habitude::models::{badge, habit, profile};
use habitude::services::points_service;
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

async fn create_test_badge(db: &DatabaseConnection, name: &str, price: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let entry = badge::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        rarity: Set("common".to_string()),
        icon_name: Set(None),
        color_hex: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let res = badge::Entity::insert(entry)
        .exec(db)
        .await
        .expect("Failed to create badge");
    res.last_insert_id
}

// Adopt and immediately complete a habit so it contributes earned points
async fn earn(db: &DatabaseConnection, user_id: i32, habit_id: i32) {
    let task = habit_service::adopt_habit(db, user_id, habit_id)
        .await
        .expect("adopt failed");
    habit_service::complete_task(db, user_id, task.id)
        .await
        .expect("complete failed");
}

#[tokio::test]
async fn test_balance_is_earned_minus_spent() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "saver").await;

    let h1 = create_test_habit(&db, "Drink water", "Health", 10).await;
    let h2 = create_test_habit(&db, "Read", "Study", 20).await;
    let h3 = create_test_habit(&db, "Meditate", "Mindset", 5).await;
    for h in [h1, h2, h3] {
        earn(&db, user, h).await;
    }

    let badge_id = create_test_badge(&db, "Early Bird", 15).await;
    points_service::purchase_badge(&db, user, badge_id)
        .await
        .expect("purchase failed");

    let summary = points_service::compute_balance(&db, user)
        .await
        .expect("balance failed");
    assert_eq!(summary.earned, 35);
    assert_eq!(summary.spent, 15);
    assert_eq!(summary.balance, 20);
    assert_eq!(summary.completed, 3);
}

#[tokio::test]
async fn test_category_breakdown_counts_each_bucket() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "sorter").await;

    let health = create_test_habit(&db, "Workout", "Health", 25).await;
    let study = create_test_habit(&db, "Flashcards", "Study", 10).await;
    earn(&db, user, health).await;
    earn(&db, user, study).await;

    let summary = points_service::compute_balance(&db, user)
        .await
        .expect("balance failed");
    assert_eq!(summary.category_breakdown.health, 1);
    assert_eq!(summary.category_breakdown.study, 1);
    assert_eq!(summary.category_breakdown.mindset, 0);
    assert_eq!(summary.category_breakdown.productivity, 0);
}

#[tokio::test]
async fn test_tasks_completed_now_count_toward_daily_goal() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "today").await;

    let h = create_test_habit(&db, "Journal", "Mindset", 10).await;
    earn(&db, user, h).await;

    let summary = points_service::compute_balance(&db, user)
        .await
        .expect("balance failed");
    assert_eq!(summary.completed_today, 1);
    assert_eq!(summary.daily_goal, points_service::DAILY_GOAL);
}

#[tokio::test]
async fn test_completion_outlives_its_catalog_entry() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "orphan").await;

    let h = create_test_habit(&db, "Retired habit", "Health", 10).await;
    earn(&db, user, h).await;

    // The catalog entry disappears but the completion happened
    habit::Entity::delete_by_id(h)
        .exec(&db)
        .await
        .expect("delete failed");

    let summary = points_service::compute_balance(&db, user)
        .await
        .expect("balance failed");
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.completed_today, 1);
    assert_eq!(summary.earned, 0);
    assert_eq!(summary.category_breakdown.health, 0);
}

#[tokio::test]
async fn test_purchase_rejected_when_balance_below_price() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "broke").await;

    let h1 = create_test_habit(&db, "Drink water", "Health", 10).await;
    let h2 = create_test_habit(&db, "Journal", "Mindset", 10).await;
    earn(&db, user, h1).await;
    earn(&db, user, h2).await;

    let badge_id = create_test_badge(&db, "Zen Master", 25).await;
    let result = points_service::purchase_badge(&db, user, badge_id).await;
    match result {
        Err(ServiceError::InsufficientPoints { balance, price }) => {
            assert_eq!(balance, 20);
            assert_eq!(price, 25);
        }
        other => panic!("Expected InsufficientPoints, got {:?}", other),
    }

    // The rejected purchase must not have spent anything
    let summary = points_service::compute_balance(&db, user)
        .await
        .expect("balance failed");
    assert_eq!(summary.balance, 20);
    assert_eq!(summary.spent, 0);
}

#[tokio::test]
async fn test_purchase_accepted_when_balance_covers_price() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "flush").await;

    let h1 = create_test_habit(&db, "Workout", "Health", 25).await;
    let h2 = create_test_habit(&db, "Drink water", "Health", 5).await;
    earn(&db, user, h1).await;
    earn(&db, user, h2).await;

    let badge_id = create_test_badge(&db, "Zen Master", 25).await;
    let receipt = points_service::purchase_badge(&db, user, badge_id)
        .await
        .expect("purchase should succeed at balance 30 >= price 25");
    assert_eq!(receipt.price, 25);
    assert_eq!(receipt.balance_after, 5);

    let owned = points_service::owned_badges(&db, user)
        .await
        .expect("owned failed");
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].badge_id, badge_id);
}

#[tokio::test]
async fn test_purchase_rejected_when_already_owned() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "collector").await;

    let h = create_test_habit(&db, "Deep work", "Productivity", 100).await;
    earn(&db, user, h).await;

    let badge_id = create_test_badge(&db, "Early Bird", 25).await;
    points_service::purchase_badge(&db, user, badge_id)
        .await
        .expect("first purchase failed");

    let second = points_service::purchase_badge(&db, user, badge_id).await;
    assert!(matches!(second, Err(ServiceError::AlreadyOwned)));

    // Still only one row, only one price deducted
    let summary = points_service::compute_balance(&db, user)
        .await
        .expect("balance failed");
    assert_eq!(summary.spent, 25);
}

#[tokio::test]
async fn test_unknown_badge_purchase_is_not_found() {
    let db = setup_test_db().await;
    let user = create_test_profile(&db, "lost").await;

    let result = points_service::purchase_badge(&db, user, 999).await;
    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_badge_catalog_sorted_by_price() {
    let db = setup_test_db().await;
    create_test_badge(&db, "Expensive", 500).await;
    create_test_badge(&db, "Cheap", 10).await;
    create_test_badge(&db, "Middle", 100).await;

    let catalog = points_service::list_badge_catalog(&db)
        .await
        .expect("catalog failed");
    let prices: Vec<i32> = catalog.iter().map(|b| b.price).collect();
    assert_eq!(prices, vec![10, 100, 500]);
}
