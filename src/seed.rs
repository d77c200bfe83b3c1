use crate::auth::hash_password;
use crate::models::{badge, follow, habit, profile, user_task};
use sea_orm::*;

/// Seed the static habit and badge catalogs. Runs on every startup;
/// inserts are keyed on the unique title/name so reruns are no-ops.
pub async fn seed_catalogs(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    let habits: Vec<(&str, &str, i32, &str)> = vec![
        ("Drink 2L of water", "Health", 10, "water"),
        ("30 minute workout", "Health", 25, "barbell"),
        ("Sleep before midnight", "Health", 15, "moon"),
        ("Read 20 pages", "Study", 20, "book"),
        ("Review flashcards", "Study", 10, "school"),
        ("Practice a language", "Study", 15, "language"),
        ("Meditate 10 minutes", "Mindset", 15, "leaf"),
        ("Write in journal", "Mindset", 10, "create"),
        ("Gratitude note", "Mindset", 5, "heart"),
        ("Plan tomorrow", "Productivity", 10, "calendar"),
        ("Inbox zero", "Productivity", 20, "mail"),
        ("Deep work hour", "Productivity", 25, "timer"),
    ];

    for (title, category, points, icon) in habits {
        let entry = habit::ActiveModel {
            title: Set(title.to_owned()),
            category: Set(category.to_owned()),
            points: Set(points),
            icon_name: Set(Some(icon.to_owned())),
            created_at: Set(now.clone()),
            ..Default::default()
        };
        habit::Entity::insert(entry)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(habit::Column::Title)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    let badges: Vec<(&str, i32, &str, &str, &str)> = vec![
        ("Early Bird", 25, "common", "sunny", "#FFB300"),
        ("Bookworm", 40, "common", "library", "#8D6E63"),
        ("Hydration Hero", 30, "common", "water", "#29B6F6"),
        ("Zen Master", 75, "rare", "leaf", "#66BB6A"),
        ("Iron Will", 100, "rare", "barbell", "#EF5350"),
        ("Night Owl", 60, "rare", "moon", "#7E57C2"),
        ("Centurion", 250, "epic", "trophy", "#FFD700"),
        ("Unstoppable", 500, "legendary", "flame", "#FF7043"),
    ];

    for (name, price, rarity, icon, color) in badges {
        let entry = badge::ActiveModel {
            name: Set(name.to_owned()),
            price: Set(price),
            rarity: Set(rarity.to_owned()),
            icon_name: Set(Some(icon.to_owned())),
            color_hex: Set(Some(color.to_owned())),
            created_at: Set(now.clone()),
            ..Default::default()
        };
        badge::Entity::insert(entry)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(badge::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

/// Demo accounts and a little social graph for local development.
/// Enabled with SEED_DEMO=1.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    let demo_users = vec![
        ("maya", "maya@habitude.dev"),
        ("jonas", "jonas@habitude.dev"),
        ("ana", "ana@habitude.dev"),
    ];

    for (username, email) in &demo_users {
        let password_hash = hash_password("demo1234").map_err(DbErr::Custom)?;
        let user = profile::ActiveModel {
            username: Set((*username).to_owned()),
            email: Set((*email).to_owned()),
            password_hash: Set(password_hash),
            avatar_url: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        profile::Entity::insert(user)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(profile::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    let maya = profile::Entity::find()
        .filter(profile::Column::Username.eq("maya"))
        .one(db)
        .await?;
    let jonas = profile::Entity::find()
        .filter(profile::Column::Username.eq("jonas"))
        .one(db)
        .await?;

    let (maya, jonas) = match (maya, jonas) {
        (Some(m), Some(j)) => (m, j),
        _ => return Ok(()),
    };

    // maya and jonas follow each other, so they show up as friends
    for (follower, following) in [(maya.id, jonas.id), (jonas.id, maya.id)] {
        let edge = follow::ActiveModel {
            follower_id: Set(follower),
            following_id: Set(following),
            created_at: Set(now.clone()),
            ..Default::default()
        };
        follow::Entity::insert(edge)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    follow::Column::FollowerId,
                    follow::Column::FollowingId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    // give maya a couple of adopted habits to play with
    let some_habits = habit::Entity::find()
        .order_by_desc(habit::Column::Points)
        .paginate(db, 3)
        .fetch_page(0)
        .await?;

    for h in some_habits {
        let existing = user_task::Entity::find()
            .filter(user_task::Column::UserId.eq(maya.id))
            .filter(user_task::Column::HabitId.eq(h.id))
            .count(db)
            .await?;
        if existing == 0 {
            let task = user_task::ActiveModel {
                user_id: Set(maya.id),
                habit_id: Set(h.id),
                status: Set(user_task::STATUS_PENDING.to_owned()),
                created_at: Set(now.clone()),
                ..Default::default()
            };
            task.insert(db).await?;
        }
    }

    Ok(())
}
