use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

use crate::storage::MediaStore;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub media: MediaStore,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, media: MediaStore) -> Self {
        Self { conn, media }
    }
}

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Profiles (one row per account; auth fields live here too)
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            avatar_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Directed follow edges; uniqueness per ordered pair.
    // A mutual pair of rows is what makes two users "friends".
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS follows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            follower_id INTEGER NOT NULL,
            following_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (follower_id) REFERENCES profiles(id),
            FOREIGN KEY (following_id) REFERENCES profiles(id),
            UNIQUE(follower_id, following_id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Static habit catalog (seeded at startup)
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS habits_catalog (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL,
            points INTEGER NOT NULL,
            icon_name TEXT,
            created_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Adopted habits; status is 'pending' or 'completed'.
    // created_at is refreshed on completion so it doubles as the completion timestamp.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS user_tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            habit_id INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES profiles(id),
            FOREIGN KEY (habit_id) REFERENCES habits_catalog(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Static badge catalog (seeded at startup)
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS badges_catalog (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            price INTEGER NOT NULL,
            rarity TEXT NOT NULL DEFAULT 'common',
            icon_name TEXT,
            color_hex TEXT,
            created_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Purchases are immutable; no refunds are modeled.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS user_badges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            badge_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES profiles(id),
            FOREIGN KEY (badge_id) REFERENCES badges_catalog(id),
            UNIQUE(user_id, badge_id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            video_url TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES profiles(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Migration: badge rarity was added after the first release.
    // We attempt to add the column and ignore the error if it already exists.
    let _ = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "ALTER TABLE badges_catalog ADD COLUMN rarity TEXT NOT NULL DEFAULT 'common'"
                .to_owned(),
        ))
        .await;

    Ok(())
}
