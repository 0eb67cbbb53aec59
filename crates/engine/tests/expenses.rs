use chrono::{NaiveDate, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Category, Currency, Engine, EngineError, ExpenseDraft, ExpenseQuery, GoogleIdentity, Money,
    SettingsPatch, Theme,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn identity(google_id: &str, email: &str) -> GoogleIdentity {
    GoogleIdentity {
        google_id: google_id.to_string(),
        email: email.to_string(),
        name: "Alice".to_string(),
        picture: None,
    }
}

async fn alice(engine: &Engine) -> i64 {
    engine
        .upsert_google_user(identity("g-alice", "alice@example.com"))
        .await
        .unwrap()
        .id
}

fn draft(title: &str, amount: i64, category: &str, date: Option<(i32, u32, u32)>) -> ExpenseDraft {
    let date = date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
    ExpenseDraft::new(title, Money::new(amount), category, date).unwrap()
}

#[tokio::test]
async fn upsert_refreshes_existing_user() {
    let (engine, _db) = engine_with_db().await;
    let first = engine
        .upsert_google_user(identity("g-alice", "alice@example.com"))
        .await
        .unwrap();

    let mut refreshed = identity("g-alice", "alice@new.example.com");
    refreshed.name = "Alice B.".to_string();
    refreshed.picture = Some("https://example.com/a.png".to_string());
    let second = engine.upsert_google_user(refreshed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.email, "alice@new.example.com");
    assert_eq!(second.name, "Alice B.");
    assert_eq!(second.picture.as_deref(), Some("https://example.com/a.png"));
    assert_eq!(first.created_at, second.created_at);

    let loaded = engine.user(first.id).await.unwrap();
    assert_eq!(loaded, second);
}

#[tokio::test]
async fn another_google_account_cannot_claim_an_email() {
    let (engine, _db) = engine_with_db().await;
    let owner = engine
        .upsert_google_user(identity("g-owner", "shared@example.com"))
        .await
        .unwrap();

    let other = engine
        .upsert_google_user(identity("g-other", "shared@example.com"))
        .await;
    assert!(matches!(other, Err(EngineError::Conflict(_))));

    let loaded = engine.user(owner.id).await.unwrap();
    assert_eq!(loaded.google_id, "g-owner");
    assert_eq!(loaded.email, "shared@example.com");

    let again = engine
        .upsert_google_user(identity("g-owner", "shared@example.com"))
        .await
        .unwrap();
    assert_eq!(again.id, owner.id);
}

#[tokio::test]
async fn refresh_cannot_take_another_users_email() {
    let (engine, _db) = engine_with_db().await;
    alice(&engine).await;
    let bob = engine
        .upsert_google_user(identity("g-bob", "bob@example.com"))
        .await
        .unwrap();

    let moved = engine
        .upsert_google_user(identity("g-bob", "alice@example.com"))
        .await;
    assert!(matches!(moved, Err(EngineError::Conflict(_))));
    assert_eq!(engine.user(bob.id).await.unwrap().email, "bob@example.com");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    assert!(matches!(
        engine.user(42).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn new_users_get_default_settings() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let settings = engine.settings(user_id).await.unwrap();
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.currency, Currency::Inr);
}

#[tokio::test]
async fn settings_patch_keeps_missing_fields() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let updated = engine
        .update_settings(
            user_id,
            SettingsPatch {
                theme: None,
                currency: Some(Currency::Usd),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.currency, Currency::Usd);

    let updated = engine
        .update_settings(
            user_id,
            SettingsPatch {
                theme: Some(Theme::Light),
                currency: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.currency, Currency::Usd);
    assert_eq!(engine.settings(user_id).await.unwrap(), updated);
}

#[tokio::test]
async fn create_defaults_date_to_today() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let expense = engine
        .create_expense(user_id, draft("Coffee", 350, "Food", None))
        .await
        .unwrap();

    assert_eq!(expense.date, Utc::now().date_naive());
    assert_eq!(expense.amount, Money::new(350));
    assert_eq!(expense.category, Category::Food);
    assert_eq!(engine.expense(user_id, expense.id).await.unwrap(), expense);
}

#[tokio::test]
async fn list_orders_by_date_desc_and_pages() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    for (title, day) in [("a", 1), ("b", 3), ("c", 2)] {
        engine
            .create_expense(user_id, draft(title, 100, "Other", Some((2024, 5, day))))
            .await
            .unwrap();
    }

    let titles: Vec<_> = engine
        .list_expenses(user_id, ExpenseQuery::default())
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["b", "c", "a"]);

    let page = engine
        .list_expenses(user_id, ExpenseQuery::new(Some(1), Some(1)))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "c");
}

#[tokio::test]
async fn expenses_are_scoped_to_owner() {
    let (engine, _db) = engine_with_db().await;
    let alice_id = alice(&engine).await;
    let bob_id = engine
        .upsert_google_user(identity("g-bob", "bob@example.com"))
        .await
        .unwrap()
        .id;

    let expense = engine
        .create_expense(alice_id, draft("Rent", 50_000, "Utilities", None))
        .await
        .unwrap();

    assert!(matches!(
        engine.expense(bob_id, expense.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_expense(bob_id, expense.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(
        engine
            .list_expenses(bob_id, ExpenseQuery::default())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(engine.clear_expenses(bob_id).await.unwrap(), 0);
    assert!(engine.expense(alice_id, expense.id).await.is_ok());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_created_at() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let original = engine
        .create_expense(user_id, draft("Taxi", 1200, "Transport", Some((2024, 1, 5))))
        .await
        .unwrap();

    let updated = engine
        .update_expense(user_id, original.id, draft("Bus", 250, "Transport", None))
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, "Bus");
    assert_eq!(updated.amount, Money::new(250));
    assert_eq!(updated.date, original.date);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    assert!(matches!(
        engine
            .update_expense(user_id, 9_999, draft("Bus", 250, "Transport", None))
            .await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn delete_returns_the_removed_expense() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let expense = engine
        .create_expense(user_id, draft("Movie", 800, "Entertainment", None))
        .await
        .unwrap();
    let deleted = engine.delete_expense(user_id, expense.id).await.unwrap();
    assert_eq!(deleted, expense);

    assert!(matches!(
        engine.expense(user_id, expense.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn seed_then_clear() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let seeded = engine.seed_expenses(user_id).await.unwrap();
    assert_eq!(seeded.len(), 5);
    assert!(seeded.iter().all(|e| e.date == Utc::now().date_naive()));

    let summary = engine.summary(user_id).await.unwrap();
    assert_eq!(summary.count, 5);
    assert_eq!(summary.total, Money::new(181_924));
    assert_eq!(summary.average, Money::new(36_385));
    assert_eq!(summary.top_categories[0].category, Category::Health);

    assert_eq!(engine.clear_expenses(user_id).await.unwrap(), 5);
    let summary = engine.summary(user_id).await.unwrap();
    assert_eq!(summary.count, 0);
    assert_eq!(summary.average, Money::ZERO);
}

#[tokio::test]
async fn breakdowns_group_by_category_and_month() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    for (title, amount, category, date) in [
        ("Lunch", 1_000, "Food", (2024, 1, 10)),
        ("Dinner", 3_000, "Food", (2024, 2, 1)),
        ("Train", 4_000, "Transport", (2024, 2, 20)),
        ("Shoes", 2_000, "Shopping", (2023, 11, 3)),
    ] {
        engine
            .create_expense(user_id, draft(title, amount, category, Some(date)))
            .await
            .unwrap();
    }

    let categories = engine.category_breakdown(user_id).await.unwrap();
    assert_eq!(categories[0].category, Category::Food);
    assert_eq!(categories[0].total, Money::new(4_000));
    assert_eq!(categories[0].count, 2);
    assert_eq!(categories[0].percentage, 40.0);
    // Same total as Food, ordered after it.
    assert_eq!(categories[1].category, Category::Transport);

    let months: Vec<_> = engine
        .monthly_breakdown(user_id)
        .await
        .unwrap()
        .iter()
        .map(|m| (m.label(), m.total.minor(), m.count))
        .collect();
    assert_eq!(
        months,
        vec![
            ("2023-11".to_string(), 2_000, 1),
            ("2024-01".to_string(), 1_000, 1),
            ("2024-02".to_string(), 7_000, 2),
        ]
    );
}
