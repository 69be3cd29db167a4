//! Postgres-backed harness for store tests.
//!
//! One container per test binary, started and migrated on first use.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use coursegen_core::common::CourseId;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct SharedDatabase {
    db_url: String,
    // Dropping the handle stops the container
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_DATABASE: OnceCell<SharedDatabase> = OnceCell::const_new();

static NEXT_COURSE: AtomicUsize = AtomicUsize::new(0);

impl SharedDatabase {
    async fn init() -> Result<Self> {
        // RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_DATABASE
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test database")
            })
            .await
    }
}

/// Fresh pool on the shared, migrated database.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn stores_notes(ctx: &TestHarness) {
///     let store = PostgresNoteStore::new(ctx.db_pool.clone());
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let database = SharedDatabase::get().await;
        let db_pool = PgPool::connect(&database.db_url)
            .await
            .context("Failed to connect to test database")?;
        Ok(Self { db_pool })
    }

    /// Course id no other test in this binary uses.
    pub fn unique_course_id(&self, prefix: &str) -> CourseId {
        let n = NEXT_COURSE.fetch_add(1, Ordering::SeqCst);
        CourseId::parse(format!("{}-{}", prefix, n)).expect("non-blank course id")
    }

    /// Insert a study material row in its initial state.
    pub async fn seed_study_material(&self, course_id: &CourseId) -> Result<()> {
        sqlx::query("INSERT INTO study_materials (course_id, topic, course_type) VALUES ($1, $2, $3)")
            .bind(course_id)
            .bind("Python")
            .bind("Exam")
            .execute(&self.db_pool)
            .await
            .context("Failed to seed study material")?;
        Ok(())
    }

    pub async fn course_status(&self, course_id: &CourseId) -> Result<String> {
        let status: String =
            sqlx::query_scalar("SELECT status FROM study_materials WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(&self.db_pool)
                .await?;
        Ok(status)
    }
}
