use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_field_schedules_field_date ON field_schedules(field_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_field_schedules_time_id ON field_schedules(time_id)",
    "CREATE INDEX IF NOT EXISTS idx_field_schedules_created_at ON field_schedules(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_fields_created_at ON fields(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_times_start_time ON times(start_time)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create fields table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fields (
            id SERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            code VARCHAR(50) NOT NULL,
            price_per_hour INTEGER NOT NULL,
            images TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_price CHECK (price_per_hour > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create times table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS times (
            id SERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create field_schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS field_schedules (
            id SERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE,
            field_id INTEGER NOT NULL REFERENCES fields(id) ON DELETE RESTRICT,
            time_id INTEGER NOT NULL REFERENCES times(id) ON DELETE RESTRICT,
            date DATE NOT NULL,
            status INTEGER NOT NULL DEFAULT 100,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT field_schedules_slot_key UNIQUE (field_id, date, time_id),
            CONSTRAINT known_status CHECK (status IN (100, 200))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
