//! Seed the database with the starter catalog and demo records.
//!
//! Seeding is idempotent: with existing catalog rows it is a no-op unless
//! `--force` is passed.

use sqlx::PgPool;

use super::CommandError;

/// A catalog row for seeding.
struct SeedVacation {
    sku: &'static str,
    slug: &'static str,
    name: &'static str,
    category: &'static str,
    description: &'static str,
    price_in_cents: i64,
    tags: &'static [&'static str],
    in_season: bool,
    requires_waiver: bool,
    maximum_guests: i32,
    qty: i32,
}

const CATALOG: &[SeedVacation] = &[
    SeedVacation {
        sku: "HR199",
        slug: "hood-river-day-trip",
        name: "Hood River Day Trip",
        category: "Day Trip",
        description: "Spend a day sailing on the Columbia and enjoying craft beers in Hood River!",
        price_in_cents: 9995,
        tags: &["day trip", "hood river", "sailing", "windsurfing", "breweries"],
        in_season: true,
        requires_waiver: false,
        maximum_guests: 16,
        qty: 0,
    },
    SeedVacation {
        sku: "OC39",
        slug: "oregon-coast-getaway",
        name: "Oregon Coast Getaway",
        category: "Weekend Getaway",
        description: "Enjoy the ocean air and quaint coastal towns!",
        price_in_cents: 269_995,
        tags: &["weekend getaway", "oregon coast", "beachcombing"],
        in_season: false,
        requires_waiver: false,
        maximum_guests: 8,
        qty: 0,
    },
    SeedVacation {
        sku: "B99",
        slug: "rock-climbing-in-bend",
        name: "Rock Climbing in Bend",
        category: "Adventure",
        description: "Experience the thrill of climbing in the high desert.",
        price_in_cents: 289_995,
        tags: &["weekend getaway", "bend", "high desert", "rock climbing"],
        in_season: true,
        requires_waiver: true,
        maximum_guests: 4,
        qty: 0,
    },
];

/// Seed the vacation catalog and a demo customer.
///
/// # Errors
///
/// Returns an error if `SITE_DATABASE_URL` is unset, the connection fails,
/// or an insert fails.
pub async fn run(force: bool) -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .map_err(|_| CommandError::MissingEnvVar("SITE_DATABASE_URL"))?;

    tracing::info!("Connecting to site database...");
    let pool = PgPool::connect(&database_url).await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vacations")
        .fetch_one(&pool)
        .await?;

    if existing > 0 && !force {
        tracing::info!(
            existing,
            "Catalog already seeded; use --force to seed anyway"
        );
        return Ok(());
    }

    seed_catalog(&pool).await?;
    seed_demo_customer(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<(), CommandError> {
    for vacation in CATALOG {
        sqlx::query(
            r"
            INSERT INTO vacations
                (sku, slug, name, category, description, price_in_cents,
                 tags, in_season, requires_waiver, maximum_guests, qty)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (sku) DO NOTHING
            ",
        )
        .bind(vacation.sku)
        .bind(vacation.slug)
        .bind(vacation.name)
        .bind(vacation.category)
        .bind(vacation.description)
        .bind(vacation.price_in_cents)
        .bind(
            vacation
                .tags
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>(),
        )
        .bind(vacation.in_season)
        .bind(vacation.requires_waiver)
        .bind(vacation.maximum_guests)
        .bind(vacation.qty)
        .execute(pool)
        .await?;

        tracing::info!(sku = vacation.sku, "Seeded vacation");
    }

    Ok(())
}

/// A demo customer with order history, for exercising the customer pages.
async fn seed_demo_customer(pool: &PgPool) -> Result<(), CommandError> {
    let customer_id: Option<(i32,)> = sqlx::query_as(
        r"
        INSERT INTO customers
            (first_name, last_name, email, address1, city, state, zip, phone)
        VALUES
            ('Mary', 'Sullivan', 'mary.sullivan@example.com',
             '123 Main St', 'Portland', 'OR', '97201', '503-555-0100')
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        ",
    )
    .fetch_optional(pool)
    .await?;

    let Some((customer_id,)) = customer_id else {
        tracing::info!("Demo customer already present");
        return Ok(());
    };

    for (order_number, status) in [("ML-2024-001", "shipped"), ("ML-2024-002", "pending")] {
        sqlx::query(
            r"
            INSERT INTO orders (customer_id, order_number, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (order_number) DO NOTHING
            ",
        )
        .bind(customer_id)
        .bind(order_number)
        .bind(status)
        .execute(pool)
        .await?;
    }

    tracing::info!(customer_id, "Seeded demo customer with orders");
    Ok(())
}
