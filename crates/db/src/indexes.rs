use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Users (auth principals + role side documents)
    create_indexes(
        db,
        "users",
        vec![index_unique(bson::doc! { "email": 1 })],
    )
    .await?;

    // Members
    create_indexes(
        db,
        "members",
        vec![
            index(bson::doc! { "collector": 1 }),
            index(bson::doc! { "verified": 1 }),
            // Deliberately non-unique: the codec guarantees uniqueness only
            // within a (initials, order) pair at generation time.
            index(bson::doc! { "member_number": 1 }),
        ],
    )
    .await?;

    // Collectors
    create_indexes(
        db,
        "collectors",
        vec![index(bson::doc! { "name": 1 })],
    )
    .await?;

    // Registrations (pending intake + revoked-member archive)
    create_indexes(
        db,
        "registrations",
        vec![
            index(bson::doc! { "status": 1 }),
            index(bson::doc! { "created_at": -1 }),
        ],
    )
    .await?;

    // Payments
    create_indexes(
        db,
        "payments",
        vec![
            index(bson::doc! { "member_id": 1 }),
            index(bson::doc! { "date": -1 }),
        ],
    )
    .await?;

    // Expenses
    create_indexes(
        db,
        "expenses",
        vec![index(bson::doc! { "date": -1 })],
    )
    .await?;

    // Notes
    create_indexes(
        db,
        "notes",
        vec![index(bson::doc! { "member_id": 1 })],
    )
    .await?;

    info!("Ensured MongoDB indexes");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    Ok(())
}
