use crate::advertisement;
use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, Set, TransactionTrait};
use anyhow::Result;
use rust_decimal::Decimal;

use super::{setup_test_db, unique};

fn draft(author: &str) -> advertisement::ActiveModel {
    advertisement::ActiveModel {
        id: NotSet,
        title: Set("Lamp".into()),
        description: Set("Desk lamp".into()),
        price: Set(Decimal::new(1999, 2)),
        author: Set(author.to_string()),
        created_at: NotSet,
    }
}

/// Commit makes the row visible
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let Some(db) = setup_test_db().await else {
        return Ok(());
    };

    let txn = db.begin().await?;
    let created = draft(&unique("tx_commit")).insert(&txn).await?;
    txn.commit().await?;

    let found = advertisement::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());

    advertisement::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Rollback leaves nothing behind
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let Some(db) = setup_test_db().await else {
        return Ok(());
    };

    let txn = db.begin().await?;
    let created = draft(&unique("tx_rollback")).insert(&txn).await?;
    txn.rollback().await?;

    let found = advertisement::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_none());
    Ok(())
}

/// Dropping an uncommitted transaction rolls it back
#[tokio::test]
async fn test_transaction_drop_rolls_back() -> Result<()> {
    let Some(db) = setup_test_db().await else {
        return Ok(());
    };

    let id = {
        let txn = db.begin().await?;
        draft(&unique("tx_drop")).insert(&txn).await?.id
    };

    let found = advertisement::Entity::find_by_id(id).one(&db).await?;
    assert!(found.is_none());
    Ok(())
}
